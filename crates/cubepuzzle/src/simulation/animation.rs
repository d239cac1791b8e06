use cubemath::cgmath::{Quaternion, Rotation, Vector3};
use cubemath::partial_turn;
use web_time::Duration;

use super::CubeSimulation;
use crate::{CubieId, Twist};

/// Twist that is currently animating.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TwistAnimation {
    /// Twist being animated.
    pub twist: Twist,
    /// Speed multiplier.
    pub speed: f32,
    /// Fraction of the quarter turn completed, from 0 to 1.
    pub progress: f32,
    /// Whether the twist is part of a scramble.
    pub is_scramble: bool,
}

/// Position and orientation of a cubie for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubieTransform {
    /// Cubie that this transform applies to.
    pub id: CubieId,
    /// Position of the center of the cubie.
    pub position: Vector3<f32>,
    /// Orientation of the cubie.
    pub rotation: Quaternion<f32>,
}

impl CubeSimulation {
    /// Steps the animation forward by `delta`. `base_speed` is the number of
    /// quarter turns per second for a twist with speed 1. If it is not
    /// positive and finite, the twist completes immediately.
    ///
    /// When the twist completes, it is applied and the next twist in the
    /// scramble queue (if any) starts. Returns whether the cube should be
    /// redrawn.
    pub fn tick(&mut self, delta: Duration, base_speed: f32) -> bool {
        let Some(anim) = &mut self.animation else {
            return false;
        };
        if base_speed > 0.0 && base_speed.is_finite() {
            anim.progress += base_speed * anim.speed * delta.as_secs_f32();
        } else {
            // Animations are disabled.
            anim.progress = 1.0;
        }
        if anim.progress >= 1.0 {
            anim.progress = 1.0;
            self.finish_rotation();
        }
        true
    }

    /// Returns the progress of the current twist animation, or `None` if
    /// nothing is animating.
    pub fn animation_progress(&self) -> Option<f32> {
        self.animation.map(|anim| anim.progress)
    }

    /// Returns the transform of every cubie, with cubies in the animating
    /// layer (if any) rotated `t` of the way through the twist.
    ///
    /// `t` is normally the animation progress after easing.
    pub fn cubie_transforms(&self, t: f32) -> Vec<CubieTransform> {
        let partial = self
            .animation
            .map(|anim| (anim.twist, partial_turn(anim.twist.axis, anim.twist.direction, t)));

        self.cubies
            .iter()
            .map(|cubie| {
                let position = cubie.position_f32();
                match partial {
                    Some((twist, rot)) if cubie.is_affected_by(twist) => CubieTransform {
                        id: cubie.id,
                        position: rot.rotate_vector(position),
                        rotation: rot * cubie.rotation,
                    },
                    _ => CubieTransform {
                        id: cubie.id,
                        position,
                        rotation: cubie.rotation,
                    },
                }
            })
            .collect()
    }
}
