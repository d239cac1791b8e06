//! Converting a pointer drag on a cubie face into a twist.
//!
//! Dragging across a face slides the sticker under the pointer along one of
//! the two cube axes parallel to that face. The slide axis whose on-screen
//! direction best matches the drag wins. The twist axis is `slide × normal`
//! and the twisted layer is the one containing the grabbed cubie.

use cubemath::approx_cmp::is_approx_nonzero;
use cubemath::cgmath::{InnerSpace, Point2, Vector3};
use cubemath::snap_to_axis;
use cubeprefs::{InteractionPreferences, PointerKind};
use cubepuzzle::{Axis, CubeSimulation, CubieId, Sign, Twist};
use float_ord::FloatOrd;

use crate::Camera;

/// Cubie face under the pointer when a drag begins.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaceHit {
    /// Cubie that was hit.
    pub cubie: CubieId,
    /// Position of the center of the cubie in cube space.
    pub cubie_position: Vector3<f32>,
    /// Outward normal of the face that was hit, in cube space. This does not
    /// need to be exactly axis-aligned.
    pub normal: Vector3<f32>,
}

/// Result of moving the pointer during a drag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GestureOutcome {
    /// The drag is too short to tell which way it goes.
    Pending,
    /// The drag does not line up with any layer, so it is ignored.
    Rejected,
    /// The drag resolved to a twist.
    Twist(Twist),
}

/// State of a drag that started on a cubie face.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragSession {
    /// Screen position where the drag started.
    pub start: Point2<f32>,
    /// Position of the center of the grabbed cubie in cube space.
    pub cubie_position: Vector3<f32>,
    /// Axis perpendicular to the grabbed face.
    pub normal_axis: Axis,
    /// Which side of the cubie the grabbed face is on.
    pub normal_sign: Sign,
    /// Device doing the dragging.
    pub pointer: PointerKind,
}
impl DragSession {
    /// Begins a drag on a cubie face.
    ///
    /// Returns `None` if a twist is animating or the face normal is
    /// degenerate.
    pub fn begin(
        sim: &CubeSimulation,
        start: Point2<f32>,
        hit: FaceHit,
        pointer: PointerKind,
    ) -> Option<Self> {
        if sim.is_animating() {
            log::trace!("ignoring drag while twist is animating");
            return None;
        }
        let Some((normal_axis, normal_sign)) = snap_to_axis(hit.normal) else {
            log::trace!("ignoring drag on face with normal {:?}", hit.normal);
            return None;
        };
        Some(Self {
            start,
            cubie_position: hit.cubie_position,
            normal_axis,
            normal_sign,
            pointer,
        })
    }

    /// Returns the outward unit normal of the grabbed face.
    pub fn normal(&self) -> Vector3<f32> {
        self.normal_axis.signed_unit_vec3(self.normal_sign)
    }

    /// Decides which twist (if any) the drag from the start position to
    /// `cursor_pos` represents.
    pub fn resolve(
        &self,
        cursor_pos: Point2<f32>,
        camera: &Camera,
        prefs: &InteractionPreferences,
    ) -> GestureOutcome {
        let drag_delta = cursor_pos - self.start;
        let threshold = prefs.drag_threshold(self.pointer);
        if drag_delta.magnitude() < threshold || !is_approx_nonzero(&drag_delta.magnitude()) {
            return GestureOutcome::Pending;
        }
        let drag_dir = drag_delta.normalize();

        // Find the slide axis whose on-screen direction best matches the drag.
        let best = self
            .normal_axis
            .perpendiculars()
            .into_iter()
            .filter_map(|slide_axis| {
                let screen_dir = camera
                    .project_vector_to_screen_space(self.cubie_position, slide_axis.unit_vec3())?;
                if !is_approx_nonzero(&screen_dir.magnitude()) {
                    return None; // axis points straight at the camera
                }
                let score = drag_dir.dot(screen_dir.normalize());
                Some((slide_axis, score))
            })
            .max_by_key(|(_, score)| FloatOrd(score.abs()));

        let Some((slide_axis, score)) = best else {
            log::trace!("rejecting drag: no slide axis is visible");
            return GestureOutcome::Rejected;
        };
        if score.abs() < prefs.min_drag_alignment {
            log::trace!("rejecting drag: best alignment {score} is too diagonal");
            return GestureOutcome::Rejected;
        }
        let Some(slide_sign) = Sign::from_float(score) else {
            return GestureOutcome::Rejected;
        };
        let slide = slide_axis.signed_unit_vec3(slide_sign);

        let Some((axis, direction)) = snap_to_axis(slide.cross(self.normal())) else {
            return GestureOutcome::Rejected;
        };
        let layer = axis.component(self.cubie_position).round() as i8;
        let direction = if prefs.invert_controls {
            -direction
        } else {
            direction
        };
        GestureOutcome::Twist(Twist::new(axis, layer, direction))
    }
}

#[cfg(test)]
mod tests {
    use cubemath::cgmath::{Deg, Quaternion, Rotation3, point2, vec2, vec3};
    use cubeprefs::DEFAULT_PREFS;
    use cubepuzzle::CubeSize;
    use pretty_assertions::assert_eq;

    use super::*;

    fn front_hit(cubie_position: Vector3<f32>) -> FaceHit {
        FaceHit {
            cubie: 0,
            cubie_position,
            normal: vec3(0.0, 0.0, 1.0),
        }
    }

    fn drag(session: &DragSession, delta: (f32, f32)) -> GestureOutcome {
        let camera = Camera::front();
        let prefs = &DEFAULT_PREFS.interaction;
        session.resolve(session.start + vec2(delta.0, delta.1), &camera, prefs)
    }

    fn session_at(cubie_position: Vector3<f32>, pointer: PointerKind) -> DragSession {
        let sim = CubeSimulation::new(CubeSize::Three);
        DragSession::begin(&sim, point2(400.0, 300.0), front_hit(cubie_position), pointer)
            .expect("drag starts")
    }

    #[test]
    fn test_short_drag_never_twists() {
        let session = session_at(vec3(1.0, 1.0, 1.0), PointerKind::Mouse);
        for delta in [(10.0, 0.0), (0.0, -10.0), (7.0, 7.0), (0.0, 0.0)] {
            assert_eq!(drag(&session, delta), GestureOutcome::Pending);
        }
        // Touch has a smaller threshold than the mouse.
        let session = session_at(vec3(1.0, 1.0, 1.0), PointerKind::Touch);
        assert_eq!(drag(&session, (25.0, 0.0)), drag(&session, (40.0, 0.0)));
        let session = session_at(vec3(1.0, 1.0, 1.0), PointerKind::Mouse);
        assert_eq!(drag(&session, (25.0, 0.0)), GestureOutcome::Pending);
    }

    #[test]
    fn test_straight_drags() {
        // Dragging the top row of the front face to the right slides along
        // +X, and +X × +Z is -Y, which is the U twist.
        let session = session_at(vec3(1.0, 1.0, 1.0), PointerKind::Mouse);
        assert_eq!(
            drag(&session, (50.0, 2.0)),
            GestureOutcome::Twist(Twist::new(Axis::Y, 1, Sign::Neg)),
        );
        assert_eq!(
            drag(&session, (-50.0, 0.0)),
            GestureOutcome::Twist(Twist::new(Axis::Y, 1, Sign::Pos)),
        );
        // Dragging the right column up slides along +Y, and +Y × +Z is +X,
        // which is the R' twist.
        assert_eq!(
            drag(&session, (0.0, -50.0)),
            GestureOutcome::Twist(Twist::new(Axis::X, 1, Sign::Pos)),
        );

        // The middle of the front face drags slices.
        let session = session_at(vec3(0.0, 0.0, 1.0), PointerKind::Mouse);
        assert_eq!(
            drag(&session, (0.0, 40.0)),
            GestureOutcome::Twist(Twist::new(Axis::X, 0, Sign::Neg)),
        );
    }

    #[test]
    fn test_drag_twists_layer_of_grabbed_cubie() {
        let session = session_at(vec3(-1.0, 0.0, 1.0), PointerKind::Mouse);
        let GestureOutcome::Twist(twist) = drag(&session, (60.0, 0.0)) else {
            panic!("expected twist");
        };
        assert_eq!(twist, Twist::new(Axis::Y, 0, Sign::Neg));
        // The grabbed front-left edge is in the twisted layer. It moves to the
        // back-left, and its front sticker ends up on the left face.
        let cubie = cubepuzzle::Cubie::new(0, vec3(-1, 0, 1));
        assert!(cubie.is_affected_by(twist));
        let cubie = cubie.twisted(twist);
        assert_eq!(cubie.position, vec3(-1, 0, -1));
        let grabbed = cubie
            .stickers()
            .into_iter()
            .find(|s| s.color == cubepuzzle::FaceColor::Green)
            .expect("edge has a front sticker");
        assert_eq!(grabbed.facing, cubepuzzle::Face::L);
    }

    #[test]
    fn test_diagonal_drag_rejected() {
        // Seen from a low angle, both slide axes of the top face point mostly
        // sideways on screen, so a vertical drag matches neither.
        let camera = Camera {
            rot: Quaternion::from_angle_x(Deg(10.0)) * Quaternion::from_angle_y(Deg(45.0)),
            ..Camera::front()
        };
        let prefs = &DEFAULT_PREFS.interaction;
        let sim = CubeSimulation::new(CubeSize::Three);
        let hit = FaceHit {
            cubie: 0,
            cubie_position: vec3(0.0, 1.0, 0.0),
            normal: vec3(0.0, 1.0, 0.0),
        };
        let session = DragSession::begin(&sim, point2(400.0, 300.0), hit, PointerKind::Mouse)
            .expect("drag starts");
        for delta in [vec2(0.0, 60.0), vec2(0.0, -60.0)] {
            let outcome = session.resolve(session.start + delta, &camera, prefs);
            assert_eq!(outcome, GestureOutcome::Rejected);
        }

        // Dragging along the on-screen direction of +X slides along +X, and
        // +X × +Y is +Z.
        let x_dir = camera
            .project_vector_to_screen_space(hit.cubie_position, Vector3::unit_x())
            .expect("visible")
            .normalize();
        let outcome = session.resolve(session.start + x_dir * 60.0, &camera, prefs);
        assert_eq!(outcome, GestureOutcome::Twist(Twist::new(Axis::Z, 0, Sign::Pos)));
    }

    #[test]
    fn test_invert_controls() {
        let session = session_at(vec3(1.0, 1.0, 1.0), PointerKind::Mouse);
        let mut prefs = DEFAULT_PREFS.interaction.clone();
        prefs.invert_controls = true;
        let outcome = session.resolve(session.start + vec2(50.0, 0.0), &Camera::front(), &prefs);
        assert_eq!(outcome, GestureOutcome::Twist(Twist::new(Axis::Y, 1, Sign::Pos)));
    }

    #[test]
    fn test_no_drag_while_animating() {
        let mut sim = CubeSimulation::new(CubeSize::Three);
        assert!(sim.trigger_rotation(Twist::new(Axis::Z, 1, Sign::Neg), 1.0));
        let hit = front_hit(vec3(0.0, 0.0, 1.0));
        assert_eq!(
            DragSession::begin(&sim, point2(0.0, 0.0), hit, PointerKind::Mouse),
            None,
        );
        sim.finish_rotation();
        assert!(DragSession::begin(&sim, point2(0.0, 0.0), hit, PointerKind::Mouse).is_some());
    }
}
