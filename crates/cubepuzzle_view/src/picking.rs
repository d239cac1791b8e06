//! Ray casting against the cubies to find which face is under the pointer.

use cubemath::EPSILON;
use cubemath::cgmath::{Point2, Vector3};
use cubepuzzle::{Axis, CubeSize, Cubie, Sign};
use float_ord::FloatOrd;

use crate::{Camera, FaceHit};

/// Returns half the side length of a cubie, which is half the distance between
/// neighboring cubie centers.
pub fn cubie_half_extent(size: CubeSize) -> f32 {
    match size {
        CubeSize::Two => 1.0,
        CubeSize::Three => 0.5,
    }
}

/// Returns the nearest cubie face under `pixel`, or `None` if the pixel does
/// not cover the cube.
pub fn pick_face(
    camera: &Camera,
    size: CubeSize,
    cubies: &[Cubie],
    pixel: Point2<f32>,
) -> Option<FaceHit> {
    let (origin, dir) = camera.ray_through_pixel(pixel);
    let half = cubie_half_extent(size);
    cubies
        .iter()
        .filter_map(|cubie| {
            let center = cubie.position_f32();
            let (t, axis, sign) = intersect_box(origin, dir, center, half)?;
            Some((t, cubie, axis, sign))
        })
        .min_by_key(|(t, ..)| FloatOrd(*t))
        .map(|(_, cubie, axis, sign)| FaceHit {
            cubie: cubie.id,
            cubie_position: cubie.position_f32(),
            normal: axis.signed_unit_vec3(sign),
        })
}

/// Intersects a ray with an axis-aligned box. Returns the distance along the
/// ray to the entry point and the face through which the ray enters.
fn intersect_box(
    origin: Vector3<f32>,
    dir: Vector3<f32>,
    center: Vector3<f32>,
    half: f32,
) -> Option<(f32, Axis, Sign)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut entry_face = None;

    for axis in Axis::iter() {
        let o = axis.component(origin) - axis.component(center);
        let d = axis.component(dir);
        if d.abs() < EPSILON {
            // Parallel to this slab
            if o.abs() > half {
                return None;
            }
            continue;
        }
        let t0 = (-half - o) / d;
        let t1 = (half - o) / d;
        let (near, far) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        if near > t_enter {
            t_enter = near;
            // Moving in the positive direction enters through the negative face.
            entry_face = Some((axis, if d > 0.0 { Sign::Neg } else { Sign::Pos }));
        }
        t_exit = t_exit.min(far);
    }

    if t_enter > t_exit || t_enter < 0.0 {
        return None;
    }
    let (axis, sign) = entry_face?;
    Some((t_enter, axis, sign))
}
