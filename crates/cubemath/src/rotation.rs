//! Exact quarter-turn rotations about cardinal axes.

use std::f32::consts::FRAC_1_SQRT_2;
use std::ops::Neg;

use cgmath::{Deg, InnerSpace, Quaternion, Rotation3, Vector3};

use crate::{Axis, EPSILON, Sign};

/// Absolute values that a component of a cube-symmetry quaternion can take.
const QUATERNION_COMPONENTS: [f32; 4] = [0.0, 0.5, FRAC_1_SQRT_2, 1.0];

/// Rotates `v` by exactly 90° about `axis`. Positive `direction` rotates
/// counterclockwise when looking from +`axis` toward the origin (right-hand
/// rule).
///
/// This only swaps and negates coordinates, so repeated application never
/// drifts.
pub fn rotate_vector<S: Copy + Neg<Output = S>>(
    v: Vector3<S>,
    axis: Axis,
    direction: Sign,
) -> Vector3<S> {
    let Vector3 { x, y, z } = v;
    match (axis, direction) {
        (Axis::X, Sign::Pos) => Vector3::new(x, -z, y),
        (Axis::X, Sign::Neg) => Vector3::new(x, z, -y),
        (Axis::Y, Sign::Pos) => Vector3::new(z, y, -x),
        (Axis::Y, Sign::Neg) => Vector3::new(-z, y, x),
        (Axis::Z, Sign::Pos) => Vector3::new(-y, x, z),
        (Axis::Z, Sign::Neg) => Vector3::new(y, -x, z),
    }
}

/// Returns the quaternion for a 90° rotation about `axis`, using the same
/// convention as [`rotate_vector()`].
pub fn quarter_turn(axis: Axis, direction: Sign) -> Quaternion<f32> {
    Quaternion::from_sv(
        FRAC_1_SQRT_2,
        axis.unit_vec3() * (FRAC_1_SQRT_2 * direction.float()),
    )
}

/// Returns the quaternion for a rotation of `t` quarter turns about `axis`.
/// This is used for drawing a twist that is partway done.
pub fn partial_turn(axis: Axis, direction: Sign, t: f32) -> Quaternion<f32> {
    Quaternion::from_axis_angle(axis.unit_vec3(), Deg(90.0 * direction.float() * t))
}

/// Applies a 90° rotation about a world axis to the orientation `q`.
///
/// The new rotation is composed on the left, so it happens about the fixed
/// axes of the whole cube rather than the local axes of whatever `q` has
/// already rotated. The result is normalized and has a canonical sign (see
/// [`canonicalize_sign()`]).
pub fn rotate_quaternion(q: Quaternion<f32>, axis: Axis, direction: Sign) -> Quaternion<f32> {
    canonicalize_sign((quarter_turn(axis, direction) * q).normalize())
}

/// Returns whichever of `q` and `-q` has its first nonzero component (in the
/// order `w`, `x`, `y`, `z`) positive. Both represent the same orientation.
pub fn canonicalize_sign(q: Quaternion<f32>) -> Quaternion<f32> {
    let first_nonzero = [q.s, q.v.x, q.v.y, q.v.z]
        .into_iter()
        .find(|c| c.abs() > EPSILON);
    match first_nonzero {
        Some(c) if c < 0.0 => -q,
        _ => q,
    }
}

/// Snaps `q` to the nearest of the 24 rotational symmetries of a cube.
///
/// Every component of such a quaternion is one of 0, ±½, ±1/√2, or ±1, so
/// each component is rounded independently before renormalizing.
pub fn snap_orientation(q: Quaternion<f32>) -> Quaternion<f32> {
    let snap = |c: f32| {
        let nearest = QUATERNION_COMPONENTS
            .into_iter()
            .min_by(|a, b| (c.abs() - a).abs().total_cmp(&(c.abs() - b).abs()))
            .unwrap_or(0.0);
        nearest.copysign(c)
    };
    let snapped = Quaternion::new(snap(q.s), snap(q.v.x), snap(q.v.y), snap(q.v.z));
    if snapped.magnitude2() < EPSILON {
        debug_panic!("cannot snap degenerate orientation {q:?}");
        return Quaternion::new(1.0, 0.0, 0.0, 0.0);
    }
    canonicalize_sign(snapped.normalize())
}

/// Returns the absolute value of the dot product of `q` with the identity
/// rotation. This is 1 when `q` is the identity and decreases as `q` rotates
/// further away from it.
pub fn identity_alignment(q: Quaternion<f32>) -> f32 {
    q.s.abs()
}

/// Returns whether `a` and `b` represent approximately the same orientation.
pub fn orientation_approx_eq(a: Quaternion<f32>, b: Quaternion<f32>) -> bool {
    a.dot(b).abs() >= 1.0 - EPSILON
}

/// Snaps a vector (such as a surface normal with floating-point error) to the
/// nearest cardinal direction by keeping only its largest component.
///
/// Returns `None` if the vector is zero or not finite.
pub fn snap_to_axis(v: Vector3<f32>) -> Option<(Axis, Sign)> {
    let (axis, value) = Axis::iter()
        .map(|axis| (axis, axis.component(v)))
        .filter(|(_, value)| value.is_finite())
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))?;
    if value.abs() < EPSILON || !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
        return None;
    }
    Some((axis, Sign::from_float(value)?))
}
