//! Approximate comparison functions that automatically use [`EPSILON`].

pub use approx::AbsDiffEq;
use num_traits::Zero;

use crate::{EPSILON, Float};

/// Compares two numbers, but considers them equal if they are separated by less
/// than `EPSILON`.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

/// Returns whether `x` has an absolute value greater than `EPSILON`.
pub fn is_approx_nonzero<T: AbsDiffEq<Epsilon = Float> + Zero>(x: &T) -> bool {
    !approx_eq(x, &T::zero())
}

/// Returns `f` as an integer if it is approximately equal to one.
pub fn to_approx_integer(f: Float) -> Option<i32> {
    let i = f.round();
    (i.is_finite() && approx_eq(&f, &i)).then_some(i as i32)
}

/// Returns whether each component of `a` is within `tolerance` of the
/// corresponding component of `b`.
pub fn within_tolerance(
    a: cgmath::Vector3<Float>,
    b: cgmath::Vector3<Float>,
    tolerance: Float,
) -> bool {
    (a.x - b.x).abs() <= tolerance
        && (a.y - b.y).abs() <= tolerance
        && (a.z - b.z).abs() <= tolerance
}
