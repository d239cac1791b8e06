//! Exact cube-symmetry rotations, axes, and quaternion helpers.
//!
//! Everything in this crate is pure. Layer turns on a cube are always 90°
//! rotations about a cardinal axis, so vector rotation is done by swapping and
//! negating coordinates instead of trigonometry, and quaternion orientations
//! are snapped back onto the 24 rotational symmetries of the cube.

pub use {approx, cgmath, num_traits as num};

/// Floating-point type used for geometry.
pub type Float = f32;

/// Small floating-point value used for comparisons.
pub const EPSILON: Float = 0.00001;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

macro_rules! debug_panic {
    ($($tok:tt)*) => {
        match cfg!(debug_assertions) {
            true => panic!($($tok)*),
            false => log::error!($($tok)*),
        }
    };
}

pub mod approx_cmp;
mod axis;
mod rotation;
mod sign;

pub use axis::Axis;
pub use rotation::*;
pub use sign::Sign;

/// Structs, traits, and constants.
pub mod prelude {
    pub use cgmath::{InnerSpace, Quaternion, Rotation, Vector3};

    pub use crate::approx_cmp::*;
    pub use crate::axis::Axis;
    pub use crate::rotation::*;
    pub use crate::sign::Sign;
    pub use crate::{EPSILON, Float};
}
