//! Sign enum.

use std::fmt;
use std::ops::{Mul, Neg};

/// Positive or negative.
///
/// There is deliberately no zero variant: every cube twist has a direction and
/// every face has an outward side.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    #[default]
    Pos = 1,
}
impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Neg => write!(f, "-"),
            Sign::Pos => write!(f, "+"),
        }
    }
}
impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Mul<Sign> for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        match self {
            Sign::Neg => -rhs,
            Sign::Pos => rhs,
        }
    }
}
impl Sign {
    /// Returns the sign of a number, or `None` if it is zero or NaN.
    pub fn from_float(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Sign::Pos)
        } else if x < 0.0 {
            Some(Sign::Neg)
        } else {
            None
        }
    }
    /// Returns the sign of an integer, or `None` if it is zero.
    pub const fn from_int(i: i32) -> Option<Self> {
        match i.signum() {
            1 => Some(Sign::Pos),
            -1 => Some(Sign::Neg),
            _ => None,
        }
    }

    /// Returns an integer representation of the sign (either -1 or 1).
    pub const fn int(self) -> i8 {
        match self {
            Sign::Neg => -1,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0 or
    /// 1.0).
    pub const fn float(self) -> f32 {
        self.int() as f32
    }

    /// Returns an iterator over both signs.
    pub fn iter() -> impl Clone + Iterator<Item = Sign> {
        [Sign::Neg, Sign::Pos].into_iter()
    }
}
