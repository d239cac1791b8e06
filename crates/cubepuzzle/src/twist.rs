use std::fmt;

use cubemath::{Axis, Sign};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::CubeSize;

/// Quarter turn of one layer of the cube.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    /// Axis of rotation.
    pub axis: Axis,
    /// Coordinate of the twisted layer along `axis`.
    pub layer: i8,
    /// Direction of rotation, using the right-hand rule around `axis`.
    pub direction: Sign,
}
impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::notation::twist_to_symbol(*self) {
            Some((symbol, false)) => write!(f, "{symbol}"),
            Some((symbol, true)) => write!(f, "{symbol}'"),
            None => write!(f, "[{}{} {}]", self.direction, self.axis, self.layer),
        }
    }
}
impl Twist {
    /// Constructs a twist.
    pub const fn new(axis: Axis, layer: i8, direction: Sign) -> Self {
        Self {
            axis,
            layer,
            direction,
        }
    }

    /// Returns the inverse twist.
    #[must_use]
    pub fn rev(self) -> Self {
        Self {
            direction: -self.direction,
            ..self
        }
    }

    /// Returns whether the twist is valid on a cube of the given size.
    pub fn is_valid_for(self, size: CubeSize) -> bool {
        size.is_valid_layer(self.layer)
    }

    /// Returns a uniformly random valid twist for a cube of the given size.
    ///
    /// Consecutive random twists may cancel or repeat each other; no attempt
    /// is made to filter them.
    pub fn from_rng(size: CubeSize, rng: &mut impl Rng) -> Self {
        let axis = Axis::from_index(rng.random_range(0..3)).unwrap_or(Axis::X);
        let layer = *size.layers().choose(rng).unwrap_or(&1);
        let direction = if rng.random_bool(0.5) {
            Sign::Pos
        } else {
            Sign::Neg
        };
        Self::new(axis, layer, direction)
    }
}
