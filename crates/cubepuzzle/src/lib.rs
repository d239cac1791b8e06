//! Rubik's cube simulation backend: cube state, twist sequencing, scrambling,
//! solve detection, and twist animation.

mod cube;
mod leaderboard;
pub mod notation;
mod simulation;
mod twist;

/// Re-export of `chrono`.
pub use chrono;
pub use prelude::*;

/// Prelude of common imports.
pub mod prelude {
    pub use cubemath::{Axis, Sign};

    pub use crate::cube::{
        CubeSize, Cubie, CubieId, Face, FaceColor, Sticker, UnsupportedCubeSize,
        init_cube,
    };
    pub use crate::leaderboard::{Leaderboard, LeaderboardEntry};
    pub use crate::notation::NotationError;
    pub use crate::simulation::{
        CubeEvent, CubeSimulation, CubieTransform, GameStatus, ObserverId, TwistAnimation,
    };
    pub use crate::twist::Twist;
}

/// Default number of twists in a scramble.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 20;

/// Default speed multiplier for scramble twists, which are played back faster
/// than twists made by the player.
pub const DEFAULT_SCRAMBLE_SPEED: f32 = 4.0;

/// Speed multiplier for twists made by the player.
pub const DEFAULT_TWIST_SPEED: f32 = 1.0;

/// Maximum distance along each axis between a cubie's position and its
/// original position for the cube to be considered solved.
pub const SOLVED_POSITION_TOLERANCE: f32 = 0.1;

/// Minimum absolute dot product between a cubie's orientation and the identity
/// orientation for the cube to be considered solved.
pub const SOLVED_ORIENTATION_THRESHOLD: f32 = 0.95;

#[cfg(test)]
mod tests;
