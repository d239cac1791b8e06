//! Cubies, faces, and sticker colors.

use std::fmt;

use cubemath::cgmath::{Quaternion, Rotation, Vector3, vec3};
use cubemath::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{SOLVED_ORIENTATION_THRESHOLD, SOLVED_POSITION_TOLERANCE, Twist};

/// Stable identity of a cubie within one cube.
pub type CubieId = u32;

/// Number of layers along each axis.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CubeSize {
    /// 2x2x2 cube, with 8 cubies.
    Two,
    /// 3x3x3 cube, with 27 cubies (including the hidden core).
    #[default]
    Three,
}
impl fmt::Display for CubeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.layer_count();
        write!(f, "{n}x{n}x{n}")
    }
}
impl TryFrom<u8> for CubeSize {
    type Error = UnsupportedCubeSize;

    fn try_from(layer_count: u8) -> Result<Self, Self::Error> {
        match layer_count {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(UnsupportedCubeSize(layer_count)),
        }
    }
}

/// Error returned when constructing a [`CubeSize`] from a layer count other
/// than 2 or 3.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("unsupported cube size {0}; expected 2 or 3")]
pub struct UnsupportedCubeSize(pub u8);
impl CubeSize {
    /// Returns the number of layers along each axis.
    pub const fn layer_count(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
    /// Returns the coordinates of the layers along each axis.
    ///
    /// A 2x2x2 has no middle layer, so its cubies sit at -1 and +1 just like
    /// the outer layers of a 3x3x3.
    pub const fn layers(self) -> &'static [i8] {
        match self {
            Self::Two => &[-1, 1],
            Self::Three => &[-1, 0, 1],
        }
    }
    /// Returns whether `layer` is a layer coordinate on this cube.
    pub fn is_valid_layer(self, layer: i8) -> bool {
        self.layers().contains(&layer)
    }
    /// Returns the number of cubies in a single layer.
    pub fn cubies_per_layer(self) -> usize {
        self.layers().len().pow(2)
    }
}

/// One of the small cubes that make up the puzzle.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Cubie {
    /// Stable identity, assigned at creation.
    pub id: CubieId,
    /// Current location in the cube's local frame.
    pub position: Vector3<i8>,
    /// Orientation relative to the original orientation.
    pub rotation: Quaternion<f32>,
    /// Location in the solved state, which also determines sticker colors.
    pub original_position: Vector3<i8>,
}
impl Cubie {
    /// Constructs a cubie in its solved location and orientation.
    pub fn new(id: CubieId, position: Vector3<i8>) -> Self {
        Self {
            id,
            position,
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            original_position: position,
        }
    }

    /// Returns whether the cubie is in `layer` along `axis`.
    pub fn is_in_layer(&self, axis: Axis, layer: i8) -> bool {
        axis.component(self.position) == layer
    }
    /// Returns whether the cubie is affected by `twist`.
    pub fn is_affected_by(&self, twist: Twist) -> bool {
        self.is_in_layer(twist.axis, twist.layer)
    }

    /// Returns the cubie after applying a twist to it, whether or not it is
    /// in the twisted layer.
    #[must_use]
    pub fn twisted(self, twist: Twist) -> Self {
        Self {
            position: rotate_vector(self.position, twist.axis, twist.direction),
            rotation: snap_orientation(rotate_quaternion(
                self.rotation,
                twist.axis,
                twist.direction,
            )),
            ..self
        }
    }

    /// Returns the current position as a floating-point vector.
    pub fn position_f32(&self) -> Vector3<f32> {
        self.position.map(f32::from)
    }

    /// Returns whether the cubie is in its original location and orientation,
    /// within tolerance.
    pub fn is_home(&self) -> bool {
        within_tolerance(
            self.position_f32(),
            self.original_position.map(f32::from),
            SOLVED_POSITION_TOLERANCE,
        ) && identity_alignment(self.rotation) >= SOLVED_ORIENTATION_THRESHOLD
    }

    /// Returns the stickers on the cubie, which are on the faces of the
    /// original position that touch the outside of the cube.
    pub fn stickers(&self) -> Vec<Sticker> {
        Face::iter()
            .filter(|face| face.axis().component(self.original_position) == face.sign().int())
            .filter_map(|face| {
                let normal = self.rotation.rotate_vector(face.normal());
                let (axis, sign) = snap_to_axis(normal)?;
                Some(Sticker {
                    color: face.color(),
                    facing: Face::new(axis, sign),
                })
            })
            .collect()
    }
}

/// Returns the cubies of a solved cube, ordered by X, then Y, then Z.
pub fn init_cube(size: CubeSize) -> Vec<Cubie> {
    let layers = size.layers();
    let mut cubies = Vec::with_capacity(layers.len().pow(3));
    for &x in layers {
        for &y in layers {
            for &z in layers {
                cubies.push(Cubie::new(cubies.len() as CubieId, vec3(x, y, z)));
            }
        }
    }
    cubies
}

/// Face of the cube.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Face {
    /// Right (+X).
    R,
    /// Left (-X).
    L,
    /// Up (+Y).
    U,
    /// Down (-Y).
    D,
    /// Front (+Z).
    F,
    /// Back (-Z).
    B,
}
impl Face {
    /// Returns an iterator over all faces.
    pub fn iter() -> impl Clone + Iterator<Item = Face> {
        <Self as IntoEnumIterator>::iter()
    }

    /// Returns the face on the `sign` side of `axis`.
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        match (axis, sign) {
            (Axis::X, Sign::Pos) => Face::R,
            (Axis::X, Sign::Neg) => Face::L,
            (Axis::Y, Sign::Pos) => Face::U,
            (Axis::Y, Sign::Neg) => Face::D,
            (Axis::Z, Sign::Pos) => Face::F,
            (Axis::Z, Sign::Neg) => Face::B,
        }
    }

    /// Returns the axis perpendicular to the face.
    pub const fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }
    /// Returns which side of the cube the face is on.
    pub const fn sign(self) -> Sign {
        match self {
            Face::R | Face::U | Face::F => Sign::Pos,
            Face::L | Face::D | Face::B => Sign::Neg,
        }
    }
    /// Returns the opposite face.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Face::R => Face::L,
            Face::L => Face::R,
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    /// Returns the outward unit normal of the face.
    pub fn normal(self) -> Vector3<f32> {
        self.axis().signed_unit_vec3(self.sign())
    }

    /// Returns the color of the stickers that start on this face.
    pub const fn color(self) -> FaceColor {
        match self {
            Face::R => FaceColor::Red,
            Face::L => FaceColor::Orange,
            Face::U => FaceColor::White,
            Face::D => FaceColor::Yellow,
            Face::F => FaceColor::Green,
            Face::B => FaceColor::Blue,
        }
    }

    /// Returns the clockwise twist of the outer layer of this face, as seen
    /// looking at the face.
    pub const fn clockwise_twist(self) -> Twist {
        let sign = self.sign();
        Twist {
            axis: self.axis(),
            layer: sign.int(),
            direction: match sign {
                Sign::Pos => Sign::Neg,
                Sign::Neg => Sign::Pos,
            },
        }
    }
}

/// Sticker color, using the standard color scheme.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum FaceColor {
    White,
    Yellow,
    Red,
    Orange,
    Green,
    Blue,
}

/// Sticker on a cubie.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Sticker {
    /// Color of the sticker.
    pub color: FaceColor,
    /// Direction the sticker currently faces.
    pub facing: Face,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_cube() {
        let cube = init_cube(CubeSize::Three);
        assert_eq!(cube.len(), 27);
        assert!(cube.iter().enumerate().all(|(i, c)| c.id == i as CubieId));
        assert_eq!(cube.iter().map(|c| c.stickers().len()).sum::<usize>(), 54);

        let cube = init_cube(CubeSize::Two);
        assert_eq!(cube.len(), 8);
        assert!(cube.iter().all(|c| c.stickers().len() == 3));
    }

    #[test]
    fn test_sticker_follows_twist() {
        // The up-front-right corner.
        let corner = Cubie::new(0, vec3(1, 1, 1));
        let twisted = corner.twisted(Face::R.clockwise_twist());
        assert_eq!(twisted.position, vec3(1, 1, -1));

        let white = twisted
            .stickers()
            .into_iter()
            .find(|s| s.color == FaceColor::White)
            .expect("corner has a white sticker");
        assert_eq!(white.facing, Face::B);

        let red = twisted
            .stickers()
            .into_iter()
            .find(|s| s.color == FaceColor::Red)
            .expect("corner has a red sticker");
        assert_eq!(red.facing, Face::R);
    }

    #[test]
    fn test_cube_size_from_layer_count() {
        assert_eq!(CubeSize::try_from(2), Ok(CubeSize::Two));
        assert_eq!(CubeSize::try_from(3), Ok(CubeSize::Three));
        let err = CubeSize::try_from(4).expect_err("4x4x4 is unsupported");
        assert_eq!(err, UnsupportedCubeSize(4));
        assert_eq!(err.to_string(), "unsupported cube size 4; expected 2 or 3");
    }

    #[test]
    fn test_face_round_trip() {
        for face in Face::iter() {
            assert_eq!(Face::new(face.axis(), face.sign()), face);
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.clockwise_twist().layer, face.sign().int());
        }
    }
}
