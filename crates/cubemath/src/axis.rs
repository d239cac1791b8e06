use cgmath::Vector3;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::Sign;

/// 3-dimensional cardinal axis.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// Returns an iterator over all axes.
    pub fn iter() -> impl Clone + Iterator<Item = Axis> {
        <Self as IntoEnumIterator>::iter()
    }

    /// Returns the index of the axis (0, 1, or 2).
    pub const fn index(self) -> usize {
        self as usize
    }
    /// Returns the axis with the given index, or `None` if it is out of range.
    pub const fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the two axes perpendicular to this one, in cyclic order, so
    /// that the cross product of the returned axes is this axis.
    pub const fn perpendiculars(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::Z, Axis::X],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }
    /// Returns the unit vector along this axis, pointing in the direction of
    /// `sign`.
    pub fn signed_unit_vec3(self, sign: Sign) -> Vector3<f32> {
        self.unit_vec3() * sign.float()
    }

    /// Returns the component of `v` along this axis.
    pub fn component<S: Copy>(self, v: Vector3<S>) -> S {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;

    #[test]
    fn test_perpendiculars_are_right_handed() {
        for axis in Axis::iter() {
            let [a, b] = axis.perpendiculars();
            let cross = a.unit_vec3().cross(b.unit_vec3());
            assert_eq!(cross, axis.unit_vec3());
        }
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("Y".parse::<Axis>(), Ok(Axis::Y));
        assert!("w".parse::<Axis>().is_err());
        for axis in Axis::iter() {
            assert_eq!(Axis::from_index(axis.index()), Some(axis));
        }
    }
}
