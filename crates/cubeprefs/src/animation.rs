use serde::{Deserialize, Serialize};

pub use interpolation::InterpolateFn;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Number of seconds for a quarter turn at normal speed. Zero disables
    /// twist animations.
    pub twist_duration: f32,
    /// Speed multiplier for scramble twists.
    pub scramble_speed: f32,
    pub twist_interpolation: InterpolateFn,
}
impl AnimationPreferences {
    /// Returns the number of quarter turns per second for a twist with speed
    /// multiplier 1. This is infinite if animations are disabled.
    pub fn base_speed(&self) -> f32 {
        if self.twist_duration > 0.0 {
            1.0 / self.twist_duration
        } else {
            f32::INFINITY
        }
    }
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f32::consts::PI;

    use serde::{Deserialize, Serialize};

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0.
    #[derive(
        Serialize,
        Deserialize,
        Debug,
        Default,
        Copy,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Display,
        EnumIter,
        EnumString,
    )]
    #[serde(rename_all = "snake_case")]
    #[strum(serialize_all = "snake_case")]
    pub enum InterpolateFn {
        Lerp,
        #[default]
        Cosine,
        Cubic,
    }

    impl InterpolateFn {
        /// Returns the interpolation value in the range [0, 1] for `t` in the
        /// range [0, 1].
        pub fn interpolate(self, t: f32) -> f32 {
            let t = t.clamp(0.0, 1.0);
            match self {
                Self::Lerp => t,
                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,
                Self::Cubic => (3.0 - 2.0 * t) * t * t,
            }
        }
    }

}
