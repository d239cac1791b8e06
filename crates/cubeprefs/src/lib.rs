//! User preferences and persisted state.
//!
//! Preferences are layered: the bundled defaults are loaded first and any
//! user-provided YAML overrides individual keys.

#![allow(missing_docs)] // fields are documented in `default.yaml`

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate strum;

use serde::{Deserialize, Serialize};

mod animation;
mod interaction;
mod persist;

pub use animation::*;
pub use interaction::*;
pub use persist::PersistedState;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// Color theme.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}
impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Whether the preferences have changed since they were loaded or saved.
    #[serde(skip)]
    pub needs_save: bool,

    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
    pub theme: Theme,
}
impl Preferences {
    /// Loads preferences, with keys from `user_yaml` (if any) overriding the
    /// defaults. If loading fails, then the default preferences are returned.
    pub fn load(user_yaml: Option<&str>) -> Self {
        Self::try_load(user_yaml).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Loads preferences, with keys from `user_yaml` (if any) overriding the
    /// defaults.
    pub fn try_load(user_yaml: Option<&str>) -> eyre::Result<Self> {
        lazy_static::initialize(&DEFAULT_PREFS);

        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(user_yaml) = user_yaml {
            config = config.add_source(config::File::from_str(user_yaml, PREFS_FILE_FORMAT));
        }

        let mut prefs: Self = config.build()?.try_deserialize()?;
        prefs.sanitize();
        Ok(prefs)
    }

    /// Serializes the preferences as YAML.
    pub fn to_yaml(&self) -> eyre::Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Replaces out-of-range values with their defaults.
    fn sanitize(&mut self) {
        let defaults = &*DEFAULT_PREFS;

        fn fix(name: &str, value: &mut f32, default: f32, is_valid: impl Fn(f32) -> bool) {
            if !is_valid(*value) {
                log::warn!("Invalid value {value} for {name}; using {default}");
                *value = default;
            }
        }

        let anim = &mut self.animation;
        let default_anim = &defaults.animation;
        fix(
            "animation.twist_duration",
            &mut anim.twist_duration,
            default_anim.twist_duration,
            |x| x >= 0.0 && x.is_finite(),
        );
        fix(
            "animation.scramble_speed",
            &mut anim.scramble_speed,
            default_anim.scramble_speed,
            |x| x > 0.0 && x.is_finite(),
        );

        let interaction = &mut self.interaction;
        let default_interaction = &defaults.interaction;
        fix(
            "interaction.mouse_drag_threshold",
            &mut interaction.mouse_drag_threshold,
            default_interaction.mouse_drag_threshold,
            |x| x >= 0.0 && x.is_finite(),
        );
        fix(
            "interaction.touch_drag_threshold",
            &mut interaction.touch_drag_threshold,
            default_interaction.touch_drag_threshold,
            |x| x >= 0.0 && x.is_finite(),
        );
        fix(
            "interaction.min_drag_alignment",
            &mut interaction.min_drag_alignment,
            default_interaction.min_drag_alignment,
            |x| (0.0..=1.0).contains(&x),
        );
    }
}
