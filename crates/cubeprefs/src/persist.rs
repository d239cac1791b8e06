//! State that outlives a session. Where and how it is stored is up to the
//! host; this module only converts it to and from JSON.

use cubepuzzle::Leaderboard;
use serde::{Deserialize, Serialize};

use crate::Theme;

/// Leaderboard and theme, saved at startup and after every change.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct PersistedState {
    pub leaderboard: Leaderboard,
    pub theme: Theme,
}
impl PersistedState {
    pub fn serialize(&self) -> eyre::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
    pub fn deserialize(s: &str) -> eyre::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
