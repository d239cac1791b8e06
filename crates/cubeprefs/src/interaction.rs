use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Whether to reverse the direction of twists made by dragging.
    pub invert_controls: bool,

    /// Minimum distance in pixels that the mouse must move before a drag
    /// becomes a twist.
    pub mouse_drag_threshold: f32,
    /// Minimum distance in pixels that a finger must move before a drag
    /// becomes a twist.
    pub touch_drag_threshold: f32,
    /// Minimum absolute cosine between the drag and the on-screen direction of
    /// a layer for the drag to twist that layer. Drags that are too diagonal
    /// are ignored.
    pub min_drag_alignment: f32,

    pub scramble_length: usize,
}

/// Device that a pointer event came from.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

impl InteractionPreferences {
    pub fn drag_threshold(&self, pointer: PointerKind) -> f32 {
        match pointer {
            PointerKind::Mouse => self.mouse_drag_threshold,
            PointerKind::Touch => self.touch_drag_threshold,
        }
    }
}
