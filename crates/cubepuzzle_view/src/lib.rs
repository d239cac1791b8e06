//! Interactive cube view: turning pointer drags and key presses into twists.

mod camera;
pub mod gesture;
pub mod keybinds;
pub mod picking;
mod view;

pub use camera::Camera;
pub use gesture::{DragSession, FaceHit, GestureOutcome};
pub use view::{CubeView, DragState};

/// Frame rate assumed for the first frame of an animation.
const ASSUMED_FPS: f32 = 120.0;

/// Camera rotation per pixel when dragging outside the cube.
pub const VIEW_ROT_DEGREES_PER_PIXEL: f32 = 0.5;
