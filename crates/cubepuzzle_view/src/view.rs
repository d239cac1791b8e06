use cubemath::cgmath::Point2;
use cubeprefs::{PointerKind, Preferences};
use cubepuzzle::{CubeSimulation, CubeSize, CubieTransform, DEFAULT_TWIST_SPEED, Twist};
use web_time::{Duration, Instant};

use crate::gesture::{DragSession, FaceHit, GestureOutcome};
use crate::{ASSUMED_FPS, Camera, VIEW_ROT_DEGREES_PER_PIXEL, keybinds, picking};

/// Interactive view of a cube, which turns pointer and keyboard input into
/// twists and produces cubie transforms for each frame.
#[derive(Debug)]
pub struct CubeView {
    /// Cube simulation.
    pub sim: CubeSimulation,
    /// Camera used for drawing, picking, and interpreting drags.
    pub camera: Camera,

    /// Current drag, if a pointer is down.
    drag_state: Option<DragState>,
    /// Last known pointer position.
    cursor_pos: Option<Point2<f32>>,

    /// Time of last frame, or `None` if we are not in the middle of an
    /// animation.
    last_frame_time: Option<Instant>,
}
impl CubeView {
    /// Constructs a view of a solved cube.
    pub fn new(size: CubeSize, prefs: &Preferences) -> Self {
        let mut sim = CubeSimulation::new(size);
        sim.set_scramble_speed(prefs.animation.scramble_speed);
        Self {
            sim,
            camera: Camera::default(),

            drag_state: None,
            cursor_pos: None,

            last_frame_time: None,
        }
    }

    /// Updates settings that the simulation keeps a copy of.
    pub fn apply_prefs(&mut self, prefs: &Preferences) {
        self.sim.set_scramble_speed(prefs.animation.scramble_speed);
    }

    /// Returns the current drag state.
    pub fn drag_state(&self) -> Option<DragState> {
        self.drag_state
    }

    /// Handles a pointer press, using the view's own camera to find the face
    /// under the pointer.
    pub fn pointer_down(&mut self, pos: Point2<f32>, pointer: PointerKind) {
        let hit = picking::pick_face(&self.camera, self.sim.size(), self.sim.cubies(), pos);
        self.pointer_down_on_face(pos, hit, pointer);
    }
    /// Handles a pointer press where the host has already determined which
    /// face (if any) is under the pointer.
    pub fn pointer_down_on_face(
        &mut self,
        pos: Point2<f32>,
        hit: Option<FaceHit>,
        pointer: PointerKind,
    ) {
        self.cursor_pos = Some(pos);
        self.drag_state = Some(match hit {
            None => DragState::ViewRot,
            Some(hit) => match DragSession::begin(&self.sim, pos, hit, pointer) {
                Some(session) => DragState::PreTwist(session),
                None => DragState::Canceled,
            },
        });
    }

    /// Handles pointer movement. Returns the twist that was started, if any.
    pub fn pointer_move(&mut self, pos: Point2<f32>, prefs: &Preferences) -> Option<Twist> {
        let cursor_delta = self.cursor_pos.map(|old| pos - old);
        self.cursor_pos = Some(pos);

        match self.drag_state? {
            DragState::ViewRot => {
                if let Some(delta) = cursor_delta {
                    self.camera.orbit(delta, VIEW_ROT_DEGREES_PER_PIXEL);
                }
                None
            }

            DragState::PreTwist(session) => {
                match session.resolve(pos, &self.camera, &prefs.interaction) {
                    GestureOutcome::Pending => None,
                    GestureOutcome::Rejected => {
                        log::trace!("canceling drag");
                        self.drag_state = Some(DragState::Canceled);
                        None
                    }
                    GestureOutcome::Twist(twist) => {
                        // One twist per drag
                        self.drag_state = Some(DragState::Canceled);
                        self.sim
                            .trigger_rotation(twist, DEFAULT_TWIST_SPEED)
                            .then_some(twist)
                    }
                }
            }

            DragState::Canceled => None,
        }
    }

    /// Handles a pointer release, which ends any drag.
    pub fn pointer_up(&mut self) {
        self.drag_state = None;
    }

    /// Handles a key press. Returns the twist that was started, if any.
    pub fn key_press(&mut self, key: char, shift: bool) -> Option<Twist> {
        let twist = keybinds::twist_for_key(key, shift, self.sim.size())?;
        self.sim
            .trigger_rotation(twist, DEFAULT_TWIST_SPEED)
            .then_some(twist)
    }

    /// Scrambles the cube with the number of twists set in the preferences.
    pub fn scramble(&mut self, prefs: &Preferences) {
        self.drag_state = self.drag_state.map(|_| DragState::Canceled);
        self.sim.scramble(prefs.interaction.scramble_length);
    }

    /// Steps the animation forward by the real time since the last frame.
    /// Returns whether the cube should be redrawn next frame.
    pub fn step(&mut self, prefs: &Preferences) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.step_by(delta, prefs);

        if needs_redraw {
            self.last_frame_time = Some(now);
        } else {
            self.last_frame_time = None;
        }

        needs_redraw
    }
    /// Steps the animation forward by `delta`. Returns whether the cube should
    /// be redrawn next frame.
    pub fn step_by(&mut self, delta: Duration, prefs: &Preferences) -> bool {
        self.sim.tick(delta, prefs.animation.base_speed())
    }

    /// Returns the transform of every cubie for drawing the current frame.
    pub fn frame(&self, prefs: &Preferences) -> Vec<CubieTransform> {
        let t = self
            .sim
            .animation_progress()
            .map(|p| prefs.animation.twist_interpolation.interpolate(p))
            .unwrap_or(0.0);
        self.sim.cubie_transforms(t)
    }
}

/// State of a pointer drag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DragState {
    /// Rotating the camera.
    ViewRot,
    /// Pressed on a cubie face. Once the user has dragged enough to determine
    /// a direction, the drag either twists or is canceled.
    PreTwist(DragSession),
    /// Drag canceled or already used; ignore drag inputs until the pointer is
    /// released.
    Canceled,
}
