//! Cube state store, which owns the cubies and sequences twists, scrambles,
//! and solves.

use std::collections::VecDeque;

use chrono::Utc;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::Display;
use web_time::{Duration, Instant};

mod animation;
mod events;

pub use animation::{CubieTransform, TwistAnimation};
pub use events::{CubeEvent, ObserverId};
use events::Observers;

use crate::{
    CubeSize, Cubie, DEFAULT_SCRAMBLE_SPEED, Leaderboard, LeaderboardEntry, Twist, init_cube,
};

/// Progress of the current solve attempt.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    /// The timer has not started.
    #[default]
    Idle,
    /// The player has made a move and the timer is running.
    Running,
    /// The cube was solved after the timer started.
    Solved,
}

/// Cube simulation, which manages the cubies, the twist animation, the
/// scramble queue, the solve timer, and the leaderboard.
///
/// At most one twist animates at a time. Twists requested while another twist
/// is animating are rejected, except for scrambles, which always reset the
/// cube.
#[derive(Debug)]
pub struct CubeSimulation {
    size: CubeSize,
    /// Committed cubie state, not including the twist in progress.
    cubies: Vec<Cubie>,

    /// Twist currently animating, if any.
    animation: Option<TwistAnimation>,
    /// Scramble twists that have not started yet.
    scramble_queue: VecDeque<Twist>,
    /// Full scramble sequence most recently requested.
    scramble: Vec<Twist>,
    /// Speed multiplier for scramble twists.
    scramble_speed: f32,

    /// Number of twists completed since the last reset, including scramble
    /// twists.
    move_count: u32,
    status: GameStatus,
    /// Whether a solve is in progress.
    is_solving: bool,
    /// Time that the first player twist started.
    start_time: Option<Instant>,
    /// Duration of the solve, once it has finished.
    solve_duration: Option<Duration>,

    leaderboard: Leaderboard,
    observers: Observers,
}
impl Default for CubeSimulation {
    fn default() -> Self {
        Self::new(CubeSize::default())
    }
}
impl CubeSimulation {
    /// Constructs a new simulation with a solved cube.
    pub fn new(size: CubeSize) -> Self {
        Self {
            size,
            cubies: init_cube(size),

            animation: None,
            scramble_queue: VecDeque::new(),
            scramble: vec![],
            scramble_speed: DEFAULT_SCRAMBLE_SPEED,

            move_count: 0,
            status: GameStatus::Idle,
            is_solving: false,
            start_time: None,
            solve_duration: None,

            leaderboard: Leaderboard::default(),
            observers: Observers::default(),
        }
    }

    /// Returns the size of the cube.
    pub fn size(&self) -> CubeSize {
        self.size
    }
    /// Returns the committed cubie state, not including the twist in progress.
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }
    /// Returns the twist currently animating, if any.
    pub fn animation(&self) -> Option<&TwistAnimation> {
        self.animation.as_ref()
    }
    /// Returns whether a twist is animating, in which case new twists are
    /// rejected.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
    /// Returns whether scramble twists are still being played back.
    pub fn is_scrambling(&self) -> bool {
        !self.scramble_queue.is_empty() || self.animation.is_some_and(|anim| anim.is_scramble)
    }
    /// Returns the scramble twists that have not started yet.
    pub fn scramble_queue(&self) -> &VecDeque<Twist> {
        &self.scramble_queue
    }
    /// Returns the most recent scramble sequence, which is empty if the cube
    /// has not been scrambled since the last reset.
    pub fn scramble_twists(&self) -> &[Twist] {
        &self.scramble
    }
    /// Returns the number of twists completed since the last reset or
    /// scramble, including scramble twists.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }
    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }
    /// Returns whether a solve is in progress.
    pub fn is_solving(&self) -> bool {
        self.is_solving
    }
    /// Returns the time spent on the current solve. This stops increasing
    /// once the cube is solved.
    pub fn elapsed(&self) -> Duration {
        match (self.solve_duration, self.start_time) {
            (Some(duration), _) => duration,
            (None, Some(start)) => start.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    /// Returns the leaderboard.
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }
    /// Replaces the leaderboard, such as with one loaded from disk.
    pub fn set_leaderboard(&mut self, leaderboard: Leaderboard) {
        self.leaderboard = leaderboard;
    }

    /// Returns the speed multiplier for scramble twists.
    pub fn scramble_speed(&self) -> f32 {
        self.scramble_speed
    }
    /// Sets the speed multiplier for scramble twists.
    pub fn set_scramble_speed(&mut self, speed: f32) {
        self.scramble_speed = sanitize_speed(speed);
    }

    /// Registers a callback to be called on every [`CubeEvent`].
    pub fn subscribe(&mut self, callback: impl FnMut(&CubeEvent) + 'static) -> ObserverId {
        self.observers.add(Box::new(callback))
    }
    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Requests a twist, which starts animating immediately.
    ///
    /// Returns `false` and changes nothing if another twist is animating or
    /// the layer does not exist on this cube. The first twist after a reset
    /// or a completed scramble starts the solve timer.
    pub fn trigger_rotation(&mut self, twist: Twist, speed: f32) -> bool {
        if let Some(anim) = &self.animation {
            log::trace!("rejecting twist {twist} while {} is animating", anim.twist);
            return false;
        }
        if !twist.is_valid_for(self.size) {
            log::trace!("rejecting twist {twist} on {} cube", self.size);
            return false;
        }

        if self.status == GameStatus::Idle && self.scramble_queue.is_empty() {
            self.start_time = Some(Instant::now());
            self.solve_duration = None;
            self.is_solving = true;
            self.set_status(GameStatus::Running);
        }

        self.start_animation(twist, sanitize_speed(speed), false);
        true
    }

    /// Applies the twist that is animating, checks whether the cube is
    /// solved, and starts the next scramble twist if there is one.
    ///
    /// Does nothing if no twist is animating.
    pub fn finish_rotation(&mut self) {
        let Some(anim) = self.animation.take() else {
            return;
        };
        let twist = anim.twist;

        for cubie in &mut self.cubies {
            if cubie.is_affected_by(twist) {
                *cubie = cubie.twisted(twist);
            }
        }
        self.move_count += 1;
        self.observers.notify(&CubeEvent::TwistFinished(twist));

        let solved = self.scramble_queue.is_empty()
            && self.status == GameStatus::Running
            && self.is_solved();
        if solved {
            self.record_solve();
        }

        if let Some(next) = self.scramble_queue.pop_front() {
            self.start_animation(next, self.scramble_speed, true);
        } else if anim.is_scramble {
            log::debug!("scramble finished after {} twists", self.move_count);
        }
    }

    /// Applies all remaining animations immediately, including the rest of
    /// the scramble queue.
    pub fn catch_up(&mut self) {
        while self.animation.is_some() {
            self.finish_rotation();
        }
    }

    /// Resets the cube and scrambles it with `count` random twists.
    pub fn scramble(&mut self, count: usize) {
        self.scramble_with_rng(count, &mut rand::rng());
    }
    /// Resets the cube and scrambles it with `count` random twists generated
    /// deterministically from `seed`.
    pub fn scramble_with_seed(&mut self, count: usize, seed: u64) {
        self.scramble_with_rng(count, &mut rand_chacha::ChaCha12Rng::seed_from_u64(seed));
    }
    /// Resets the cube and scrambles it with `count` random twists generated
    /// using `rng`.
    pub fn scramble_with_rng(&mut self, count: usize, rng: &mut impl Rng) {
        let twists = (0..count).map(|_| Twist::from_rng(self.size, rng)).collect();
        self.scramble_with_twists(twists);
    }
    /// Resets the cube and plays back a specific scramble sequence.
    ///
    /// Scramble twists are animated one after another at the scramble speed
    /// and do not start the timer or count toward a solve. Any twist that is
    /// currently animating is discarded.
    pub fn scramble_with_twists(&mut self, twists: Vec<Twist>) {
        if let Some(anim) = &self.animation {
            log::debug!("scramble interrupts twist {}", anim.twist);
        }
        let size = self.size;
        let twists: Vec<Twist> = twists
            .into_iter()
            .filter(|twist| {
                let is_valid = twist.is_valid_for(size);
                if !is_valid {
                    log::warn!("skipping scramble twist {twist} on {size} cube");
                }
                is_valid
            })
            .collect();

        self.reset_state();
        self.scramble = twists.clone();
        self.scramble_queue = twists.iter().copied().collect();
        self.observers.notify(&CubeEvent::Scrambled(twists));

        if let Some(first) = self.scramble_queue.pop_front() {
            self.start_animation(first, self.scramble_speed, true);
        }
    }

    /// Resets the cube to the solved state. The leaderboard is kept.
    pub fn reset_game(&mut self) {
        if let Some(anim) = &self.animation {
            log::debug!("reset interrupts twist {}", anim.twist);
        }
        self.reset_state();
        self.observers.notify(&CubeEvent::Reset);
    }

    /// Returns whether every cubie is in its original position and
    /// orientation, regardless of game status.
    pub fn is_solved(&self) -> bool {
        self.cubies.iter().all(Cubie::is_home)
    }

    fn reset_state(&mut self) {
        self.cubies = init_cube(self.size);
        self.animation = None;
        self.scramble_queue.clear();
        self.scramble.clear();
        self.move_count = 0;
        self.is_solving = false;
        self.start_time = None;
        self.solve_duration = None;
        self.set_status(GameStatus::Idle);
    }

    fn start_animation(&mut self, twist: Twist, speed: f32, is_scramble: bool) {
        self.animation = Some(TwistAnimation {
            twist,
            speed,
            progress: 0.0,
            is_scramble,
        });
        self.observers.notify(&CubeEvent::TwistStarted(twist));
    }

    fn record_solve(&mut self) {
        let duration = self.elapsed();
        self.solve_duration = Some(duration);
        self.is_solving = false;

        let entry = LeaderboardEntry {
            time: duration.as_secs_f64(),
            moves: self.move_count,
            date: Utc::now(),
        };
        log::info!("solved in {:.3}s with {} moves", entry.time, entry.moves);
        match self.leaderboard.record(entry.clone()) {
            Some(rank) => log::debug!("new leaderboard entry at rank {}", rank + 1),
            None => log::debug!("solve did not make the leaderboard"),
        }

        self.set_status(GameStatus::Solved);
        self.observers.notify(&CubeEvent::Solved(entry));
    }

    fn set_status(&mut self, new: GameStatus) {
        let old = std::mem::replace(&mut self.status, new);
        if old != new {
            log::debug!("game status changed from {old} to {new}");
            self.observers.notify(&CubeEvent::StatusChanged { old, new });
        }
    }
}

fn sanitize_speed(speed: f32) -> f32 {
    if speed > 0.0 && speed.is_finite() {
        speed
    } else {
        log::warn!("invalid twist speed {speed}; using 1");
        1.0
    }
}
