use std::fmt;

use crate::{GameStatus, LeaderboardEntry, Twist};

/// Change to a [`crate::CubeSimulation`] reported to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum CubeEvent {
    /// A twist began animating.
    TwistStarted(Twist),
    /// A twist finished animating and was applied to the cubies.
    TwistFinished(Twist),
    /// The game status changed.
    StatusChanged {
        /// Status before the change.
        old: GameStatus,
        /// Status after the change.
        new: GameStatus,
    },
    /// The cube was solved and the solve was recorded.
    Solved(LeaderboardEntry),
    /// The cube was reset and a scramble sequence was queued.
    Scrambled(Vec<Twist>),
    /// The cube was reset to the solved state.
    Reset,
}

/// Handle returned when subscribing to a [`crate::CubeSimulation`], used to
/// unsubscribe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(&CubeEvent)>;

/// List of callbacks, called in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    list: Vec<(ObserverId, Callback)>,
}
impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.list.len())
            .finish_non_exhaustive()
    }
}
impl Observers {
    pub fn add(&mut self, callback: Callback) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.list.push((id, callback));
        id
    }
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let len_before = self.list.len();
        self.list.retain(|(other, _)| *other != id);
        self.list.len() != len_before
    }
    pub fn notify(&mut self, event: &CubeEvent) {
        for (_, callback) in &mut self.list {
            callback(event);
        }
    }
}
