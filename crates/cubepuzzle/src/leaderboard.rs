use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one solve.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// Solve duration in seconds.
    pub time: f64,
    /// Move count at the moment the cube was solved.
    pub moves: u32,
    /// When the solve finished.
    pub date: DateTime<Utc>,
}

/// Best solves, sorted from fastest to slowest.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct Leaderboard(Vec<LeaderboardEntry>);
impl Leaderboard {
    /// Maximum number of entries kept.
    pub const MAX_ENTRIES: usize = 5;

    /// Constructs a leaderboard from entries in any order, keeping only the
    /// fastest ones.
    pub fn from_entries(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Self {
        let mut ret = Self(entries.into_iter().collect());
        ret.normalize();
        ret
    }

    /// Adds an entry and drops the slowest entries beyond
    /// [`Self::MAX_ENTRIES`]. Returns the rank of the new entry (starting at
    /// 0), or `None` if it did not make the cut.
    pub fn record(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        // Equal times keep insertion order, so the new entry goes after them.
        let rank = self.0.partition_point(|e| e.time <= entry.time);
        self.0.insert(rank, entry);
        self.normalize();
        (rank < Self::MAX_ENTRIES).then_some(rank)
    }

    /// Returns the entries, fastest first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.0
    }
    /// Returns the fastest entry.
    pub fn best(&self) -> Option<&LeaderboardEntry> {
        self.0.first()
    }
    /// Returns whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn normalize(&mut self) {
        self.0.sort_by(|a, b| a.time.total_cmp(&b.time));
        self.0.truncate(Self::MAX_ENTRIES);
    }
}
