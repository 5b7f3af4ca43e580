use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Maximum entries retained per leaderboard list
pub const MAX_ENTRIES: usize = 1000;

/// Leaderboard time window. Each period has independent retention rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Period {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "all")]
    #[strum(serialize = "all")]
    AllTime,
}

impl Period {
    /// All periods a qualifying score fans out to
    pub const ALL: [Period; 3] = [Period::Daily, Period::Weekly, Period::AllTime];

    /// Age past which entries are pruned, None for all-time
    pub fn retention_window(&self) -> Option<Duration> {
        match self {
            Period::Daily => Some(Duration::hours(24)),
            Period::Weekly => Some(Duration::days(7)),
            Period::AllTime => None,
        }
    }
}

/// Denormalized entry inside a ranked list: one per player per (game, period)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub display_name: String,
    pub score: u64,
    pub timestamp: DateTime<Utc>,
}

/// A ranked score list for one (game, period), sorted descending by score
/// and capped at MAX_ENTRIES.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardList {
    pub game: String,
    pub period: Period,
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardList {
    pub fn new(game: impl Into<String>, period: Period) -> Self {
        Self {
            game: game.into(),
            period,
            entries: Vec::new(),
        }
    }

    /// Replaces any prior entry for the player, re-sorts descending and
    /// truncates to the cap. Sorting is stable so equal scores keep their
    /// insertion order.
    pub fn upsert(&mut self, entry: LeaderboardEntry) {
        self.entries.retain(|e| e.player_id != entry.player_id);
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Rank = count of strictly greater scores + 1, so ties share a rank
    pub fn rank_of(&self, score: u64) -> usize {
        self.entries.iter().filter(|e| e.score > score).count() + 1
    }

    pub fn entry_for(&self, player_id: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.player_id == player_id)
    }

    /// Drops entries older than the cutoff, returning how many were removed
    pub fn prune_older_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.timestamp >= cutoff);
        before - self.entries.len()
    }
}
