use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Movement-rate metrics reported alongside a score submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayMetrics {
    #[serde(rename = "apm")]
    pub actions_per_minute: f64,
    #[serde(rename = "pps")]
    pub pieces_per_second: f64,
    #[serde(rename = "gameTime")]
    pub game_duration_ms: u64,
}

/// A validated score submission. Immutable once stored; dual-keyed by id
/// and replay hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRecord {
    pub id: String,
    pub player_id: String,
    pub score: u64,
    pub replay_hash: String,
    pub metrics: PlayMetrics,
    pub timestamp: DateTime<Utc>,
    pub verified: bool,
}

fn default_game() -> String {
    "neon-drop".to_string()
}

/// Request body for POST /api/scores
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitScoreRequest {
    pub score: u64,
    pub player_id: String,
    pub metrics: PlayMetrics,
    /// Derived server-side from the canonical payload when absent
    pub replay_hash: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default = "default_game")]
    pub game: String,
}

/// Response body for an accepted submission
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    pub verified: bool,
    pub score_id: String,
    pub rank: usize,
    pub is_high_score: bool,
}
