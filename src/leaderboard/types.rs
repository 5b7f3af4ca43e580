use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::Period;

fn default_game() -> String {
    "neon-drop".to_string()
}

fn default_period() -> Period {
    Period::Daily
}

/// Query parameters for the leaderboard endpoints
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default = "default_period")]
    pub period: Period,
    #[serde(default = "default_game")]
    pub game: String,
    pub limit: Option<usize>,
}

/// One ranked row in a leaderboard response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RankedScore {
    pub rank: usize,
    pub player_id: String,
    pub display_name: String,
    pub score: u64,
    pub timestamp: DateTime<Utc>,
}

/// Response structure for the leaderboard endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub period: Period,
    pub game: String,
    pub scores: Vec<RankedScore>,
    pub total_players: usize,
    pub updated_at: DateTime<Utc>,
}
