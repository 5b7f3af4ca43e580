use serde::{Deserialize, Serialize};

/// Per-player aggregate statistics. Exactly one record per player; every
/// field mutates monotonically (counts grow, high score is a running max).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRecord {
    pub player_id: String,
    pub display_name: String,
    pub high_score: u64,
    pub games_played: u32,
    pub total_score: u64,
}

impl PlayerRecord {
    /// Fresh record for a first-time submitter, with a display name
    /// derived from the player id
    pub fn new(player_id: impl Into<String>) -> Self {
        let player_id = player_id.into();
        let display_name = default_display_name(&player_id);
        Self {
            player_id,
            display_name,
            high_score: 0,
            games_played: 0,
            total_score: 0,
        }
    }

    /// Folds one completed game into the aggregates
    pub fn apply_score(&mut self, score: u64) {
        self.games_played += 1;
        self.total_score += score;
        self.high_score = self.high_score.max(score);
    }
}

fn default_display_name(player_id: &str) -> String {
    let prefix: String = player_id.chars().take(8).collect();
    format!("Player {}", prefix)
}

/// Response structure for the player stats endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerStatsResponse {
    pub high_score: u64,
    pub games_played: u32,
    pub total_score: u64,
    pub avg_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_rank: Option<usize>,
}
