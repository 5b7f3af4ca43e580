use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::models::PlayerStatsResponse;
use super::repository::PlayerRepository;
use crate::leaderboard::models::Period;
use crate::leaderboard::repository::LeaderboardRepository;
use crate::shared::AppError;

/// Service exposing per-player aggregate statistics
pub struct PlayerStatsService {
    players: Arc<PlayerRepository>,
    leaderboards: Arc<LeaderboardRepository>,
}

impl PlayerStatsService {
    pub fn new(players: Arc<PlayerRepository>, leaderboards: Arc<LeaderboardRepository>) -> Self {
        Self {
            players,
            leaderboards,
        }
    }

    /// Aggregates plus the player's current all-time rank for the game.
    /// The rank is absent when the player has fallen off the capped list.
    #[instrument(skip(self))]
    pub async fn get_stats(
        &self,
        player_id: &str,
        game: &str,
    ) -> Result<PlayerStatsResponse, AppError> {
        let record = self
            .players
            .get(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {} not found", player_id)))?;

        let avg_score = if record.games_played > 0 {
            record.total_score as f64 / record.games_played as f64
        } else {
            0.0
        };

        let all_time = self.leaderboards.get_list(game, Period::AllTime).await?;
        let current_rank = all_time
            .entry_for(player_id)
            .map(|entry| all_time.rank_of(entry.score));

        debug!(player_id = %player_id, ?current_rank, "Computed current rank");
        info!(
            player_id = %player_id,
            games_played = record.games_played,
            high_score = record.high_score,
            "Player stats served"
        );

        Ok(PlayerStatsResponse {
            high_score: record.high_score,
            games_played: record.games_played,
            total_score: record.total_score,
            avg_score,
            current_rank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::models::LeaderboardEntry;
    use crate::storage::memory::InMemoryKvStore;
    use chrono::Utc;

    fn services() -> (Arc<PlayerRepository>, Arc<LeaderboardRepository>, PlayerStatsService) {
        let store: Arc<dyn crate::storage::KvStore> = Arc::new(InMemoryKvStore::new());
        let players = Arc::new(PlayerRepository::new(Arc::clone(&store)));
        let leaderboards = Arc::new(LeaderboardRepository::new(store));
        let service = PlayerStatsService::new(Arc::clone(&players), Arc::clone(&leaderboards));
        (players, leaderboards, service)
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let (_, _, service) = services();
        let result = service.get_stats("ghost", "neon-drop").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn stats_include_average_and_rank() {
        let (players, leaderboards, service) = services();
        players.apply_score("p1", 1000).await.unwrap();
        players.apply_score("p1", 500).await.unwrap();

        leaderboards
            .upsert_entry(
                "neon-drop",
                Period::AllTime,
                LeaderboardEntry {
                    player_id: "p2".to_string(),
                    display_name: "p2".to_string(),
                    score: 2000,
                    timestamp: Utc::now(),
                },
            )
            .await
            .unwrap();
        leaderboards
            .upsert_entry(
                "neon-drop",
                Period::AllTime,
                LeaderboardEntry {
                    player_id: "p1".to_string(),
                    display_name: "p1".to_string(),
                    score: 1000,
                    timestamp: Utc::now(),
                },
            )
            .await
            .unwrap();

        let stats = service.get_stats("p1", "neon-drop").await.unwrap();
        assert_eq!(stats.high_score, 1000);
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.total_score, 1500);
        assert!((stats.avg_score - 750.0).abs() < f64::EPSILON);
        assert_eq!(stats.current_rank, Some(2));
    }

    #[tokio::test]
    async fn rank_is_absent_when_player_not_on_list() {
        let (players, _, service) = services();
        players.apply_score("p1", 100).await.unwrap();

        let stats = service.get_stats("p1", "neon-drop").await.unwrap();
        assert_eq!(stats.current_rank, None);
    }
}
