use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::models::Period;
use super::repository::LeaderboardRepository;
use super::types::{LeaderboardQuery, LeaderboardResponse, RankedScore};
use crate::shared::AppError;

/// Cap for the standard leaderboard endpoint
pub const DEFAULT_QUERY_CAP: usize = 100;
/// Cap for the large leaderboard endpoint
pub const LARGE_QUERY_CAP: usize = 1000;

/// Service for ranked, paginated leaderboard reads
pub struct LeaderboardService {
    repository: Arc<LeaderboardRepository>,
}

impl LeaderboardService {
    pub fn new(repository: Arc<LeaderboardRepository>) -> Self {
        Self { repository }
    }

    /// Returns the top entries for (game, period) with 1-based positional
    /// ranks. The limit is clamped to [1, cap]; an unseen period yields an
    /// empty list rather than an error.
    #[instrument(skip(self))]
    pub async fn query(
        &self,
        query: LeaderboardQuery,
        cap: usize,
    ) -> Result<LeaderboardResponse, AppError> {
        let limit = query.limit.unwrap_or(cap).clamp(1, cap);
        debug!(game = %query.game, period = %query.period, limit, "Querying leaderboard");

        let list = self.repository.get_list(&query.game, query.period).await?;
        let total_players = list.entries.len();

        let scores: Vec<RankedScore> = list
            .entries
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, entry)| RankedScore {
                rank: index + 1,
                player_id: entry.player_id.clone(),
                display_name: entry.display_name.clone(),
                score: entry.score,
                timestamp: entry.timestamp,
            })
            .collect();

        info!(
            game = %query.game,
            period = %query.period,
            returned = scores.len(),
            total_players,
            "Leaderboard query served"
        );

        Ok(LeaderboardResponse {
            period: query.period,
            game: query.game,
            scores,
            total_players,
            updated_at: chrono::Utc::now(),
        })
    }

    /// Rank of a score within (game, period): strictly-greater count + 1,
    /// recomputed against the current list on every call
    #[instrument(skip(self))]
    pub async fn rank_of(
        &self,
        game: &str,
        period: Period,
        score: u64,
    ) -> Result<usize, AppError> {
        let list = self.repository.get_list(game, period).await?;
        Ok(list.rank_of(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::models::LeaderboardEntry;
    use crate::storage::memory::InMemoryKvStore;
    use chrono::Utc;

    fn entry(player_id: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            player_id: player_id.to_string(),
            display_name: player_id.to_string(),
            score,
            timestamp: Utc::now(),
        }
    }

    fn query(period: Period, limit: Option<usize>) -> LeaderboardQuery {
        LeaderboardQuery {
            period,
            game: "neon-drop".to_string(),
            limit,
        }
    }

    async fn service_with_scores(scores: &[(&str, u64)]) -> LeaderboardService {
        let repo = Arc::new(LeaderboardRepository::new(Arc::new(InMemoryKvStore::new())));
        for (player, score) in scores {
            repo.upsert_entry("neon-drop", Period::Daily, entry(player, *score))
                .await
                .unwrap();
        }
        LeaderboardService::new(repo)
    }

    #[tokio::test]
    async fn empty_period_yields_empty_response() {
        let service = service_with_scores(&[]).await;
        let response = service
            .query(query(Period::Weekly, None), DEFAULT_QUERY_CAP)
            .await
            .unwrap();

        assert!(response.scores.is_empty());
        assert_eq!(response.total_players, 0);
    }

    #[tokio::test]
    async fn positional_ranks_are_one_based() {
        let service = service_with_scores(&[("p1", 100), ("p2", 300), ("p3", 200)]).await;
        let response = service
            .query(query(Period::Daily, None), DEFAULT_QUERY_CAP)
            .await
            .unwrap();

        let ranked: Vec<(usize, u64)> = response.scores.iter().map(|s| (s.rank, s.score)).collect();
        assert_eq!(ranked, vec![(1, 300), (2, 200), (3, 100)]);
        assert_eq!(response.total_players, 3);
    }

    #[tokio::test]
    async fn limit_is_clamped_to_cap() {
        let service = service_with_scores(&[("p1", 1), ("p2", 2), ("p3", 3)]).await;

        let response = service
            .query(query(Period::Daily, Some(2)), DEFAULT_QUERY_CAP)
            .await
            .unwrap();
        assert_eq!(response.scores.len(), 2);
        // total_players reflects the full list, not the page
        assert_eq!(response.total_players, 3);

        let response = service
            .query(query(Period::Daily, Some(50_000)), DEFAULT_QUERY_CAP)
            .await
            .unwrap();
        assert_eq!(response.scores.len(), 3);

        let response = service
            .query(query(Period::Daily, Some(0)), DEFAULT_QUERY_CAP)
            .await
            .unwrap();
        assert_eq!(response.scores.len(), 1);
    }

    #[tokio::test]
    async fn rank_of_top_score_is_one() {
        let service = service_with_scores(&[("p1", 500), ("p2", 100)]).await;
        assert_eq!(
            service.rank_of("neon-drop", Period::Daily, 500).await.unwrap(),
            1
        );
        assert_eq!(
            service.rank_of("neon-drop", Period::Daily, 100).await.unwrap(),
            2
        );
    }
}
