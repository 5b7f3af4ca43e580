use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use super::models::PlayerStatsResponse;
use super::service::PlayerStatsService;
use crate::shared::{AppError, AppState};

fn default_game() -> String {
    "neon-drop".to_string()
}

#[derive(Debug, Deserialize)]
pub struct PlayerStatsQuery {
    #[serde(default = "default_game")]
    pub game: String,
}

/// HTTP handler for per-player aggregate statistics
///
/// GET /api/players/{player_id}/stats
/// Returns high score, games played, totals and current all-time rank.
#[instrument(name = "get_player_stats", skip(state))]
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(query): Query<PlayerStatsQuery>,
) -> Result<Json<PlayerStatsResponse>, AppError> {
    let service = PlayerStatsService::new(
        Arc::clone(&state.players),
        Arc::clone(&state.leaderboards),
    );
    let stats = service.get_stats(&player_id, &query.game).await?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route(
                "/api/players/:player_id/stats",
                axum::routing::get(get_player_stats),
            )
            .with_state(state)
    }

    #[tokio::test]
    async fn unknown_player_returns_404() {
        let state = AppStateBuilder::new().build();
        let request = Request::builder()
            .method("GET")
            .uri("/api/players/ghost/stats")
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stats_round_trip_through_http() {
        let state = AppStateBuilder::new().build();
        state.players.apply_score("p1", 800).await.unwrap();
        state.players.apply_score("p1", 200).await.unwrap();

        let request = Request::builder()
            .method("GET")
            .uri("/api/players/p1/stats")
            .body(Body::empty())
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let stats: PlayerStatsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(stats.high_score, 800);
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.total_score, 1000);
        assert!((stats.avg_score - 500.0).abs() < f64::EPSILON);
    }
}
