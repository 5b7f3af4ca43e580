use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::service::{LeaderboardService, DEFAULT_QUERY_CAP, LARGE_QUERY_CAP};
use super::types::{LeaderboardQuery, LeaderboardResponse};
use crate::shared::{AppError, AppState};

/// HTTP handler for the standard leaderboard view
///
/// GET /api/leaderboard?period={daily|weekly|all}&limit=..&game=..
/// Limit is capped at 100.
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let service = LeaderboardService::new(Arc::clone(&state.leaderboards));
    let response = service.query(query, DEFAULT_QUERY_CAP).await?;
    Ok(Json(response))
}

/// HTTP handler for the large leaderboard view, capped at 1000
///
/// GET /api/leaderboard/large?period=..&limit=..&game=..
#[instrument(name = "get_leaderboard_large", skip(state))]
pub async fn get_leaderboard_large(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let service = LeaderboardService::new(Arc::clone(&state.leaderboards));
    let response = service.query(query, LARGE_QUERY_CAP).await?;
    Ok(Json(response))
}
