use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::leaderboard::repository::LeaderboardRepository;
use crate::players::repository::PlayerRepository;
use crate::scores::repository::ScoreRepository;
use crate::storage::KvStore;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub scores: Arc<ScoreRepository>,
    pub players: Arc<PlayerRepository>,
    pub leaderboards: Arc<LeaderboardRepository>,
}

impl AppState {
    /// Wires all repositories over a single injected key-value backend
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            scores: Arc::new(ScoreRepository::new(Arc::clone(&store))),
            players: Arc::new(PlayerRepository::new(Arc::clone(&store))),
            leaderboards: Arc::new(LeaderboardRepository::new(Arc::clone(&store))),
            store,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("implausible metrics: {0}")]
    ImplausibleMetrics(String),

    #[error("impossible score: {0}")]
    ImpossibleScore(String),

    #[error("duplicate submission")]
    DuplicateSubmission,

    #[error("insufficient participants: {actual} of {required} required")]
    InsufficientParticipants { required: u32, actual: u32 },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Score rejections use the submission body shape so clients only
        // ever see {verified:true, ...} or {verified:false, reason}.
        let (status, body) = match self {
            AppError::ImplausibleMetrics(reason) => (
                StatusCode::BAD_REQUEST,
                json!({ "verified": false, "reason": format!("implausible_metrics: {}", reason) }),
            ),
            AppError::ImpossibleScore(reason) => (
                StatusCode::BAD_REQUEST,
                json!({ "verified": false, "reason": format!("impossible_score: {}", reason) }),
            ),
            AppError::DuplicateSubmission => (
                StatusCode::BAD_REQUEST,
                json!({ "verified": false, "reason": "duplicate_submission" }),
            ),
            AppError::InsufficientParticipants { required, actual } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "insufficient_participants",
                    "required": required,
                    "actual": actual,
                }),
            ),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Storage(detail) => {
                // Never leak backend detail to the caller
                tracing::error!(error = %detail, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
