use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::models::{SubmitScoreRequest, SubmitScoreResponse};
use super::service::ScoreService;
use crate::shared::{AppError, AppState};

/// HTTP handler for score submission
///
/// POST /api/scores
/// Returns {verified:true, score_id, rank, is_high_score} on acceptance,
/// {verified:false, reason} on rejection.
#[instrument(name = "submit_score", skip(state, request), fields(player_id = %request.player_id))]
pub async fn submit_score(
    State(state): State<AppState>,
    Json(request): Json<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    info!(score = request.score, game = %request.game, "Received score submission");

    let service = ScoreService::new(
        Arc::clone(&state.scores),
        Arc::clone(&state.players),
        Arc::clone(&state.leaderboards),
    );
    let response = service.submit(request).await?;

    info!(
        score_id = %response.score_id,
        rank = response.rank,
        "Score submission handled"
    );

    Ok(Json(response))
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
    use serde_json::Value;
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/api/scores", axum::routing::post(submit_score))
            .with_state(state)
    }

    async fn post(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/scores")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn valid_submission_is_verified() {
        let state = AppStateBuilder::new().build();
        let body = r#"{
            "score": 1000,
            "player_id": "p1",
            "metrics": {"apm": 120.0, "pps": 1.5, "gameTime": 60000}
        }"#;

        let (status, json) = post(app(state), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["verified"], true);
        assert_eq!(json["rank"], 1);
        assert_eq!(json["is_high_score"], true);
    }

    #[tokio::test]
    async fn implausible_apm_is_rejected_with_reason() {
        let state = AppStateBuilder::new().build();
        let body = r#"{
            "score": 1000,
            "player_id": "p1",
            "metrics": {"apm": 350.0, "pps": 1.5, "gameTime": 60000}
        }"#;

        let (status, json) = post(app(state.clone()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["verified"], false);
        let reason = json["reason"].as_str().unwrap();
        assert!(reason.starts_with("implausible_metrics"));
        assert!(reason.contains("apm"));

        // No player record was created for the rejected submission
        assert!(state.players.get("p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_submission_is_rejected() {
        let state = AppStateBuilder::new().build();
        let body = r#"{
            "score": 1000,
            "player_id": "p1",
            "replay_hash": "abc123",
            "metrics": {"apm": 120.0, "pps": 1.5, "gameTime": 60000}
        }"#;

        let (status, _) = post(app(state.clone()), body).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = post(app(state), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["verified"], false);
        assert_eq!(json["reason"], "duplicate_submission");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let state = AppStateBuilder::new().build();
        let request = Request::builder()
            .method("POST")
            .uri("/api/scores")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"score": "#))
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let state = AppStateBuilder::new().build();
        let request = Request::builder()
            .method("POST")
            .uri("/api/scores")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"score": 1000}"#))
            .unwrap();

        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
