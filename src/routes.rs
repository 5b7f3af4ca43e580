use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::leaderboard::handlers::{get_leaderboard, get_leaderboard_large};
use crate::players::handlers::get_player_stats;
use crate::prizes::handlers::preview_prizes;
use crate::scores::handlers::submit_score;
use crate::shared::{AppError, AppState};

/// The complete HTTP surface, kept as data so tests can check the built
/// router against it
pub const ROUTES: &[(&str, &str)] = &[
    ("POST", "/api/scores"),
    ("GET", "/api/leaderboard"),
    ("GET", "/api/leaderboard/large"),
    ("GET", "/api/players/:player_id/stats"),
    ("GET", "/api/tournament/prizes"),
    ("GET", "/api/health"),
];

/// Builds the application router with tracing and open CORS
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/scores", post(submit_score))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/leaderboard/large", get(get_leaderboard_large))
        .route("/api/players/:player_id/stats", get(get_player_stats))
        .route("/api/tournament/prizes", get(preview_prizes))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe; reports whether the storage backend is reachable
#[instrument(name = "health", skip(state))]
async fn health(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.store.health_check().await?;
    Ok(Json(json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn health_reports_ok() {
        let app = router(AppStateBuilder::new().build());
        let request = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn every_declared_route_is_registered() {
        let state = AppStateBuilder::new().build();
        // Seed a player so the stats route answers with data, not 404
        state.players.apply_score("p1", 100).await.unwrap();

        for (method, path) in ROUTES {
            let app = router(state.clone());
            // Substitute a concrete value for path parameters
            let uri = path.replace(":player_id", "p1");
            let request = Request::builder()
                .method(*method)
                .uri(&uri)
                .header("content-type", "application/json")
                .body(Body::empty())
                .unwrap();

            let response = app.oneshot(request).await.unwrap();
            assert_ne!(
                response.status(),
                StatusCode::NOT_FOUND,
                "{} {} is not routed",
                method,
                path
            );
            assert_ne!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{} {} has the wrong method",
                method,
                path
            );
        }
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = router(AppStateBuilder::new().build());
        let request = Request::builder()
            .method("GET")
            .uri("/api/unknown")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
