use neondrop_leaderboard::leaderboard::cleanup_task::{start_cleanup_task, CleanupConfig};
use neondrop_leaderboard::routes;
use neondrop_leaderboard::shared::AppState;
use neondrop_leaderboard::storage::{InMemoryKvStore, KvStore, PostgresKvStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neondrop_leaderboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Neon Drop leaderboard server");

    // Pick the storage backend: PostgreSQL when DATABASE_URL is set,
    // in-memory otherwise (development and tests)
    let store: Arc<dyn KvStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let store = PostgresKvStore::connect(&database_url)
                .await
                .expect("Failed to connect to database");
            Arc::new(store)
        }
        Err(_) => {
            info!("DATABASE_URL not set, using in-memory storage");
            Arc::new(InMemoryKvStore::new())
        }
    };

    let app_state = AppState::new(store);

    // Background retention cleanup for daily/weekly leaderboards
    tokio::spawn(start_cleanup_task(
        Arc::clone(&app_state.leaderboards),
        CleanupConfig::default(),
    ));

    let app = routes::router(app_state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}
