use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, instrument};

use super::repository::LeaderboardRepository;

/// Configuration for the retention cleanup task
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to sweep the leaderboard lists
    pub cleanup_interval: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(60 * 60), // hourly
        }
    }
}

/// Starts the background task that prunes daily entries older than 24h and
/// weekly entries older than 7d. All-time lists are never pruned by age.
#[instrument(skip(leaderboards))]
pub async fn start_cleanup_task(leaderboards: Arc<LeaderboardRepository>, config: CleanupConfig) {
    info!(
        cleanup_interval_secs = config.cleanup_interval.as_secs(),
        "Starting leaderboard retention cleanup task"
    );

    let mut cleanup_interval = interval(config.cleanup_interval);

    loop {
        cleanup_interval.tick().await;

        match leaderboards.prune_expired().await {
            Ok(removed) => {
                info!(removed, "Leaderboard retention cleanup completed");
            }
            Err(e) => {
                // A failed sweep is retried on the next tick
                error!(error = %e, "Leaderboard retention cleanup failed");
            }
        }
    }
}
