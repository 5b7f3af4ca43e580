// Library crate for the Neon Drop leaderboard service
// This file exposes the public API for integration tests

pub mod leaderboard;
pub mod players;
pub mod prizes;
pub mod routes;
pub mod scores;
pub mod shared;
pub mod storage;

// Re-export commonly used types for easier access in tests
pub use leaderboard::{
    start_cleanup_task, CleanupConfig, LeaderboardEntry, LeaderboardList, LeaderboardRepository,
    LeaderboardService, Period,
};
pub use players::{PlayerRecord, PlayerRepository, PlayerStatsService};
pub use prizes::{allocate, PrizeAllocation, PrizeService};
pub use routes::router;
pub use scores::{PlayMetrics, ScoreRecord, ScoreRepository, ScoreService};
pub use shared::{AppError, AppState};
pub use storage::{InMemoryKvStore, KvStore, PostgresKvStore};
