pub mod cleanup_task;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub use cleanup_task::{start_cleanup_task, CleanupConfig};
pub use models::{LeaderboardEntry, LeaderboardList, Period, MAX_ENTRIES};
pub use repository::LeaderboardRepository;
pub use service::{LeaderboardService, DEFAULT_QUERY_CAP, LARGE_QUERY_CAP};
pub use types::{LeaderboardQuery, LeaderboardResponse, RankedScore};
