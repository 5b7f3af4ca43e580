pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use models::{PlayerRecord, PlayerStatsResponse};
pub use repository::{PlayerRepository, ScoreApplied};
pub use service::PlayerStatsService;
