pub mod handlers;
pub mod models;
pub mod replay;
pub mod repository;
pub mod service;
pub mod validator;

pub use models::{PlayMetrics, ScoreRecord, SubmitScoreRequest, SubmitScoreResponse};
pub use repository::ScoreRepository;
pub use service::ScoreService;
