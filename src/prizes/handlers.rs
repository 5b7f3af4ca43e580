use axum::{extract::Query, Json};
use serde::Deserialize;
use tracing::instrument;

use super::calculator::PrizeAllocation;
use super::service::PrizeService;
use crate::shared::AppError;

#[derive(Debug, Deserialize)]
pub struct PrizePreviewQuery {
    pub revenue: f64,
    pub participants: u32,
}

/// HTTP handler for previewing a tournament payout
///
/// GET /api/tournament/prizes?revenue=..&participants=..
/// Off the submission hot path; allocations are recomputed per request.
#[instrument(name = "preview_prizes")]
pub async fn preview_prizes(
    Query(query): Query<PrizePreviewQuery>,
) -> Result<Json<PrizeAllocation>, AppError> {
    let service = PrizeService::new();
    let allocation = service.preview(query.revenue, query.participants)?;
    Ok(Json(allocation))
}
