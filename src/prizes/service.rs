use tracing::{info, instrument};

use super::calculator::{allocate, PrizeAllocation, PAID_POSITIONS};
use crate::shared::AppError;

/// A tournament needs at least one entrant per paid position before a
/// payout can be previewed or allocated
pub const MIN_PARTICIPANTS: u32 = PAID_POSITIONS as u32;

/// Guards the prize calculator with tournament preconditions. The
/// calculator itself only ever sees a revenue figure.
pub struct PrizeService;

impl PrizeService {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self))]
    pub fn preview(
        &self,
        total_revenue: f64,
        participants: u32,
    ) -> Result<PrizeAllocation, AppError> {
        if !total_revenue.is_finite() || total_revenue < 0.0 {
            return Err(AppError::InvalidRequest(format!(
                "revenue must be a non-negative amount, got {}",
                total_revenue
            )));
        }

        if participants < MIN_PARTICIPANTS {
            return Err(AppError::InsufficientParticipants {
                required: MIN_PARTICIPANTS,
                actual: participants,
            });
        }

        let allocation = allocate(total_revenue);
        info!(
            total_revenue,
            prize_pool = allocation.prize_pool,
            minimum_guaranteed = allocation.minimum_guaranteed,
            "Prize allocation previewed"
        );

        Ok(allocation)
    }
}

impl Default for PrizeService {
    fn default() -> Self {
        Self::new()
    }
}
