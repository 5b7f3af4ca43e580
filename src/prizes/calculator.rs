use serde::{Deserialize, Serialize};

/// Share of revenue that funds the prize pool
pub const PRIZE_POOL_SHARE: f64 = 0.90;
/// Share of revenue retained by the platform
pub const PLATFORM_SHARE: f64 = 0.10;
/// First place always takes this share of the pool (outside the fallback)
pub const FIRST_PLACE_SHARE: f64 = 0.40;
/// Guaranteed floor for every paid position, in dollars
pub const MINIMUM_PRIZE: f64 = 5.00;
/// Number of paid positions
pub const PAID_POSITIONS: usize = 5;

/// Hyperbolic weights for positions 2-5: 1/(position index)
const MINOR_WEIGHTS: [f64; 4] = [1.0 / 2.0, 1.0 / 3.0, 1.0 / 4.0, 1.0 / 5.0];

/// Fixed percentage split used when the pool cannot cover the minimums
const FALLBACK_SPLIT: [f64; 5] = [0.40, 0.25, 0.20, 0.10, 0.05];

/// Payout breakdown for one tournament's revenue. Recomputed on demand
/// for previews; not authoritative state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeAllocation {
    pub total_revenue: f64,
    pub prize_pool: f64,
    pub platform_revenue: f64,
    /// Amounts for positions 1-5, in order
    pub prizes: Vec<f64>,
    /// False when the pool was too small to honor the $5 minimums and the
    /// fixed percentage split was applied instead
    pub minimum_guaranteed: bool,
}

/// Rounds to the nearest cent, half away from zero
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Splits a tournament's revenue into platform cut and five prize amounts.
///
/// First place takes 40% of the pool. Positions 2-5 each get the $5.00
/// minimum plus a hyperbolically weighted share of what remains; when the
/// pool cannot cover the minimums the whole pool falls back to a fixed
/// percentage split instead.
pub fn allocate(total_revenue: f64) -> PrizeAllocation {
    let prize_pool = round_cents(total_revenue * PRIZE_POOL_SHARE);
    let platform_revenue = round_cents(total_revenue * PLATFORM_SHARE);

    let first_place = round_cents(prize_pool * FIRST_PLACE_SHARE);
    let remaining_pool = prize_pool - first_place;
    let minimum_total = MINIMUM_PRIZE * MINOR_WEIGHTS.len() as f64;

    let (prizes, minimum_guaranteed) = if remaining_pool >= minimum_total {
        let excess = remaining_pool - minimum_total;
        let weight_sum: f64 = MINOR_WEIGHTS.iter().sum();

        let mut prizes = Vec::with_capacity(PAID_POSITIONS);
        prizes.push(first_place);
        for weight in MINOR_WEIGHTS {
            prizes.push(round_cents(MINIMUM_PRIZE + excess * weight / weight_sum));
        }
        (prizes, true)
    } else {
        let prizes = FALLBACK_SPLIT
            .iter()
            .map(|share| round_cents(prize_pool * share))
            .collect();
        (prizes, false)
    };

    // Per-position rounding can overshoot the pool by a few cents. Settle
    // the difference in cents, walking up from the last position, never
    // taking a position below the floor promised by the guaranteed path.
    // First place keeps its exact 40% share.
    let mut prize_cents: Vec<i64> = prizes.iter().map(|p| to_cents(*p)).collect();
    let mut overshoot = prize_cents.iter().sum::<i64>() - to_cents(prize_pool);
    if overshoot > 0 {
        let floor = if minimum_guaranteed {
            to_cents(MINIMUM_PRIZE)
        } else {
            0
        };
        for cents in prize_cents.iter_mut().skip(1).rev() {
            if overshoot == 0 {
                break;
            }
            let take = overshoot.min((*cents - floor).max(0));
            *cents -= take;
            overshoot -= take;
        }
    }
    let prizes: Vec<f64> = prize_cents.iter().map(|c| *c as f64 / 100.0).collect();

    PrizeAllocation {
        total_revenue,
        prize_pool,
        platform_revenue,
        prizes,
        minimum_guaranteed,
    }
}
