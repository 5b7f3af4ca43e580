use super::models::PlayMetrics;
use crate::shared::AppError;

/// Ceiling on actions per minute a human can plausibly sustain
pub const MAX_ACTIONS_PER_MINUTE: f64 = 300.0;
/// Ceiling on pieces placed per second
pub const MAX_PIECES_PER_SECOND: f64 = 3.5;
/// Tunable ceiling on points earnable per second of play
pub const MAX_SCORE_PER_SECOND: f64 = 150.0;

/// Rejects implausible score submissions from movement-rate metrics.
/// Pure and deterministic; performs no I/O.
pub fn validate(score: u64, metrics: &PlayMetrics) -> Result<(), AppError> {
    // NaN compares false against every ceiling, so non-finite rates are
    // rejected up front
    if !metrics.actions_per_minute.is_finite() || !metrics.pieces_per_second.is_finite() {
        return Err(AppError::ImplausibleMetrics(format!(
            "non-finite movement rates (apm {}, pps {})",
            metrics.actions_per_minute, metrics.pieces_per_second
        )));
    }

    if metrics.actions_per_minute > MAX_ACTIONS_PER_MINUTE {
        return Err(AppError::ImplausibleMetrics(format!(
            "apm {:.1} exceeds ceiling {:.0}",
            metrics.actions_per_minute, MAX_ACTIONS_PER_MINUTE
        )));
    }

    if metrics.pieces_per_second > MAX_PIECES_PER_SECOND {
        return Err(AppError::ImplausibleMetrics(format!(
            "pps {:.2} exceeds ceiling {:.1}",
            metrics.pieces_per_second, MAX_PIECES_PER_SECOND
        )));
    }

    let duration_secs = metrics.game_duration_ms as f64 / 1000.0;
    let max_score = duration_secs * MAX_SCORE_PER_SECOND;
    if score as f64 > max_score {
        return Err(AppError::ImpossibleScore(format!(
            "score {} exceeds maximum {:.0} for {:.1}s of play",
            score, max_score, duration_secs
        )));
    }

    Ok(())
}
