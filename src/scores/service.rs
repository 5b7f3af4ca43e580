use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::models::{ScoreRecord, SubmitScoreRequest, SubmitScoreResponse};
use super::repository::ScoreRepository;
use super::{replay, validator};
use crate::leaderboard::models::{LeaderboardEntry, Period};
use crate::leaderboard::repository::LeaderboardRepository;
use crate::players::models::PlayerRecord;
use crate::players::repository::PlayerRepository;
use crate::shared::AppError;

/// Attempts per post-claim write before the submission is abandoned
const STEP_RETRIES: u32 = 3;

/// Orchestrates a score submission: validation, anti-replay, persistence,
/// player aggregates, leaderboard fan-out and the rank response.
pub struct ScoreService {
    scores: Arc<ScoreRepository>,
    players: Arc<PlayerRepository>,
    leaderboards: Arc<LeaderboardRepository>,
}

impl ScoreService {
    pub fn new(
        scores: Arc<ScoreRepository>,
        players: Arc<PlayerRepository>,
        leaderboards: Arc<LeaderboardRepository>,
    ) -> Self {
        Self {
            scores,
            players,
            leaderboards,
        }
    }

    /// Processes one submission end to end. Validation and duplicate
    /// detection run before any write. The replay-hash claim is the only
    /// non-repeatable write; every later step is idempotent and retried,
    /// and the claim is released if the step-set still cannot complete,
    /// so a failed submission stays resubmittable and the caller never
    /// sees `verified: true` for a partial update.
    #[instrument(skip(self, request), fields(player_id = %request.player_id, score = request.score))]
    pub async fn submit(
        &self,
        request: SubmitScoreRequest,
    ) -> Result<SubmitScoreResponse, AppError> {
        validator::validate(request.score, &request.metrics)?;

        let replay_hash = request.replay_hash.clone().unwrap_or_else(|| {
            replay::hash_submission(&request.player_id, request.score, &request.metrics)
        });

        // Anti-replay check must precede every mutation
        if self
            .scores
            .find_by_replay_hash(&replay_hash)
            .await?
            .is_some()
        {
            info!(replay_hash = %replay_hash, "Rejecting duplicate submission");
            return Err(AppError::DuplicateSubmission);
        }

        let record = ScoreRecord {
            id: generate_score_id(),
            player_id: request.player_id.clone(),
            score: request.score,
            replay_hash,
            metrics: request.metrics.clone(),
            timestamp: request.timestamp.unwrap_or_else(Utc::now),
            verified: true,
        };
        self.scores.insert(&record).await?;
        debug!(score_id = %record.id, "Score record persisted");

        match self.apply_submission(&request, &record).await {
            Ok(response) => Ok(response),
            Err(e) => {
                // Release the claim so the session can be resubmitted once
                // storage recovers; the remaining steps all reapply cleanly
                match self.scores.remove(&record).await {
                    Ok(()) => {
                        info!(score_id = %record.id, "Released replay claim after failed submission")
                    }
                    Err(release_err) => {
                        error!(
                            score_id = %record.id,
                            error = %release_err,
                            "Failed to release replay claim"
                        )
                    }
                }
                Err(e)
            }
        }
    }

    /// The post-claim step-set: leaderboard fan-out first (upserts reapply
    /// without double-counting), the player aggregate write last so an
    /// abandoned submission has never credited the player.
    async fn apply_submission(
        &self,
        request: &SubmitScoreRequest,
        record: &ScoreRecord,
    ) -> Result<SubmitScoreResponse, AppError> {
        let display_name = match self.players.get(&request.player_id).await? {
            Some(existing) => existing.display_name,
            None => PlayerRecord::new(request.player_id.clone()).display_name,
        };

        let entry = LeaderboardEntry {
            player_id: request.player_id.clone(),
            display_name,
            score: request.score,
            timestamp: record.timestamp,
        };

        // Fan out to every period list; the daily list doubles as the
        // rank source for the response
        let mut daily_list = None;
        for period in Period::ALL {
            let list = retry_step("leaderboard_upsert", || {
                self.leaderboards
                    .upsert_entry(&request.game, period, entry.clone())
            })
            .await?;
            if period == Period::Daily {
                daily_list = Some(list);
            }
        }

        let applied = retry_step("player_aggregates", || {
            self.players.apply_score(&request.player_id, request.score)
        })
        .await?;
        let is_high_score = applied
            .previous_high
            .map_or(true, |high| request.score > high);

        let rank = daily_list
            .map(|list| list.rank_of(request.score))
            .unwrap_or(1);

        info!(
            score_id = %record.id,
            rank,
            is_high_score,
            "Score submission accepted"
        );

        Ok(SubmitScoreResponse {
            verified: true,
            score_id: record.id.clone(),
            rank,
            is_high_score,
        })
    }
}

/// Retries a storage-failed write a bounded number of times; every other
/// error is terminal
async fn retry_step<T, F, Fut>(step: &'static str, mut op: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut last_error = AppError::Internal;
    for attempt in 0..STEP_RETRIES {
        match op().await {
            Ok(value) => return Ok(value),
            Err(AppError::Storage(detail)) => {
                warn!(step, attempt, error = %detail, "Submission step failed");
                last_error = AppError::Storage(detail);
            }
            Err(other) => return Err(other),
        }
    }
    Err(last_error)
}

/// Time-based id with a random suffix, e.g. "1700000000000-9f3a2b1c"
fn generate_score_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
}
