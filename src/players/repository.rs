use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::models::PlayerRecord;
use crate::shared::AppError;
use crate::storage::{decode_json, encode_json, KvStore};

const KEY_PREFIX: &str = "player:";

/// Bound on optimistic-concurrency retries before giving up. Contention is
/// per-player so conflicts are short bursts.
const MAX_CAS_RETRIES: u32 = 32;

fn player_key(player_id: &str) -> String {
    format!("{}{}", KEY_PREFIX, player_id)
}

/// Outcome of folding a score into a player's aggregates
#[derive(Debug, Clone)]
pub struct ScoreApplied {
    pub record: PlayerRecord,
    /// High score before this game, None for a first submission
    pub previous_high: Option<u64>,
}

/// Storage access for per-player aggregate records.
///
/// `apply_score` is a compare-and-swap loop: two submissions for the same
/// player racing on the record both re-read and retry instead of one
/// silently overwriting the other.
pub struct PlayerRepository {
    store: Arc<dyn KvStore>,
}

impl PlayerRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, player_id: &str) -> Result<Option<PlayerRecord>, AppError> {
        let key = player_key(player_id);
        match self.store.get(&key).await? {
            Some(entry) => Ok(Some(decode_json(&key, &entry.value)?)),
            None => Ok(None),
        }
    }

    /// Increments games played, accumulates the score and raises the high
    /// score, creating the record lazily on first submission
    #[instrument(skip(self))]
    pub async fn apply_score(
        &self,
        player_id: &str,
        score: u64,
    ) -> Result<ScoreApplied, AppError> {
        let key = player_key(player_id);

        for attempt in 0..MAX_CAS_RETRIES {
            let current = self.store.get(&key).await?;
            let (mut record, previous_high, expected_version) = match &current {
                Some(versioned) => {
                    let record: PlayerRecord = decode_json(&key, &versioned.value)?;
                    let high = record.high_score;
                    (record, Some(high), Some(versioned.version))
                }
                None => (PlayerRecord::new(player_id), None, None),
            };

            record.apply_score(score);

            let encoded = encode_json(&key, &record)?;
            if self
                .store
                .conditional_put(&key, encoded, expected_version)
                .await?
            {
                debug!(
                    player_id = %player_id,
                    games_played = record.games_played,
                    high_score = record.high_score,
                    "Player record updated"
                );
                return Ok(ScoreApplied {
                    record,
                    previous_high,
                });
            }

            warn!(player_id = %player_id, attempt, "Player record update conflict, retrying");
        }

        Err(AppError::Storage(format!(
            "player record update for {} exhausted {} retries",
            player_id, MAX_CAS_RETRIES
        )))
    }
}
