use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::models::{LeaderboardEntry, LeaderboardList, Period};
use crate::shared::AppError;
use crate::storage::{decode_json, encode_json, KvStore};

const KEY_PREFIX: &str = "leaderboard:";

/// Attempts before a contended list update is reported as a storage error.
/// Every submission for a game lands on the same list keys, so this bound
/// is generous.
const MAX_CAS_RETRIES: u32 = 32;

fn list_key(game: &str, period: Period) -> String {
    format!("{}{}:{}", KEY_PREFIX, game, period)
}

/// Storage access for ranked lists, one KV entry per (game, period).
///
/// Updates are compare-and-swap loops over the store's conditional put so
/// concurrent submissions into the same list cannot drop each other.
pub struct LeaderboardRepository {
    store: Arc<dyn KvStore>,
}

impl LeaderboardRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Fetches the list for (game, period); missing lists read as empty
    #[instrument(skip(self))]
    pub async fn get_list(&self, game: &str, period: Period) -> Result<LeaderboardList, AppError> {
        let key = list_key(game, period);
        match self.store.get(&key).await? {
            Some(entry) => decode_json(&key, &entry.value),
            None => Ok(LeaderboardList::new(game, period)),
        }
    }

    /// Inserts or replaces the player's entry, returning the updated list
    #[instrument(skip(self, entry), fields(player_id = %entry.player_id, score = entry.score))]
    pub async fn upsert_entry(
        &self,
        game: &str,
        period: Period,
        entry: LeaderboardEntry,
    ) -> Result<LeaderboardList, AppError> {
        let key = list_key(game, period);

        for attempt in 0..MAX_CAS_RETRIES {
            let current = self.store.get(&key).await?;
            let (mut list, expected_version) = match &current {
                Some(versioned) => (
                    decode_json::<LeaderboardList>(&key, &versioned.value)?,
                    Some(versioned.version),
                ),
                None => (LeaderboardList::new(game, period), None),
            };

            list.upsert(entry.clone());

            let encoded = encode_json(&key, &list)?;
            if self
                .store
                .conditional_put(&key, encoded, expected_version)
                .await?
            {
                debug!(key = %key, entries = list.entries.len(), "Leaderboard updated");
                return Ok(list);
            }

            warn!(key = %key, attempt, "Leaderboard update conflict, retrying");
        }

        Err(AppError::Storage(format!(
            "leaderboard update for {} exhausted {} retries",
            key, MAX_CAS_RETRIES
        )))
    }

    /// Prunes aged-out entries from every daily and weekly list, returning
    /// the total number of entries removed. All-time lists are untouched.
    #[instrument(skip(self))]
    pub async fn prune_expired(&self) -> Result<usize, AppError> {
        let keys = self.store.list_keys(KEY_PREFIX).await?;
        let mut removed_total = 0;

        for key in keys {
            let period = match key.rsplit_once(':').and_then(|(_, p)| Period::from_str(p).ok()) {
                Some(period) => period,
                None => {
                    warn!(key = %key, "Skipping unparseable leaderboard key");
                    continue;
                }
            };

            let window = match period.retention_window() {
                Some(window) => window,
                None => continue,
            };

            removed_total += self.prune_list(&key, window).await?;
        }

        Ok(removed_total)
    }

    async fn prune_list(&self, key: &str, window: chrono::Duration) -> Result<usize, AppError> {
        let cutoff = chrono::Utc::now() - window;

        for attempt in 0..MAX_CAS_RETRIES {
            let versioned = match self.store.get(key).await? {
                Some(v) => v,
                None => return Ok(0),
            };

            let mut list: LeaderboardList = decode_json(key, &versioned.value)?;
            let removed = list.prune_older_than(cutoff);
            if removed == 0 {
                return Ok(0);
            }

            let encoded = encode_json(key, &list)?;
            if self
                .store
                .conditional_put(key, encoded, Some(versioned.version))
                .await?
            {
                debug!(key = %key, removed, "Pruned stale leaderboard entries");
                return Ok(removed);
            }

            warn!(key = %key, attempt, "Prune conflict, retrying");
        }

        Err(AppError::Storage(format!(
            "prune of {} exhausted {} retries",
            key, MAX_CAS_RETRIES
        )))
    }
}
