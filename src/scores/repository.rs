use std::sync::Arc;
use tracing::{debug, instrument};

use super::models::ScoreRecord;
use crate::shared::AppError;
use crate::storage::{decode_json, encode_json, KvStore};

fn id_key(id: &str) -> String {
    format!("score:{}", id)
}

fn replay_key(hash: &str) -> String {
    format!("replay:{}", hash)
}

/// Storage access for immutable score records, dual-keyed by id and by
/// replay hash so both duplicate detection and direct lookup are reads.
pub struct ScoreRepository {
    store: Arc<dyn KvStore>,
}

impl ScoreRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<ScoreRecord>, AppError> {
        let key = id_key(id);
        match self.store.get(&key).await? {
            Some(entry) => Ok(Some(decode_json(&key, &entry.value)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_replay_hash(
        &self,
        hash: &str,
    ) -> Result<Option<ScoreRecord>, AppError> {
        let key = replay_key(hash);
        match self.store.get(&key).await? {
            Some(entry) => Ok(Some(decode_json(&key, &entry.value)?)),
            None => Ok(None),
        }
    }

    /// Persists the record under both keys. The replay key is written
    /// insert-if-absent, so a racing resubmission of the same hash loses
    /// and surfaces as DuplicateSubmission.
    #[instrument(skip(self, record), fields(score_id = %record.id, player_id = %record.player_id))]
    pub async fn insert(&self, record: &ScoreRecord) -> Result<(), AppError> {
        let encoded = encode_json(&replay_key(&record.replay_hash), record)?;

        if !self
            .store
            .conditional_put(&replay_key(&record.replay_hash), encoded.clone(), None)
            .await?
        {
            debug!(replay_hash = %record.replay_hash, "Replay hash already claimed");
            return Err(AppError::DuplicateSubmission);
        }

        self.store.put(&id_key(&record.id), encoded).await?;
        Ok(())
    }

    /// Deletes the record under both keys, releasing its replay-hash claim
    /// so the session can be submitted again.
    #[instrument(skip(self, record), fields(score_id = %record.id))]
    pub async fn remove(&self, record: &ScoreRecord) -> Result<(), AppError> {
        self.store.delete(&replay_key(&record.replay_hash)).await?;
        self.store.delete(&id_key(&record.id)).await?;
        Ok(())
    }
}
