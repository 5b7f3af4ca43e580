use sha2::{Digest, Sha256};

use super::models::PlayMetrics;

/// Derives the anti-replay hash for a submission: SHA-256 over the
/// canonical payload fields. Collision resistance is what makes the
/// once-accepted-never-again guarantee hold.
pub fn hash_submission(player_id: &str, score: u64, metrics: &PlayMetrics) -> String {
    let canonical = format!(
        "{}|{}|{}|{}|{}",
        player_id,
        score,
        metrics.actions_per_minute,
        metrics.pieces_per_second,
        metrics.game_duration_ms
    );

    let digest = Sha256::digest(canonical.as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> PlayMetrics {
        PlayMetrics {
            actions_per_minute: 120.0,
            pieces_per_second: 1.5,
            game_duration_ms: 60_000,
        }
    }

    #[test]
    fn same_payload_hashes_identically() {
        let a = hash_submission("p1", 1000, &metrics());
        let b = hash_submission("p1", 1000, &metrics());
        assert_eq!(a, b);
    }

    #[test]
    fn different_payloads_hash_differently() {
        let base = hash_submission("p1", 1000, &metrics());
        assert_ne!(base, hash_submission("p2", 1000, &metrics()));
        assert_ne!(base, hash_submission("p1", 1001, &metrics()));

        let mut longer = metrics();
        longer.game_duration_ms += 1;
        assert_ne!(base, hash_submission("p1", 1000, &longer));
    }

    #[test]
    fn hash_is_hex_encoded_sha256() {
        let hash = hash_submission("p1", 1000, &metrics());
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
