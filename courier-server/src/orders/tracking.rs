//! Tracking ID Generation
//!
//! Public tracking IDs look like `BDX20250806-7K2Q`: a fixed prefix, the UTC
//! creation date and four random uppercase base36 characters. The random tail
//! keeps IDs human-readable while staying probabilistically unique; the
//! store's unique index settles any remaining race at write time.

use chrono::Utc;
use rand::Rng;
use thiserror::Error;

use crate::db::repository::{OrderRepository, RepoError};

/// Fixed brand prefix
const PREFIX: &str = "BDX";

/// Random tail alphabet (uppercase base36)
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random tail length
const SUFFIX_LEN: usize = 4;

/// Candidate attempts before giving up
const MAX_ATTEMPTS: usize = 10;

#[derive(Debug, Error)]
pub enum TrackingIdError {
    /// Every candidate collided with an existing order
    #[error("tracking ID generation exhausted after {0} attempts")]
    Exhausted(usize),

    #[error("store lookup failed: {0}")]
    Store(#[from] RepoError),
}

/// Tracking ID generator with a bounded collision-retry loop
#[derive(Debug, Clone, Default)]
pub struct TrackingIdGenerator;

impl TrackingIdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// One candidate: `BDX<yyyymmdd>-<4 random chars>`
    fn candidate(&self) -> String {
        let date = Utc::now().format("%Y%m%d");
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        format!("{PREFIX}{date}-{suffix}")
    }

    /// Allocate an unused tracking ID, retrying on collision.
    ///
    /// Bounded search: ten draws over the 36^4 tail space keep the collision
    /// odds negligible while bounding worst-case latency. Exhaustion is a
    /// dedicated error instead of an endless loop.
    pub async fn generate(&self, orders: &OrderRepository) -> Result<String, TrackingIdError> {
        for _ in 0..MAX_ATTEMPTS {
            let candidate = self.candidate();
            if !orders.tracking_id_exists(&candidate).await? {
                return Ok(candidate);
            }
            tracing::debug!(candidate = %candidate, "Tracking ID collision, retrying");
        }
        Err(TrackingIdError::Exhausted(MAX_ATTEMPTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_has_the_documented_format() {
        let id = TrackingIdGenerator::new().candidate();

        assert_eq!(id.len(), PREFIX.len() + 8 + 1 + SUFFIX_LEN);
        assert!(id.starts_with(PREFIX));

        let (date_part, suffix) = id[PREFIX.len()..].split_once('-').expect("separator");
        assert_eq!(date_part.len(), 8);
        assert!(date_part.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn candidate_date_is_today_utc() {
        let id = TrackingIdGenerator::new().candidate();
        let today = Utc::now().format("%Y%m%d").to_string();
        assert!(id.starts_with(&format!("{PREFIX}{today}")));
    }

    #[test]
    fn candidates_vary() {
        let generator = TrackingIdGenerator::new();
        let drawn: std::collections::HashSet<String> =
            (0..64).map(|_| generator.candidate()).collect();
        assert!(drawn.len() > 1, "random tail should vary");
    }
}
