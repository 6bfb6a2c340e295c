//! Typed repository over key-value storage.
//!
//! Reads are fail-soft: a missing, unreadable, or malformed value is
//! treated as absent and logged at warn, never surfaced as a failure.
//! Writes return [`StoreError`] so callers can log and move on. State is
//! load-on-read and write-on-update; there is no teardown.

use tracing::{debug, info, instrument, warn};

use crate::store::error::StoreError;
use crate::store::records::HighscoreRecord;
use crate::store::storage::KvStorage;

/// Storage key for the unlock scalar.
const UNLOCK_KEY: &str = "unlocked_level";

fn highscore_key(level: u8) -> String {
    format!("highscore_{level}")
}

/// Progress and highscore repository: one highscore record per level plus
/// the highest unlocked level.
#[derive(Debug, Clone)]
pub struct ProgressStore<S> {
    storage: S,
}

impl<S: KvStorage> ProgressStore<S> {
    /// Creates a store over the given storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Best recorded result for a level, if any.
    ///
    /// Malformed or unreadable values are treated as absent.
    #[instrument(skip(self))]
    pub fn highscore(&self, level: u8) -> Option<HighscoreRecord> {
        let raw = match self.storage.get(&highscore_key(level)) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(level, %err, "Failed to read highscore; treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(level, %err, "Malformed highscore record; treating as absent");
                None
            }
        }
    }

    /// Submits a result for a level.
    ///
    /// Persists and returns `true` only on strict improvement under the
    /// level's scoring rule; an absent previous record always improves.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if an improved record cannot be written.
    #[instrument(skip(self, score))]
    pub fn submit_score(
        &self,
        level: u8,
        score: &HighscoreRecord,
        timer_enabled: bool,
    ) -> Result<bool, StoreError> {
        let previous = self.highscore(level);
        let is_best = match &previous {
            None => true,
            Some(prev) => score.beats(prev, timer_enabled),
        };
        if is_best {
            let encoded = serde_json::to_string(score)?;
            self.storage.set(&highscore_key(level), &encoded)?;
            info!(level, moves = *score.move_count(), "New highscore recorded");
        } else {
            debug!(level, "Result does not improve the stored highscore");
        }
        Ok(is_best)
    }

    /// Highest unlocked level id (0 = only the tutorial is available).
    ///
    /// Unreadable or garbage values fall back to 0.
    #[instrument(skip(self))]
    pub fn unlocked_level(&self) -> u8 {
        match self.storage.get(UNLOCK_KEY) {
            Ok(Some(raw)) => match raw.trim().parse() {
                Ok(level) => level,
                Err(_) => {
                    warn!(raw = %raw, "Malformed unlock level; defaulting to 0");
                    0
                }
            },
            Ok(None) => 0,
            Err(err) => {
                warn!(%err, "Failed to read unlock level; defaulting to 0");
                0
            }
        }
    }

    /// Raises the unlocked level.
    ///
    /// Monotonic: a value at or below the current one is a no-op, so
    /// progress never regresses.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the raised value cannot be written.
    #[instrument(skip(self))]
    pub fn set_unlocked_level(&self, level: u8) -> Result<(), StoreError> {
        let current = self.unlocked_level();
        if level <= current {
            debug!(level, current, "Unlock level unchanged");
            return Ok(());
        }
        self.storage.set(UNLOCK_KEY, &level.to_string())?;
        info!(level, "Unlock level raised");
        Ok(())
    }
}
