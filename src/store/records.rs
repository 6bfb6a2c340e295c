//! Persisted record types.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Best result achieved on a level.
///
/// `elapsed_seconds` is absent for levels played without a timer. The JSON
/// field names are the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct HighscoreRecord {
    move_count: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    elapsed_seconds: Option<u32>,
}

impl HighscoreRecord {
    /// Whether this result strictly improves on `previous` under the
    /// level's scoring rule.
    ///
    /// With a timer, lower time wins and ties fall back to fewer moves.
    /// Without one, only a strictly lower move count improves. A record
    /// missing its time while the timer is enabled counts as absent data
    /// and is always beaten.
    pub fn beats(&self, previous: &HighscoreRecord, timer_enabled: bool) -> bool {
        if timer_enabled {
            let (Some(time), Some(prev_time)) =
                (self.elapsed_seconds, previous.elapsed_seconds)
            else {
                return true;
            };
            time < prev_time || (time == prev_time && self.move_count < previous.move_count)
        } else {
            self.move_count < previous.move_count
        }
    }
}
