//! Detection engine configuration
//!
//! Every knob the engine exposes lives here so tests and hosts can shorten
//! windows without touching the detection logic. Defaults come from
//! [`crate::constants`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DETECTION_COOLDOWN_SECS, NEARBY_DISPLAY_LIMIT, NOTIFY_JITTER_MAX_SECS, NOTIFY_JITTER_MIN_SECS,
    PROXIMITY_RADIUS_KM, RECENCY_WINDOW_SECS,
};

/// Configuration for the proximity detection engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Radius used both for the home check and the nearby-others check (km)
    pub proximity_radius_km: f64,
    /// How far back a shared record still counts as "recent"
    pub recency_window_secs: u64,
    /// How long detection stays suspended after a notification fires
    pub cooldown_secs: u64,
    /// Lower jitter bound for notification dispatch (inclusive)
    pub notify_jitter_min_secs: u64,
    /// Upper jitter bound for notification dispatch (exclusive)
    pub notify_jitter_max_secs: u64,
    /// Maximum number of matches returned in display mode
    pub nearby_display_limit: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            proximity_radius_km: PROXIMITY_RADIUS_KM,
            recency_window_secs: RECENCY_WINDOW_SECS,
            cooldown_secs: DETECTION_COOLDOWN_SECS,
            notify_jitter_min_secs: NOTIFY_JITTER_MIN_SECS,
            notify_jitter_max_secs: NOTIFY_JITTER_MAX_SECS,
            nearby_display_limit: NEARBY_DISPLAY_LIMIT,
        }
    }
}

impl DetectionConfig {
    /// Recency window as a chrono duration for timestamp arithmetic.
    pub fn recency_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.recency_window_secs as i64)
    }

    /// Cooldown as a std duration for timer arming.
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    /// Cooldown as a chrono duration for `resume_at` computation.
    pub fn cooldown_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cooldown_secs as i64)
    }
}
