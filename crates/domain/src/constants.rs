//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! detection engine.

// Geodesy
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// Detection configuration
pub const PROXIMITY_RADIUS_KM: f64 = 10.0;
pub const RECENCY_WINDOW_SECS: u64 = 20 * 60;
pub const DETECTION_COOLDOWN_SECS: u64 = 20 * 60;
pub const NEARBY_DISPLAY_LIMIT: usize = 3;

// Notification jitter bounds (upper bound exclusive)
pub const NOTIFY_JITTER_MIN_SECS: u64 = 1;
pub const NOTIFY_JITTER_MAX_SECS: u64 = 10 * 60;

// Notification content
pub const NOTIFY_TITLE: &str = "Someone might be nearby!";
pub const NOTIFY_BODY: &str = "Someone recently shared a spot close to your usual area.";
