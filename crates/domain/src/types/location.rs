//! Position and shared-record types
//!
//! A [`LocationRecord`] is created when a user shares a position together
//! with a comment. Records are immutable once written; the engine only ever
//! holds read references and never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque stable identifier for a user.
///
/// Assigned at registration, unique, never reused. Used to partition records
/// by owner; the engine never inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A geographic coordinate pair.
///
/// Latitude in `[-90, 90]`, longitude in `[-180, 180]`. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A shared position + comment, owned by storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub owner: UserId,
    pub position: Position,
    pub comment: String,
    pub captured_at: DateTime<Utc>,
}
