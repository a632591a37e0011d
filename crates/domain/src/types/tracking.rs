//! Derived detection types and the tracking state machine states

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::{LocationRecord, Position, UserId};

/// A user's derived habitual position.
///
/// Arithmetic mean of latitude and longitude across all of the owner's
/// records, computed independently per axis. This is an approximation that
/// holds at city/region scale and is not valid near the antimeridian or the
/// poles; the limitation is accepted, not corrected. Recomputed on demand,
/// never persisted.
///
/// Invariant: `sample_count == 0` ⇔ `position.is_none()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeEstimate {
    pub owner: UserId,
    pub position: Option<Position>,
    pub sample_count: usize,
}

impl HomeEstimate {
    /// An estimate for a user with no records yet.
    pub fn empty(owner: UserId) -> Self {
        Self { owner, position: None, sample_count: 0 }
    }
}

/// A record found within the configured radius of a reference position.
///
/// Produced transiently by the proximity scanner; `distance_km` is always
/// within the radius the scan was run with. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityMatch {
    pub reference: Position,
    pub record: LocationRecord,
    pub distance_km: f64,
}

/// Tracking controller state, one instance per running session.
///
/// `Suspended` carries the instant detection resumes; the timestamp is only
/// meaningful in that state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrackingState {
    Stopped,
    Active,
    Suspended { resume_at: DateTime<Utc> },
}

impl TrackingState {
    pub fn is_active(&self) -> bool {
        matches!(self, TrackingState::Active)
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, TrackingState::Suspended { .. })
    }
}
