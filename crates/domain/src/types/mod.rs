//! Domain types and models

pub mod location;
pub mod tracking;

pub use location::{LocationRecord, Position, UserId};
pub use tracking::{HomeEstimate, ProximityMatch, TrackingState};
