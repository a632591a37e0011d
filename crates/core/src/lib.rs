//! # Proxima Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The geodistance calculator
//! - Port/adapter interfaces (traits) for storage, position delivery,
//!   permissions, notifications, and identity
//! - The home location estimator, proximity scanner, notification scheduler,
//!   evaluation-cycle service, and record capture service
//!
//! ## Architecture Principles
//! - Only depends on `proxima-domain`
//! - No database or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod geo;
pub mod tracking;

// Re-export specific items to avoid ambiguity
pub use tracking::ports::{
    Identity, LocationRecordRepository, NotificationSender, PermissionSource, PositionSource,
};
pub use tracking::{
    CaptureService, CycleOutcome, DetectionService, HomeEstimator, NotificationScheduler,
    ProximityScanner,
};
