//! Proximity detection engine
//!
//! The pieces of the background detection pipeline, leaves first: the home
//! location estimator, the proximity scanner, the notification scheduler,
//! the per-position-update evaluation service, and the record capture
//! service. The suspend/resume state machine that drives them lives in
//! `proxima-infra::scheduling`.

pub mod capture;
pub mod home;
pub mod notifier;
pub mod ports;
pub mod scanner;
pub mod service;

pub use capture::CaptureService;
pub use home::HomeEstimator;
pub use notifier::NotificationScheduler;
pub use scanner::ProximityScanner;
pub use service::{CycleOutcome, DetectionService};
