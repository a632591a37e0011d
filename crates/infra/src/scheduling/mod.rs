//! Scheduling infrastructure for background detection
//!
//! The tracking controller owns the suspend/resume lifecycle:
//! - Explicit lifecycle management (start/stop)
//! - Cancellation token support for the resume timer
//! - Structured tracing on every transition

pub mod controller;

pub use controller::{StartOutcome, TrackingController};
