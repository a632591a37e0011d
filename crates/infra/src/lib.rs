//! # Proxima Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Database implementations (SQLite behind an r2d2 pool)
//! - The tracking controller state machine and its resume timer
//! - The session identity adapter
//!
//! ## Architecture
//! - Implements traits defined in `proxima-core`
//! - Depends on `proxima-domain` and `proxima-core`
//! - Contains all "impure" code (I/O, timers)

pub mod database;
pub mod errors;
pub mod identity;
pub mod scheduling;

// Re-export commonly used items
pub use database::{DbManager, SqliteLocationRecordRepository};
pub use errors::InfraError;
pub use identity::SessionIdentity;
pub use scheduling::{StartOutcome, TrackingController};
