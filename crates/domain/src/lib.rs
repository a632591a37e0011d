//! # Proxima Domain
//!
//! Business domain types and models for Proxima.
//!
//! This crate contains:
//! - Domain data types (Position, LocationRecord, TrackingState, etc.)
//! - Domain error types and Result definitions
//! - Detection configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Proxima crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
