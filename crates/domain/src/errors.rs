//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Proxima
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ProximaError {
    /// Storage query or write failed. Aborts the current evaluation cycle
    /// only; the engine self-heals on the next position event.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Tracking or notification permission not granted. Non-fatal; the
    /// caller may prompt for permission and retry explicitly.
    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Proxima operations
pub type Result<T> = std::result::Result<T, ProximaError>;
