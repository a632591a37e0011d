//! Port interfaces for proximity detection
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use proxima_domain::{LocationRecord, Result, UserId};

/// Trait for reading and appending shared location records
#[async_trait]
pub trait LocationRecordRepository: Send + Sync {
    /// All records owned by the given user, in no guaranteed order
    async fn records_for_owner(&self, owner: &UserId) -> Result<Vec<LocationRecord>>;

    /// Records captured strictly after `cutoff`, newest first.
    ///
    /// The descending `captured_at` ordering is part of the contract:
    /// consumers truncate to a bounded count and must see the newest
    /// records first.
    async fn records_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<LocationRecord>>;

    /// Append a new record
    async fn insert_record(&self, record: LocationRecord) -> Result<()>;

    /// Delete records captured before the given instant, returning the count
    async fn delete_records_before(&self, before: DateTime<Utc>) -> Result<usize>;
}

/// Trait for the external source of device position updates
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Ask the source to start delivering position updates
    async fn request_start(&self) -> Result<()>;

    /// Ask the source to stop delivering position updates
    async fn request_stop(&self) -> Result<()>;

    /// Whether the source is currently delivering updates
    async fn has_active_subscription(&self) -> bool;
}

/// Trait for the external tracking-permission source
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Whether background tracking permission is currently granted
    async fn is_granted(&self) -> bool;

    /// Prompt the user for permission, returning the resulting grant state
    async fn request(&self) -> Result<bool>;
}

/// Trait for the external notification sender
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Schedule a notification for display after the given delay
    async fn schedule_after_delay(&self, delay: Duration, title: &str, body: &str) -> Result<()>;
}

/// Trait for resolving the current session's user
#[async_trait]
pub trait Identity: Send + Sync {
    /// The signed-in user, or `None` when there is no session
    async fn current_user_id(&self) -> Option<UserId>;
}
