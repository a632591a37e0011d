//! Record capture: the write path behind the "share my spot" flow.

use std::sync::Arc;

use chrono::Utc;
use proxima_domain::{LocationRecord, Position, ProximaError, Result};
use tracing::info;
use uuid::Uuid;

use super::ports::{Identity, LocationRecordRepository};

/// Appends a new shared record for the signed-in user.
pub struct CaptureService {
    identity: Arc<dyn Identity>,
    repository: Arc<dyn LocationRecordRepository>,
}

impl CaptureService {
    pub fn new(
        identity: Arc<dyn Identity>,
        repository: Arc<dyn LocationRecordRepository>,
    ) -> Self {
        Self { identity, repository }
    }

    /// Share the current position with a comment.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank comment, `Permission` when nobody is
    /// signed in, `Storage` when the append fails.
    pub async fn share(&self, position: Position, comment: &str) -> Result<LocationRecord> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ProximaError::InvalidInput("comment must not be empty".into()));
        }

        let owner = self
            .identity
            .current_user_id()
            .await
            .ok_or_else(|| ProximaError::Permission("no signed-in user".into()))?;

        let record = LocationRecord {
            id: Uuid::new_v4().to_string(),
            owner,
            position,
            comment: comment.to_string(),
            captured_at: Utc::now(),
        };

        self.repository.insert_record(record.clone()).await?;
        info!(record_id = %record.id, owner = %record.owner, "shared record captured");

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use proxima_domain::UserId;

    use super::*;

    #[derive(Default)]
    struct FakeRepo {
        inserted: Mutex<Vec<LocationRecord>>,
    }

    #[async_trait]
    impl LocationRecordRepository for FakeRepo {
        async fn records_for_owner(&self, _owner: &UserId) -> Result<Vec<LocationRecord>> {
            Ok(Vec::new())
        }

        async fn records_since(&self, _cutoff: DateTime<Utc>) -> Result<Vec<LocationRecord>> {
            Ok(Vec::new())
        }

        async fn insert_record(&self, record: LocationRecord) -> Result<()> {
            self.inserted.lock().expect("lock").push(record);
            Ok(())
        }

        async fn delete_records_before(&self, _before: DateTime<Utc>) -> Result<usize> {
            Ok(0)
        }
    }

    struct FakeIdentity {
        user: Option<UserId>,
    }

    #[async_trait]
    impl Identity for FakeIdentity {
        async fn current_user_id(&self) -> Option<UserId> {
            self.user.clone()
        }
    }

    #[tokio::test]
    async fn shares_a_record_for_the_current_user() {
        let repo = Arc::new(FakeRepo::default());
        let service = CaptureService::new(
            Arc::new(FakeIdentity { user: Some(UserId::from("alice")) }),
            repo.clone(),
        );

        let record =
            service.share(Position::new(35.0, 139.0), "  great coffee  ").await.expect("share");

        assert_eq!(record.owner, UserId::from("alice"));
        assert_eq!(record.comment, "great coffee");
        assert_eq!(repo.inserted.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let service = CaptureService::new(
            Arc::new(FakeIdentity { user: Some(UserId::from("alice")) }),
            Arc::new(FakeRepo::default()),
        );

        let err = service.share(Position::new(0.0, 0.0), "   ").await.expect_err("blank");
        assert!(matches!(err, ProximaError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn no_session_is_a_permission_error() {
        let service = CaptureService::new(
            Arc::new(FakeIdentity { user: None }),
            Arc::new(FakeRepo::default()),
        );

        let err = service.share(Position::new(0.0, 0.0), "hi").await.expect_err("no user");
        assert!(matches!(err, ProximaError::Permission(_)));
    }
}
