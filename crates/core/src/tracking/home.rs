//! Home location estimation from a user's own shared records.

use std::sync::Arc;

use proxima_domain::{HomeEstimate, Position, Result, UserId};
use tracing::debug;

use super::ports::LocationRecordRepository;

/// Computes a user's habitual position from their record history.
pub struct HomeEstimator {
    repository: Arc<dyn LocationRecordRepository>,
}

impl HomeEstimator {
    pub fn new(repository: Arc<dyn LocationRecordRepository>) -> Self {
        Self { repository }
    }

    /// Estimate the owner's home position.
    ///
    /// Queries only records owned by `owner` and averages latitude and
    /// longitude independently. An empty history yields `sample_count == 0`
    /// with no position, which is a valid outcome and distinct from a
    /// storage failure.
    ///
    /// # Errors
    ///
    /// Returns [`proxima_domain::ProximaError::Storage`] when the query
    /// fails; callers must not treat that as "no data".
    pub async fn estimate_home(&self, owner: &UserId) -> Result<HomeEstimate> {
        let records = self.repository.records_for_owner(owner).await?;

        if records.is_empty() {
            debug!(owner = %owner, "no records for owner, home estimate absent");
            return Ok(HomeEstimate::empty(owner.clone()));
        }

        let count = records.len();
        let (lat_sum, lon_sum) = records.iter().fold((0.0, 0.0), |(lat, lon), record| {
            (lat + record.position.latitude, lon + record.position.longitude)
        });

        let position = Position::new(lat_sum / count as f64, lon_sum / count as f64);
        debug!(owner = %owner, samples = count, "home estimate computed");

        Ok(HomeEstimate { owner: owner.clone(), position: Some(position), sample_count: count })
    }
}
