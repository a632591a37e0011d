//! Proximity scanning over other users' recent records.
//!
//! One filtering predicate, two consumption strategies: an existence check
//! that short-circuits at the first hit (used to decide whether to notify)
//! and a bounded listing (used for display). Both share the same repository
//! query and the same filter.

use std::sync::Arc;

use chrono::Utc;
use proxima_domain::{DetectionConfig, LocationRecord, Position, ProximityMatch, Result, UserId};
use tracing::debug;

use super::ports::LocationRecordRepository;
use crate::geo;

/// Finds recent records from other users within the configured radius.
pub struct ProximityScanner {
    repository: Arc<dyn LocationRecordRepository>,
    config: DetectionConfig,
}

impl ProximityScanner {
    pub fn new(repository: Arc<dyn LocationRecordRepository>, config: DetectionConfig) -> Self {
        Self { repository, config }
    }

    /// Existence check: is any other user's recent record within the radius?
    ///
    /// Short-circuits at the first match, so at most one distance beyond the
    /// first qualifying record is computed.
    pub async fn any_nearby(&self, reference: Position, exclude: &UserId) -> Result<bool> {
        let records = self.recent_records().await?;
        let found = self.matches(reference, exclude, records).next().is_some();
        debug!(exclude = %exclude, found, "proximity existence check");
        Ok(found)
    }

    /// Bounded listing: up to `limit` matches, newest first.
    ///
    /// The ordering is inherited from the repository's descending
    /// `captured_at` contract; truncation therefore keeps the newest
    /// matches. Matches are not deduplicated by owner.
    pub async fn find_nearby(
        &self,
        reference: Position,
        exclude: &UserId,
        limit: usize,
    ) -> Result<Vec<ProximityMatch>> {
        let records = self.recent_records().await?;
        let matches: Vec<_> = self.matches(reference, exclude, records).take(limit).collect();
        debug!(exclude = %exclude, count = matches.len(), "proximity listing");
        Ok(matches)
    }

    async fn recent_records(&self) -> Result<Vec<LocationRecord>> {
        let cutoff = Utc::now() - self.config.recency_window();
        self.repository.records_since(cutoff).await
    }

    /// The single shared predicate: drop the excluded owner's records, keep
    /// records within the radius, lazily so consumers can short-circuit.
    fn matches<'a>(
        &'a self,
        reference: Position,
        exclude: &'a UserId,
        records: Vec<LocationRecord>,
    ) -> impl Iterator<Item = ProximityMatch> + 'a {
        let radius_km = self.config.proximity_radius_km;
        records
            .into_iter()
            .filter(move |record| &record.owner != exclude)
            .filter_map(move |record| {
                let distance_km = geo::distance_km(reference, record.position);
                (distance_km <= radius_km)
                    .then(|| ProximityMatch { reference, record, distance_km })
            })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    use super::*;

    struct FakeRepo {
        records: Vec<LocationRecord>,
    }

    impl FakeRepo {
        fn new(records: Vec<LocationRecord>) -> Self {
            Self { records }
        }
    }

    #[async_trait]
    impl LocationRecordRepository for FakeRepo {
        async fn records_for_owner(&self, _owner: &UserId) -> Result<Vec<LocationRecord>> {
            unimplemented!("not used by the scanner")
        }

        async fn records_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<LocationRecord>> {
            let mut recent: Vec<_> =
                self.records.iter().filter(|r| r.captured_at > cutoff).cloned().collect();
            recent.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
            Ok(recent)
        }

        async fn insert_record(&self, _record: LocationRecord) -> Result<()> {
            Ok(())
        }

        async fn delete_records_before(&self, _before: DateTime<Utc>) -> Result<usize> {
            Ok(0)
        }
    }

    /// Roughly `km` kilometres north of the equator reference point.
    fn km_north(km: f64) -> Position {
        Position::new(km / 111.195, 0.0)
    }

    fn record_at(owner: &str, position: Position, age: Duration) -> LocationRecord {
        LocationRecord {
            id: uuid::Uuid::new_v4().to_string(),
            owner: UserId::from(owner),
            position,
            comment: "spot".into(),
            captured_at: Utc::now() - age,
        }
    }

    fn scanner(records: Vec<LocationRecord>) -> ProximityScanner {
        ProximityScanner::new(Arc::new(FakeRepo::new(records)), DetectionConfig::default())
    }

    const REFERENCE: Position = Position { latitude: 0.0, longitude: 0.0 };

    #[tokio::test]
    async fn never_matches_excluded_owner() {
        let scanner = scanner(vec![
            record_at("me", REFERENCE, Duration::minutes(1)),
            record_at("me", km_north(2.0), Duration::minutes(2)),
        ]);

        assert!(!scanner.any_nearby(REFERENCE, &UserId::from("me")).await.expect("scan"));
        let matches =
            scanner.find_nearby(REFERENCE, &UserId::from("me"), 10).await.expect("scan");
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn radius_boundary_is_inclusive_at_ten_km() {
        let scanner = scanner(vec![
            record_at("near", km_north(9.5), Duration::minutes(1)),
            record_at("far", km_north(10.5), Duration::minutes(1)),
        ]);

        let matches =
            scanner.find_nearby(REFERENCE, &UserId::from("me"), 10).await.expect("scan");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].record.owner, UserId::from("near"));
        assert!(matches[0].distance_km <= 10.0);
    }

    #[tokio::test]
    async fn stale_records_are_filtered_by_recency_window() {
        let scanner = scanner(vec![record_at("other", km_north(1.0), Duration::minutes(21))]);

        assert!(!scanner.any_nearby(REFERENCE, &UserId::from("me")).await.expect("scan"));
    }

    #[tokio::test]
    async fn listing_keeps_newest_first_and_truncates() {
        let scanner = scanner(vec![
            record_at("a", km_north(1.0), Duration::minutes(10)),
            record_at("b", km_north(2.0), Duration::minutes(1)),
            record_at("c", km_north(3.0), Duration::minutes(5)),
            record_at("d", km_north(4.0), Duration::minutes(15)),
        ]);

        let matches =
            scanner.find_nearby(REFERENCE, &UserId::from("me"), 3).await.expect("scan");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].record.owner, UserId::from("b"));
        assert_eq!(matches[1].record.owner, UserId::from("c"));
        assert_eq!(matches[2].record.owner, UserId::from("a"));
    }

    #[tokio::test]
    async fn same_owner_may_match_multiple_times() {
        let scanner = scanner(vec![
            record_at("other", km_north(1.0), Duration::minutes(1)),
            record_at("other", km_north(2.0), Duration::minutes(2)),
        ]);

        let matches =
            scanner.find_nearby(REFERENCE, &UserId::from("me"), 10).await.expect("scan");
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn empty_result_is_ok_not_error() {
        let scanner = scanner(vec![]);
        let matches =
            scanner.find_nearby(REFERENCE, &UserId::from("me"), 3).await.expect("scan");
        assert!(matches.is_empty());
    }
}
