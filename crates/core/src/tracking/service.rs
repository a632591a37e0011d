//! Per-position-update evaluation cycle.
//!
//! Runs once per delivered position while tracking is active: resolve the
//! session user, recompute the home estimate, check the device is near it,
//! then check for other users' recent records nearby. A match schedules a
//! notification; the suspend transition belongs to the controller.

use std::sync::Arc;

use proxima_domain::constants::{NOTIFY_BODY, NOTIFY_TITLE};
use proxima_domain::{DetectionConfig, Position, ProximityMatch, Result};
use tracing::{debug, info};

use super::home::HomeEstimator;
use super::notifier::NotificationScheduler;
use super::ports::{Identity, LocationRecordRepository, NotificationSender};
use super::scanner::ProximityScanner;
use crate::geo;

/// Outcome of a single evaluation cycle.
///
/// Everything except `Matched` is a no-op for the state machine. The
/// non-match variants are distinguished so callers can log why a cycle
/// ended early; none of them is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No signed-in user; nothing to evaluate
    NoUser,
    /// The user has no record history, so no home estimate exists
    NoHome,
    /// The device is outside the radius around the home estimate
    AwayFromHome,
    /// Near home, but nobody else's recent record is within the radius
    NoneNearby,
    /// A nearby record was found and a notification was scheduled
    Matched,
}

/// The proximity detection pipeline behind the tracking controller.
pub struct DetectionService {
    identity: Arc<dyn Identity>,
    estimator: HomeEstimator,
    scanner: ProximityScanner,
    notifier: NotificationScheduler,
    config: DetectionConfig,
}

impl DetectionService {
    pub fn new(
        identity: Arc<dyn Identity>,
        repository: Arc<dyn LocationRecordRepository>,
        sender: Arc<dyn NotificationSender>,
        config: DetectionConfig,
    ) -> Self {
        Self {
            identity,
            estimator: HomeEstimator::new(Arc::clone(&repository)),
            scanner: ProximityScanner::new(repository, config.clone()),
            notifier: NotificationScheduler::new(sender, config.clone()),
            config,
        }
    }

    /// Run one evaluation cycle for the given device position.
    ///
    /// # Errors
    ///
    /// A storage failure aborts the cycle; the caller waits for the next
    /// naturally occurring position event rather than retrying.
    pub async fn evaluate(&self, current: Position) -> Result<CycleOutcome> {
        let Some(user) = self.identity.current_user_id().await else {
            debug!("no current user, skipping evaluation cycle");
            return Ok(CycleOutcome::NoUser);
        };

        let estimate = self.estimator.estimate_home(&user).await?;
        let Some(home) = estimate.position else {
            debug!(user = %user, "no home estimate yet, skipping evaluation cycle");
            return Ok(CycleOutcome::NoHome);
        };

        let home_distance_km = geo::distance_km(current, home);
        if home_distance_km > self.config.proximity_radius_km {
            debug!(user = %user, home_distance_km, "device away from home area");
            return Ok(CycleOutcome::AwayFromHome);
        }

        if self.scanner.any_nearby(current, &user).await? {
            info!(user = %user, "nearby user detected, scheduling notification");
            self.notifier.schedule(NOTIFY_TITLE, NOTIFY_BODY).await;
            return Ok(CycleOutcome::Matched);
        }

        Ok(CycleOutcome::NoneNearby)
    }

    /// Display mode: the newest nearby matches, bounded by the configured
    /// display limit. Returns an empty list when nobody is signed in.
    pub async fn nearby_digest(&self, reference: Position) -> Result<Vec<ProximityMatch>> {
        let Some(user) = self.identity.current_user_id().await else {
            return Ok(Vec::new());
        };
        self.scanner.find_nearby(reference, &user, self.config.nearby_display_limit).await
    }
}
