//! Tracking controller state machine.
//!
//! Orchestrates when position updates are consumed, when detection is
//! suspended for a cooldown after a match, and when it resumes. The
//! suspend/resume protocol is an explicit state machine rather than a side
//! effect of unsubscribing from the position stream, so it stays testable
//! without a real location source.
//!
//! Concurrency discipline: `TrackingState` is the only shared mutable state
//! in the engine and lives behind a single `tokio::sync::Mutex`. The lock is
//! held for the whole evaluation cycle, so a resume-timer fire can never
//! race an in-flight cycle, and only one cooldown can ever be armed.
//! Position updates that arrive while a cycle holds the lock are dropped,
//! not queued.

use std::sync::Arc;

use chrono::Utc;
use proxima_core::tracking::ports::{PermissionSource, PositionSource};
use proxima_core::{CycleOutcome, DetectionService};
use proxima_domain::{DetectionConfig, Position, Result, TrackingState};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Result of a `start()` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Tracking moved from `Stopped` to `Active`
    Started,
    /// Already `Active` or `Suspended`; nothing changed
    AlreadyRunning,
    /// Permission not granted; still `Stopped`, caller may prompt and retry
    PermissionDenied,
}

struct ControllerInner {
    state: TrackingState,
    resume_token: Option<CancellationToken>,
}

/// State machine driving background proximity detection.
pub struct TrackingController {
    service: Arc<DetectionService>,
    positions: Arc<dyn PositionSource>,
    permissions: Arc<dyn PermissionSource>,
    config: DetectionConfig,
    inner: Arc<Mutex<ControllerInner>>,
}

impl TrackingController {
    pub fn new(
        service: Arc<DetectionService>,
        positions: Arc<dyn PositionSource>,
        permissions: Arc<dyn PermissionSource>,
        config: DetectionConfig,
    ) -> Self {
        Self {
            service,
            positions,
            permissions,
            config,
            inner: Arc::new(Mutex::new(ControllerInner {
                state: TrackingState::Stopped,
                resume_token: None,
            })),
        }
    }

    /// Current state snapshot.
    pub async fn state(&self) -> TrackingState {
        self.inner.lock().await.state
    }

    /// Start tracking.
    ///
    /// A no-op while `Active` or `Suspended`. Permission denial is reported,
    /// not raised: the caller may prompt for permission and call again.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<StartOutcome> {
        let mut inner = self.inner.lock().await;

        if inner.state != TrackingState::Stopped {
            debug!(state = ?inner.state, "start requested while already running");
            return Ok(StartOutcome::AlreadyRunning);
        }

        if !self.permissions.is_granted().await {
            warn!("tracking permission not granted, start denied");
            return Ok(StartOutcome::PermissionDenied);
        }

        self.positions.request_start().await?;
        inner.state = TrackingState::Active;
        info!("tracking started");

        Ok(StartOutcome::Started)
    }

    /// Stop tracking from any state.
    ///
    /// Cancels a pending resume timer outright (no late resume after an
    /// explicit stop) and halts position delivery at the source. Idempotent.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;

        if let Some(token) = inner.resume_token.take() {
            token.cancel();
            debug!("pending resume timer cancelled");
        }

        let was = inner.state;
        inner.state = TrackingState::Stopped;
        self.positions.request_stop().await?;

        if was != TrackingState::Stopped {
            info!(previous = ?was, "tracking stopped");
        }
        Ok(())
    }

    /// Handle one externally delivered position update.
    ///
    /// Runs the evaluation cycle while `Active`; ignored in any other state
    /// (delivery should already be halted at the source) and dropped when a
    /// cycle is still in flight. On a match, transitions to
    /// `Suspended { resume_at = now + cooldown }` and arms the resume timer.
    ///
    /// Returns the cycle outcome, or `None` when the update was ignored.
    ///
    /// # Errors
    ///
    /// A storage failure aborts this cycle only; the state is unchanged and
    /// the next position event starts fresh.
    pub async fn handle_position_update(&self, position: Position) -> Result<Option<CycleOutcome>> {
        // Overlapping deliveries contend here; drop rather than queue.
        let Ok(mut inner) = self.inner.try_lock() else {
            debug!("evaluation cycle in flight, dropping position update");
            return Ok(None);
        };

        if !inner.state.is_active() {
            debug!(state = ?inner.state, "position update ignored while not active");
            return Ok(None);
        }

        let outcome = self.service.evaluate(position).await?;

        if outcome == CycleOutcome::Matched {
            self.suspend(&mut inner).await;
        }

        Ok(Some(outcome))
    }

    /// `Active` → `Suspended`: halt delivery and arm the resume timer.
    ///
    /// Caller holds the state lock, so exactly one cooldown can be armed.
    async fn suspend(&self, inner: &mut ControllerInner) {
        let resume_at = Utc::now() + self.config.cooldown_chrono();

        if let Err(err) = self.positions.request_stop().await {
            warn!(error = %err, "failed to halt position delivery during suspend");
        }

        let token = CancellationToken::new();
        inner.state = TrackingState::Suspended { resume_at };
        inner.resume_token = Some(token.clone());
        info!(%resume_at, "detection suspended for cooldown");

        let inner_ref = Arc::clone(&self.inner);
        let permissions = Arc::clone(&self.permissions);
        let positions = Arc::clone(&self.positions);
        let cooldown = self.config.cooldown();

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("resume timer cancelled");
                }
                _ = tokio::time::sleep(cooldown) => {
                    Self::resume(inner_ref, permissions, positions).await;
                }
            }
        });
    }

    /// Resume-timer body: `Suspended` → `Active` iff permission still holds.
    ///
    /// On a denied or failed resume the controller falls back to `Stopped`
    /// and waits for an explicit `start()`; it does not poll permission.
    async fn resume(
        inner: Arc<Mutex<ControllerInner>>,
        permissions: Arc<dyn PermissionSource>,
        positions: Arc<dyn PositionSource>,
    ) {
        let mut inner = inner.lock().await;

        // An explicit stop may have won the race to the lock.
        if !inner.state.is_suspended() {
            debug!(state = ?inner.state, "resume timer fired outside suspension");
            return;
        }
        inner.resume_token = None;

        if !permissions.is_granted().await {
            warn!("tracking permission revoked during cooldown, awaiting explicit restart");
            inner.state = TrackingState::Stopped;
            return;
        }

        match positions.request_start().await {
            Ok(()) => {
                inner.state = TrackingState::Active;
                info!("tracking resumed after cooldown");
            }
            Err(err) => {
                error!(error = %err, "failed to restart position delivery on resume");
                inner.state = TrackingState::Stopped;
            }
        }
    }
}
