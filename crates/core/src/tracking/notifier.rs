//! Jittered notification scheduling.
//!
//! Dispatching at the exact moment of detection would let an attentive
//! observer correlate notification arrival with the recipient's
//! location-crossing instant. A uniform random delay breaks that timing
//! side-channel, trading notification freshness for privacy.

use std::sync::Arc;
use std::time::Duration;

use proxima_domain::DetectionConfig;
use rand::Rng;
use tracing::{debug, warn};

use super::ports::NotificationSender;

/// Schedules delayed notifications through the external sender.
pub struct NotificationScheduler {
    sender: Arc<dyn NotificationSender>,
    config: DetectionConfig,
}

impl NotificationScheduler {
    pub fn new(sender: Arc<dyn NotificationSender>, config: DetectionConfig) -> Self {
        Self { sender, config }
    }

    /// Schedule a notification after a random delay.
    ///
    /// Fire-and-forget: a failed dispatch request is logged and never
    /// retried by the engine.
    pub async fn schedule(&self, title: &str, body: &str) {
        let delay = self.jitter();
        debug!(delay_secs = delay.as_secs(), "scheduling jittered notification");

        if let Err(err) = self.sender.schedule_after_delay(delay, title, body).await {
            warn!(error = %err, "notification dispatch request failed, not retried");
        }
    }

    /// Uniform delay in `[min, max)` seconds.
    fn jitter(&self) -> Duration {
        let min = self.config.notify_jitter_min_secs;
        let max = self.config.notify_jitter_max_secs.max(min + 1);
        Duration::from_secs(rand::thread_rng().gen_range(min..max))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use proxima_domain::{ProximaError, Result};

    use super::*;

    #[derive(Default)]
    struct RecordingSender {
        delays: Mutex<Vec<Duration>>,
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl NotificationSender for RecordingSender {
        async fn schedule_after_delay(
            &self,
            delay: Duration,
            _title: &str,
            _body: &str,
        ) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.delays.lock().expect("lock").push(delay);
            if self.fail {
                return Err(ProximaError::Internal("sender unavailable".into()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn delay_stays_within_configured_bounds() {
        let sender = Arc::new(RecordingSender::default());
        let scheduler = NotificationScheduler::new(sender.clone(), DetectionConfig::default());

        for _ in 0..32 {
            scheduler.schedule("title", "body").await;
        }

        for delay in sender.delays.lock().expect("lock").iter() {
            assert!(delay.as_secs() >= 1, "delay below jitter floor: {delay:?}");
            assert!(delay.as_secs() < 600, "delay past jitter ceiling: {delay:?}");
        }
    }

    #[tokio::test]
    async fn degenerate_bounds_pin_the_delay() {
        let config = DetectionConfig {
            notify_jitter_min_secs: 5,
            notify_jitter_max_secs: 6,
            ..DetectionConfig::default()
        };
        let sender = Arc::new(RecordingSender::default());
        let scheduler = NotificationScheduler::new(sender.clone(), config);

        scheduler.schedule("title", "body").await;

        assert_eq!(sender.delays.lock().expect("lock")[0], Duration::from_secs(5));
    }

    #[tokio::test]
    async fn dispatch_failure_is_swallowed_without_retry() {
        let sender =
            Arc::new(RecordingSender { fail: true, ..RecordingSender::default() });
        let scheduler = NotificationScheduler::new(sender.clone(), DetectionConfig::default());

        scheduler.schedule("title", "body").await;

        assert_eq!(sender.calls.load(Ordering::SeqCst), 1);
    }
}
