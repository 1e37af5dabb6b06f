//! Timer-driven synthetic record producer.
//!
//! The producer exists to exercise the watch path end-to-end: it appends a
//! fixed record to one target log on a recurring schedule. Write failures
//! are reported and never stop the schedule.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use vigil_provider::{LogProvider, Severity};

/// Message content of every synthetic record.
const TEST_MESSAGE: &str = "Test message";

/// When and where the producer writes.
///
/// Stateless between fires; the schedule alone drives the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerSchedule {
    /// Log stream the records are appended to.
    pub target_log: String,
    /// Registered write source to append as.
    pub source: String,
    /// Delay before the first fire.
    pub first_fire_delay: Duration,
    /// Delay between subsequent fires.
    pub interval: Duration,
}

impl ProducerSchedule {
    /// Creates a schedule with the demo cadence of one fire per second.
    pub fn new(target_log: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            target_log: target_log.into(),
            source: source.into(),
            first_fire_delay: Duration::from_secs(1),
            interval: Duration::from_secs(1),
        }
    }

    /// Sets the delay before the first fire.
    #[must_use]
    pub const fn with_first_fire_delay(mut self, delay: Duration) -> Self {
        self.first_fire_delay = delay;
        self
    }

    /// Sets the delay between fires.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Recurring background writer of fixed test records.
///
/// [`stop`](Self::stop) prevents future fires; a fire already in progress
/// completes. Dropping the producer cancels the schedule as a backstop.
pub struct SyntheticProducer {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SyntheticProducer {
    /// Arms the recurring timer against the given provider.
    #[must_use]
    pub fn start(provider: Arc<dyn LogProvider>, schedule: ProducerSchedule) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task = tokio::spawn(run(provider, schedule, token));
        Self { cancel, task }
    }

    /// Cancels all future fires. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Returns true once the schedule has been cancelled.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Waits for the producer task to wind down after [`stop`](Self::stop).
    pub async fn join(&mut self) {
        self.cancel.cancel();
        let _ = (&mut self.task).await;
    }
}

impl Drop for SyntheticProducer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(provider: Arc<dyn LogProvider>, schedule: ProducerSchedule, token: CancellationToken) {
    tokio::select! {
        () = token.cancelled() => return,
        () = tokio::time::sleep(schedule.first_fire_delay) => {}
    }

    loop {
        fire(provider.as_ref(), &schedule);
        tokio::select! {
            () = token.cancelled() => break,
            () = tokio::time::sleep(schedule.interval) => {}
        }
    }
    debug!(log = %schedule.target_log, "producer schedule cancelled");
}

/// One write. Failure is reported and the schedule keeps going.
fn fire(provider: &dyn LogProvider, schedule: &ProducerSchedule) {
    if let Err(err) = provider.write_record(
        &schedule.target_log,
        &schedule.source,
        TEST_MESSAGE,
        Severity::Information,
    ) {
        warn!(log = %schedule.target_log, "synthetic write failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_provider::{MemoryProvider, Notification, Query};

    fn provider_with_log(log: &str) -> Arc<MemoryProvider> {
        let provider = Arc::new(MemoryProvider::new());
        provider.create_log(log, log).unwrap();
        provider
    }

    // Annotated binding, since unsizing does not reach through the generic
    // `Arc::clone` call
    fn as_provider(provider: &Arc<MemoryProvider>) -> Arc<dyn LogProvider> {
        let cloned: Arc<MemoryProvider> = Arc::clone(provider);
        cloned
    }

    fn drain_records(sub: &mut vigil_provider::Subscription) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(notification) = sub.receiver.try_recv() {
            if let Notification::Record(r) = notification {
                messages.push(r.description);
            }
        }
        messages
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_first_delay_then_on_interval() {
        let provider = provider_with_log("Demo");
        let mut sub = provider.subscribe("Demo", Query::all()).unwrap();

        let schedule = ProducerSchedule::new("Demo", "Demo")
            .with_first_fire_delay(Duration::from_secs(1))
            .with_interval(Duration::from_secs(1));
        let mut producer = SyntheticProducer::start(as_provider(&provider), schedule);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        producer.stop();
        producer.join().await;

        let messages = drain_records(&mut sub);
        assert!(
            (3..=4).contains(&messages.len()),
            "expected 3-4 fires, got {}",
            messages.len()
        );
        assert!(messages.iter().all(|m| m == "Test message"));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_prevents_future_fires() {
        let provider = provider_with_log("Demo");
        let mut sub = provider.subscribe("Demo", Query::all()).unwrap();

        let schedule = ProducerSchedule::new("Demo", "Demo")
            .with_first_fire_delay(Duration::from_secs(1))
            .with_interval(Duration::from_secs(1));
        let mut producer = SyntheticProducer::start(as_provider(&provider), schedule);

        producer.stop();
        assert!(producer.is_stopped());
        producer.join().await;

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(drain_records(&mut sub).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_twice_is_noop() {
        let provider = provider_with_log("Demo");
        let producer = SyntheticProducer::start(
            as_provider(&provider),
            ProducerSchedule::new("Demo", "Demo"),
        );

        producer.stop();
        producer.stop();
        assert!(producer.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn write_failure_does_not_stop_schedule() {
        // Target log does not exist yet, so early fires fail
        let provider = Arc::new(MemoryProvider::new());
        let schedule = ProducerSchedule::new("Late", "Late")
            .with_first_fire_delay(Duration::from_millis(10))
            .with_interval(Duration::from_millis(10));
        let mut producer =
            SyntheticProducer::start(as_provider(&provider), schedule);

        tokio::time::sleep(Duration::from_millis(50)).await;

        // Log appears later; the schedule must still be live
        provider.create_log("Late", "Late").unwrap();
        let mut sub = provider.subscribe("Late", Query::all()).unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        producer.stop();
        producer.join().await;

        assert!(!drain_records(&mut sub).is_empty());
    }
}
