//! Live, cancellable watch over one log stream.
//!
//! A [`WatchSession`] owns one subscription against a [`LogProvider`] and a
//! background delivery task that turns pushed notifications into formatted
//! output. The session survives transient delivery errors and releases its
//! subscription exactly once, on [`close`](WatchSession::close) or on drop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};
use vigil_provider::{LogProvider, Notification, Query, SubscriptionId};

use crate::error::{Result, WatchError};
use crate::format::format_record;
use crate::sink::RecordSink;

/// One live watch over a (log name, query) pair.
///
/// Lifecycle: `Created → Opening → Active ⇄ (error reported) → Closed`.
/// `Closed` is terminal; closing is idempotent and dropping an open session
/// performs the same release as a backstop.
pub struct WatchSession {
    log_name: String,
    query: Query,
    id: SubscriptionId,
    provider: Arc<dyn LogProvider>,
    task: JoinHandle<()>,
    closed: bool,
}

impl WatchSession {
    /// Opens a session: validates the log name, registers the subscription,
    /// and starts the delivery task.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::EmptyLogName`] for an empty log name, or
    /// [`WatchError::ProviderUnavailable`] when the log does not exist or
    /// the provider rejects the subscription.
    pub fn open(
        provider: Arc<dyn LogProvider>,
        sink: Arc<dyn RecordSink>,
        log_name: impl Into<String>,
        query: Query,
    ) -> Result<Self> {
        let log_name = log_name.into();
        if log_name.is_empty() {
            return Err(WatchError::EmptyLogName);
        }

        let subscription = provider.subscribe(&log_name, query.clone())?;
        let id = subscription.id;
        debug!(log = %log_name, subscription = %id, query = %query, "watch session opened");

        let task = tokio::spawn(deliver(log_name.clone(), subscription.receiver, sink));

        Ok(Self {
            log_name,
            query,
            id,
            provider,
            task,
            closed: false,
        })
    }

    /// The log stream this session observes.
    #[must_use]
    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    /// The query this session was opened with.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The opaque subscription handle owned by this session.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns true while the subscription is registered for delivery.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.closed
    }

    /// Releases the subscription so no further notifications are dispatched.
    ///
    /// Idempotent: subsequent calls are no-ops. Notifications already
    /// buffered before the release may still drain through the sink.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.provider.unsubscribe(self.id);
        debug!(log = %self.log_name, subscription = %self.id, "watch session closed");
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        // Backstop release; explicit close is the primary contract
        if !self.closed {
            self.provider.unsubscribe(self.id);
        }
        self.task.abort();
    }
}

/// Consumes notifications until the provider closes the channel.
///
/// Delivery errors are reported and the loop keeps listening; the provider
/// may recover and resume on the same subscription.
async fn deliver(
    log_name: String,
    mut receiver: mpsc::Receiver<Notification>,
    sink: Arc<dyn RecordSink>,
) {
    while let Some(notification) = receiver.recv().await {
        match notification {
            Notification::Error(err) => {
                error!(log = %log_name, "failed to listen on event log: {err}");
            }
            Notification::Record(record) => {
                let formatted = format_record(&log_name, &record);
                sink.write_block(&formatted.header, &formatted.body);
            }
        }
    }
    debug!(log = %log_name, "delivery channel drained");
}
