//! In-memory log provider with push delivery and fault injection.
//!
//! This module provides [`MemoryProvider`], a single-process implementation
//! of the [`LogProvider`] capability. Each log stream tracks its registered
//! write sources, a monotonically increasing record id, and the live
//! subscriptions it fans new records out to.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{ProviderError, Result};
use crate::traits::{LogProvider, Subscription};
use crate::types::{DeliveryError, LogRecord, Notification, Query, Severity, SubscriptionId};

/// Configuration for the in-memory provider.
#[derive(Debug, Clone)]
pub struct MemoryProviderConfig {
    /// Delivery channel capacity per subscription.
    pub channel_capacity: usize,
}

impl Default for MemoryProviderConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}

/// One live subscription on a stream.
#[derive(Debug)]
struct Subscriber {
    id: SubscriptionId,
    query: Query,
    sender: mpsc::Sender<Notification>,
}

/// Per-log stream state.
#[derive(Debug, Default)]
struct Stream {
    sources: HashSet<String>,
    next_record_id: u64,
    subscribers: Vec<Subscriber>,
}

impl Stream {
    /// Pushes one notification to every subscriber whose query matches.
    ///
    /// A full delivery channel drops the notification for that subscriber
    /// rather than blocking the writer; closed subscribers are pruned.
    fn fan_out(&mut self, notification: &Notification) {
        self.subscribers.retain(|sub| {
            if let Notification::Record(record) = notification {
                if !sub.query.matches(record) {
                    return true;
                }
            }
            match sub.sender.try_send(notification.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(subscription = %sub.id, "delivery channel full, record dropped");
                    // Best effort: tell the subscriber it lagged if room opens up
                    let lag = Notification::Error(DeliveryError::Lagged { dropped: 1 });
                    let _ = sub.sender.try_send(lag);
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            }
        });
    }
}

/// Single-process, in-memory implementation of [`LogProvider`].
///
/// Records are not retained after fan-out; this provider exists to carry
/// live subscriptions, not history.
#[derive(Debug)]
pub struct MemoryProvider {
    config: MemoryProviderConfig,
    streams: RwLock<HashMap<String, Stream>>,
}

impl MemoryProvider {
    /// Creates an empty provider with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MemoryProviderConfig::default())
    }

    /// Creates an empty provider with the given configuration.
    #[must_use]
    pub fn with_config(config: MemoryProviderConfig) -> Self {
        Self {
            config,
            streams: RwLock::new(HashMap::new()),
        }
    }

    /// Fans an exact record out to the named log's subscribers.
    ///
    /// Synthetic injection hook: the record is delivered as-is, without id
    /// assignment. Used to exercise consumers with records the write
    /// primitive cannot produce (absent ids, foreign providers).
    ///
    /// # Errors
    ///
    /// Returns an error if the log does not exist.
    pub fn inject_record(&self, log_name: &str, record: LogRecord) -> Result<()> {
        let mut streams = self.streams.write();
        let stream = streams
            .get_mut(log_name)
            .ok_or_else(|| ProviderError::NoSuchLog(log_name.to_string()))?;
        stream.fan_out(&Notification::Record(record));
        Ok(())
    }

    /// Fans a delivery failure out to the named log's subscribers.
    ///
    /// Fault injection hook for exercising the report-and-continue policy
    /// of consumers.
    ///
    /// # Errors
    ///
    /// Returns an error if the log does not exist.
    pub fn inject_delivery_error(&self, log_name: &str, message: &str) -> Result<()> {
        let mut streams = self.streams.write();
        let stream = streams
            .get_mut(log_name)
            .ok_or_else(|| ProviderError::NoSuchLog(log_name.to_string()))?;
        stream.fan_out(&Notification::Error(DeliveryError::Failed(
            message.to_string(),
        )));
        Ok(())
    }

    /// Returns the number of live subscriptions on a log, for diagnostics.
    #[must_use]
    pub fn subscriber_count(&self, log_name: &str) -> usize {
        self.streams
            .read()
            .get(log_name)
            .map_or(0, |s| s.subscribers.len())
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LogProvider for MemoryProvider {
    fn list_log_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.streams.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn log_exists(&self, name: &str) -> bool {
        self.streams.read().contains_key(name)
    }

    fn create_log(&self, name: &str, source: &str) -> Result<()> {
        let mut streams = self.streams.write();
        let stream = streams.entry(name.to_string()).or_default();
        if stream.sources.insert(source.to_string()) {
            debug!(log = name, source, "registered log source");
        }
        Ok(())
    }

    fn subscribe(&self, log_name: &str, query: Query) -> Result<Subscription> {
        let mut streams = self.streams.write();
        let stream = streams
            .get_mut(log_name)
            .ok_or_else(|| ProviderError::NoSuchLog(log_name.to_string()))?;

        let id = SubscriptionId::new();
        let (sender, receiver) = mpsc::channel(self.config.channel_capacity);
        stream.subscribers.push(Subscriber { id, query, sender });
        debug!(log = log_name, subscription = %id, "subscription registered");

        Ok(Subscription { id, receiver })
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut streams = self.streams.write();
        for (name, stream) in streams.iter_mut() {
            let before = stream.subscribers.len();
            stream.subscribers.retain(|sub| sub.id != id);
            if stream.subscribers.len() < before {
                debug!(log = %name, subscription = %id, "subscription released");
            }
        }
    }

    fn write_record(
        &self,
        log_name: &str,
        source: &str,
        message: &str,
        severity: Severity,
    ) -> Result<()> {
        let mut streams = self.streams.write();
        let stream = streams
            .get_mut(log_name)
            .ok_or_else(|| ProviderError::NoSuchLog(log_name.to_string()))?;
        if !stream.sources.contains(source) {
            return Err(ProviderError::UnknownSource {
                log: log_name.to_string(),
                source_name: source.to_string(),
            });
        }

        stream.next_record_id += 1;
        let record = LogRecord {
            timestamp: Utc::now(),
            log_name: log_name.to_string(),
            provider_id: Some(source.to_string()),
            record_id: Some(stream.next_record_id),
            event_id: stream.next_record_id,
            description: message.to_string(),
            severity,
        };
        stream.fan_out(&Notification::Record(record));
        Ok(())
    }
}
