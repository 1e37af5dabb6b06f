//! The log provider capability trait.
//!
//! This module provides the [`LogProvider`] trait for abstracting over
//! log backends. The watch core depends only on this capability set, not
//! on any particular provider implementation.

use tokio::sync::mpsc;

use crate::error::Result;
use crate::types::{Notification, Query, Severity, SubscriptionId};

/// A live registration against a log provider.
///
/// The receiver yields one [`Notification`] per event until the provider
/// releases the subscription, after which it drains and ends.
#[derive(Debug)]
pub struct Subscription {
    /// Opaque handle used to release the subscription.
    pub id: SubscriptionId,
    /// Delivery channel for notifications.
    pub receiver: mpsc::Receiver<Notification>,
}

/// Capability trait for a host log facility.
///
/// Implementors supply log enumeration, idempotent log/source creation, a
/// push subscription primitive, and a write primitive. All methods may be
/// called concurrently from multiple execution contexts.
pub trait LogProvider: Send + Sync {
    /// Enumerates the names of all available log streams.
    fn list_log_names(&self) -> Vec<String>;

    /// Returns true if the named log stream exists.
    fn log_exists(&self, name: &str) -> bool;

    /// Ensures a log stream and a write source for it exist.
    ///
    /// Idempotent: creating an existing log or registering an existing
    /// source is a no-op, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the creation.
    fn create_log(&self, name: &str, source: &str) -> Result<()>;

    /// Registers a subscription delivering records that match `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NoSuchLog`](crate::ProviderError::NoSuchLog)
    /// if the named log does not exist.
    fn subscribe(&self, log_name: &str, query: Query) -> Result<Subscription>;

    /// Releases a subscription so no further notifications are dispatched.
    ///
    /// Idempotent; releasing an unknown or already-released id is a no-op.
    /// Notifications already buffered on the delivery channel may still be
    /// drained by the receiver.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Appends one record to a log stream and fans it out to subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the log does not exist or the source is not
    /// registered for it.
    fn write_record(
        &self,
        log_name: &str,
        source: &str,
        message: &str,
        severity: Severity,
    ) -> Result<()>;
}
