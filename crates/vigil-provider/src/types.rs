//! Core types for the log provider capability.
//!
//! This module provides:
//! - [`LogRecord`] — One entry in a log stream
//! - [`Severity`] — Record severity levels
//! - [`Notification`] — Tagged record/error union delivered to subscribers
//! - [`DeliveryError`] — Transient notification-channel failures
//! - [`Query`] — Subscription filter string
//! - [`SubscriptionId`] — Opaque handle for a live subscription

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Opaque identifier for a live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Creates a fresh subscription id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational record.
    Information,
    /// Warning condition.
    Warning,
    /// Error condition.
    Error,
}

impl Severity {
    /// Returns the string representation of this severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Immutable snapshot of one provider-delivered log record.
///
/// `provider_id` and `record_id` are optional on the wire; consumers fall
/// back to the log name and to `event_id` respectively when they are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
    /// The log stream the record belongs to.
    pub log_name: String,
    /// Identity of the provider that wrote the record, when known.
    pub provider_id: Option<String>,
    /// Primary record identifier, when assigned.
    pub record_id: Option<u64>,
    /// Legacy event identifier, always present.
    pub event_id: u64,
    /// Human-readable description of the record.
    pub description: String,
    /// Record severity.
    pub severity: Severity,
}

/// A transient failure on the notification channel.
///
/// Delivery errors are recoverable: the provider may resume delivery on the
/// same subscription, so consumers report them and keep listening.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DeliveryError {
    /// The provider failed to deliver one or more records.
    #[error("delivery failed: {0}")]
    Failed(String),

    /// The subscriber fell behind and records were dropped.
    #[error("subscriber lagged, {dropped} record(s) dropped")]
    Lagged {
        /// Number of records dropped.
        dropped: u64,
    },
}

/// One event pushed by the provider to a subscription.
///
/// Exactly one variant is populated per event; consumers branch on the
/// variant rather than probing for absent fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A newly written record matching the subscription's query.
    Record(LogRecord),
    /// A transient delivery failure.
    Error(DeliveryError),
}

/// Filter string restricting which records a subscription receives.
///
/// `"*"` matches every record; any other string is a case-insensitive
/// substring match on the record description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query(String);

impl Query {
    /// Creates a query from a filter string.
    pub fn new(filter: impl Into<String>) -> Self {
        Self(filter.into())
    }

    /// The match-all query (`"*"`).
    #[must_use]
    pub fn all() -> Self {
        Self("*".to_string())
    }

    /// Returns the raw filter string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether a record matches this query.
    #[must_use]
    pub fn matches(&self, record: &LogRecord) -> bool {
        if self.0 == "*" {
            return true;
        }
        record
            .description
            .to_lowercase()
            .contains(&self.0.to_lowercase())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(description: &str) -> LogRecord {
        LogRecord {
            timestamp: Utc::now(),
            log_name: "Application".to_string(),
            provider_id: None,
            record_id: Some(1),
            event_id: 0,
            description: description.to_string(),
            severity: Severity::Information,
        }
    }

    #[test]
    fn query_all_matches_everything() {
        let query = Query::all();
        assert!(query.matches(&make_record("anything at all")));
        assert!(query.matches(&make_record("")));
    }

    #[test]
    fn query_substring_is_case_insensitive() {
        let query = Query::new("disk full");
        assert!(query.matches(&make_record("warning: DISK FULL on /var")));
        assert!(!query.matches(&make_record("all good")));
    }

    #[test]
    fn query_literal_star_only_as_whole_string() {
        // "*x" is a substring query, not a glob
        let query = Query::new("*x");
        assert!(!query.matches(&make_record("plain text")));
        assert!(query.matches(&make_record("value *x seen")));
    }

    #[test]
    fn subscription_ids_are_unique() {
        assert_ne!(SubscriptionId::new(), SubscriptionId::new());
    }

    #[test]
    fn severity_as_str() {
        assert_eq!(Severity::Information.as_str(), "information");
        assert_eq!(Severity::Warning.as_str(), "warning");
        assert_eq!(Severity::Error.as_str(), "error");
    }

    #[test]
    fn record_serializes_to_json() {
        let record = make_record("hello");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["description"], "hello");
        assert_eq!(json["severity"], "information");
        assert!(json["provider_id"].is_null());
    }

    #[test]
    fn delivery_error_display() {
        let err = DeliveryError::Failed("log was cleared".to_string());
        assert_eq!(err.to_string(), "delivery failed: log was cleared");

        let err = DeliveryError::Lagged { dropped: 3 };
        assert_eq!(err.to_string(), "subscriber lagged, 3 record(s) dropped");
    }
}
