//! Error types for log providers.

use thiserror::Error;

/// Errors that can occur when talking to a log provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The named log stream does not exist.
    #[error("no such log: {0}")]
    NoSuchLog(String),

    /// The named write source is not registered for the log.
    #[error("source {source_name} is not registered for log {log}")]
    UnknownSource {
        /// The log stream the write targeted.
        log: String,
        /// The unregistered source name.
        source_name: String,
    },

    /// The subscription has already been released.
    #[error("subscription closed")]
    SubscriptionClosed,
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
