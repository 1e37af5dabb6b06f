//! Error types for the watch core.

use thiserror::Error;
use vigil_provider::ProviderError;

/// Errors that can occur when opening or driving a watch session.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The log name passed to open was empty.
    #[error("log name must not be empty")]
    EmptyLogName,

    /// The provider rejected the subscription or log creation.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),
}

/// Result type alias for watch operations.
pub type Result<T> = std::result::Result<T, WatchError>;
