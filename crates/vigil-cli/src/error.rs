//! Error types for the orchestrator binary.

use thiserror::Error;
use vigil_provider::ProviderError;
use vigil_watch::WatchError;

/// Errors that abort orchestrator startup or the exit loop.
#[derive(Debug, Error)]
pub enum CliError {
    /// Demo log creation was rejected by the provider.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A watch session could not be opened.
    #[error("watch error: {0}")]
    Watch(#[from] WatchError),

    /// Reading interactive input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for orchestrator operations.
pub type Result<T> = std::result::Result<T, CliError>;
