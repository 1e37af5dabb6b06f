//! # vigil-provider
//!
//! Log provider capability for the vigil event-log watcher.
//!
//! This crate provides:
//!
//! - [`LogRecord`] — Immutable snapshot of one delivered log record
//! - [`Severity`] — Record severity levels
//! - [`Notification`] — Tagged record/error union pushed to subscribers
//! - [`Query`] — Filter string restricting which records a subscription receives
//! - [`LogProvider`] — Abstract capability trait for log backends
//! - [`MemoryProvider`] — In-memory provider with fault injection
//!
//! ## Example
//!
//! ```rust
//! use vigil_provider::{LogProvider, MemoryProvider, Query, Severity};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> vigil_provider::Result<()> {
//! let provider = MemoryProvider::new();
//! provider.create_log("Application", "demo")?;
//!
//! let mut sub = provider.subscribe("Application", Query::all())?;
//! provider.write_record("Application", "demo", "hello", Severity::Information)?;
//!
//! let notification = sub.receiver.recv().await;
//! assert!(notification.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{ProviderError, Result};
pub use memory::{MemoryProvider, MemoryProviderConfig};
pub use traits::{LogProvider, Subscription};
pub use types::{DeliveryError, LogRecord, Notification, Query, Severity, SubscriptionId};
