//! # vigil-watch
//!
//! The live-watch core of the vigil event-log watcher.
//!
//! This crate provides:
//!
//! - [`WatchSession`] — One cancellable watch over a log stream
//! - [`format_record`] — Pure two-line record formatter
//! - [`RecordSink`] — Serialized output sink shared by all sessions
//! - [`SyntheticProducer`] — Timer-driven record injector for demos
//!
//! A session owns one subscription against a [`LogProvider`]
//! (`vigil-provider`), converts each pushed notification into formatted
//! output, tolerates transient delivery errors without terminating the
//! watch, and releases the subscription exactly once on close or drop.
//!
//! [`LogProvider`]: vigil_provider::LogProvider

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod producer;
pub mod session;
pub mod sink;

// Re-export main types
pub use error::{Result, WatchError};
pub use format::{format_record, FormattedRecord};
pub use producer::{ProducerSchedule, SyntheticProducer};
pub use session::WatchSession;
pub use sink::{BufferSink, ConsoleSink, RecordSink};
