//! # vigil-cli
//!
//! Orchestration for the interactive event-log watcher demo.
//!
//! The orchestrator enumerates available logs, ensures the demo log and its
//! write source exist, opens one watch session per log of interest, arms the
//! synthetic producer, and blocks on an interactive exit loop. On exit it
//! stops the producer and closes sessions in reverse order of creation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod error;
pub mod orchestrator;

pub use cli::Cli;
pub use error::{CliError, Result};
pub use orchestrator::{run, OrchestratorConfig};
