//! Startup, interactive wait, and ordered teardown.
//!
//! The orchestrator wires the provider, the watch sessions, and the
//! synthetic producer together, then blocks reading lines until one
//! case-insensitively equals `exit` (EOF counts as exit). A per-log
//! session-open failure skips that log only; the rest of startup proceeds.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};
use vigil_provider::{LogProvider, Query};
use vigil_watch::{ProducerSchedule, RecordSink, SyntheticProducer, WatchSession};

use crate::error::Result;

/// Hint printed after every non-exit input line.
const EXIT_HINT: &str = "  exit\u{21b5} to Exit";

/// Everything the orchestrator needs to run the demo.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Demo log created at startup and written to by the producer.
    pub demo_log: String,
    /// Write source registered for the demo log.
    pub source: String,
    /// Additional logs to watch.
    pub extra_logs: Vec<String>,
    /// Subscription query for every session.
    pub query: String,
    /// Seconds before the first synthetic write.
    pub first_delay_secs: u64,
    /// Seconds between synthetic writes.
    pub interval_secs: u64,
}

impl OrchestratorConfig {
    /// Creates a configuration with the demo defaults (1s cadence, `"*"`).
    pub fn new(demo_log: impl Into<String>) -> Self {
        let demo_log = demo_log.into();
        Self {
            source: demo_log.clone(),
            demo_log,
            extra_logs: Vec::new(),
            query: "*".to_string(),
            first_delay_secs: 1,
            interval_secs: 1,
        }
    }
}

/// Runs the demo until the exit command (or EOF) arrives on `input`.
///
/// # Errors
///
/// Returns an error when demo log creation fails or interactive input
/// cannot be read. Per-log subscription failures are reported and skipped,
/// never propagated.
pub async fn run<R>(
    provider: Arc<dyn LogProvider>,
    sink: Arc<dyn RecordSink>,
    input: R,
    config: &OrchestratorConfig,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    // Informational enumeration of what the provider currently carries
    sink.write_line("Available Logs:");
    for name in provider.list_log_names() {
        sink.write_line(&format!("    {name}"));
    }
    sink.write_line("");

    // Unconditional: `create_log` is idempotent for the log itself and still
    // registers the configured source on a log that already exists.
    provider.create_log(&config.demo_log, &config.source)?;

    let query = Query::new(config.query.clone());
    let mut sessions: Vec<WatchSession> = Vec::new();
    for log_name in std::iter::once(&config.demo_log).chain(config.extra_logs.iter()) {
        match WatchSession::open(
            Arc::clone(&provider),
            Arc::clone(&sink),
            log_name.clone(),
            query.clone(),
        ) {
            Ok(session) => sessions.push(session),
            Err(err) => {
                // Startup aborts for this log only
                error!(log = %log_name, "could not open watch session: {err}");
            }
        }
    }
    info!(sessions = sessions.len(), "watching");

    let schedule = ProducerSchedule::new(config.demo_log.clone(), config.source.clone())
        .with_first_fire_delay(Duration::from_secs(config.first_delay_secs))
        .with_interval(Duration::from_secs(config.interval_secs));
    let mut producer = SyntheticProducer::start(Arc::clone(&provider), schedule);

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }
        sink.write_line(EXIT_HINT);
    }

    producer.stop();
    producer.join().await;
    // Latest-opened session closes first
    for session in sessions.iter_mut().rev() {
        session.close();
    }
    Ok(())
}
