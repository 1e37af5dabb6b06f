//! vigil binary entrypoint.
//!
//! Diagnostics go to stderr via tracing; record output goes to stdout
//! through the shared sink, so the two never interleave.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vigil_cli::Cli;
use vigil_provider::MemoryProvider;
use vigil_watch::ConsoleSink;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.into_config();

    let provider = Arc::new(MemoryProvider::new());
    let sink = Arc::new(ConsoleSink::stdout());
    let input = tokio::io::BufReader::new(tokio::io::stdin());

    match vigil_cli::run(provider, sink, input, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
