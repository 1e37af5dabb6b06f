//! Command-line argument parsing with clap.

use clap::Parser;

use crate::orchestrator::OrchestratorConfig;

/// vigil - live event-log stream watcher demo.
#[derive(Parser, Debug, Clone)]
#[command(name = "vigil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Demo log created at startup and targeted by the synthetic producer.
    #[arg(long, env = "VIGIL_DEMO_LOG", default_value = "TestEventLog")]
    pub demo_log: String,

    /// Write source registered for the demo log.
    #[arg(long, env = "VIGIL_SOURCE", default_value = "TestEventLog")]
    pub source: String,

    /// Additional logs to watch besides the demo log.
    #[arg(long = "watch")]
    pub watch: Vec<String>,

    /// Subscription query ("*" matches every record).
    #[arg(long, default_value = "*")]
    pub query: String,

    /// Seconds before the first synthetic write.
    #[arg(long, default_value_t = 1)]
    pub first_delay_secs: u64,

    /// Seconds between synthetic writes.
    #[arg(long, default_value_t = 1)]
    pub interval_secs: u64,
}

impl Cli {
    /// Converts parsed arguments into the orchestrator configuration.
    #[must_use]
    pub fn into_config(self) -> OrchestratorConfig {
        OrchestratorConfig {
            demo_log: self.demo_log,
            source: self.source,
            extra_logs: self.watch,
            query: self.query,
            first_delay_secs: self.first_delay_secs,
            interval_secs: self.interval_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_demo() {
        let cli = Cli::parse_from(["vigil"]);
        assert_eq!(cli.demo_log, "TestEventLog");
        assert_eq!(cli.source, "TestEventLog");
        assert!(cli.watch.is_empty());
        assert_eq!(cli.query, "*");
        assert_eq!(cli.first_delay_secs, 1);
        assert_eq!(cli.interval_secs, 1);
    }

    #[test]
    fn watch_flag_repeats() {
        let cli = Cli::parse_from(["vigil", "--watch", "Application", "--watch", "System"]);
        assert_eq!(cli.watch, vec!["Application".to_string(), "System".to_string()]);
    }

    #[test]
    fn into_config_carries_fields() {
        let cli = Cli::parse_from(["vigil", "--demo-log", "Demo", "--interval-secs", "5"]);
        let config = cli.into_config();
        assert_eq!(config.demo_log, "Demo");
        assert_eq!(config.interval_secs, 5);
    }
}
