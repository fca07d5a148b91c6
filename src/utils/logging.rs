//! Log output setup
//!
//! One compact `tracing` subscriber for the whole process, driven by the
//! `--log-level` and `--verbose` flags.

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Subscriber settings derived from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    /// Adds module targets and thread ids to every line
    pub verbose: bool,
}

impl LogConfig {
    /// `verbose` forces debug level regardless of `level`
    pub fn from_flags(level: &str, verbose: bool) -> Self {
        if verbose {
            Self {
                level: Level::DEBUG,
                verbose,
            }
        } else {
            Self {
                level: parse_level(level),
                verbose,
            }
        }
    }
}

/// Parse a level name, falling back to INFO
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber; fails if one is already set
pub fn init_logging(config: LogConfig) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level)
        .with_target(config.verbose)
        .with_thread_ids(config.verbose)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to initialize logging")
}
