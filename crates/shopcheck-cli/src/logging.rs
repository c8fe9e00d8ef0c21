//! Log installation for the CLI.
//!
//! Two sinks share one registry: the console (compact or JSON, filtered by
//! `RUST_LOG` or the `-v` count) and a plain-text file that always records
//! scenario progress at `info`.

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console filter: `RUST_LOG` when set, otherwise the verbosity default
#[must_use]
pub fn console_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.console_directives()))
}

/// File filter
#[must_use]
pub const fn file_level(config: &CliConfig) -> LevelFilter {
    if config.verbosity.is_debug() {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Install the global subscriber.
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init(config: &CliConfig) -> CliResult<()> {
    if let Some(parent) = config.log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let console_json = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
    });
    let console_compact = (!config.log_json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(config.color.should_color())
            .compact()
    });
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_filter(file_level(config));

    tracing_subscriber::registry()
        .with(console_json.with_filter(console_filter(config)))
        .with(console_compact.with_filter(console_filter(config)))
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })?;

    tracing::debug!(file = %config.log_file.display(), "logging installed");
    Ok(())
}
