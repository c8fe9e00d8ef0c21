//! shopcheck CLI library
//!
//! Argument parsing, suite configuration, logging and the runner behind the
//! `shopcheck` binary.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;
mod runner;

pub use commands::{
    BrowserArg, Cli, ColorArg, Commands, ListArgs, PriceArgs, RunArgs, RunEnvArg, SortArgs,
    VerifyCommand,
};
pub use config::{CliConfig, ColorChoice, SuiteConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use runner::{run_scenarios, run_suite, RunOutcome};
