//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use shopcheck::{BrowserKind, RunEnv};
use std::path::PathBuf;

/// shopcheck: end-to-end checks for the Swag Labs storefront
#[derive(Parser, Debug)]
#[command(name = "shopcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit console logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log file (plain text, appended)
    #[arg(long, default_value = "Logs/logfile.log", global = true)]
    pub log_file: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against the storefront
    Run(RunArgs),

    /// List registered scenarios
    List(ListArgs),

    /// Check prices or an ordering without a browser
    #[command(subcommand)]
    Verify(VerifyCommand),
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Browser to drive
    #[arg(short, long)]
    pub browser: Option<BrowserArg>,

    /// Where the browser runs
    #[arg(long)]
    pub run_env: Option<RunEnvArg>,

    /// Storefront URL
    #[arg(long, env = "SHOPCHECK_BASE_URL")]
    pub base_url: Option<String>,

    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Stop after the first scenario that does not pass
    #[arg(long)]
    pub fail_fast: bool,

    /// Directory for the JSON report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for executor.json
    #[arg(long, env = "ALLURE_RESULTS_PATH")]
    pub results_dir: Option<PathBuf>,

    /// Directory for failure screenshots
    #[arg(long)]
    pub screenshots: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// YAML suite configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only list scenarios whose name contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Offline verifications
#[derive(Subcommand, Debug)]
pub enum VerifyCommand {
    /// Check subtotal, tax and total of a checkout overview
    Price(PriceArgs),

    /// Check that values are ordered by a sort option
    Sort(SortArgs),
}

/// Arguments for `verify price`
#[derive(Parser, Debug)]
pub struct PriceArgs {
    /// Line price, optionally named: `"Sauce Labs Backpack=$29.99"` or `"$29.99"`
    #[arg(short, long = "item")]
    pub items: Vec<String>,

    /// Displayed subtotal (`"Item total: $39.98"` or `"$39.98"`)
    #[arg(long)]
    pub subtotal: String,

    /// Displayed tax
    #[arg(long)]
    pub tax: String,

    /// Displayed total
    #[arg(long)]
    pub total: String,

    /// Tax rate as a fraction or percentage
    #[arg(long, default_value = "0.08")]
    pub tax_rate: String,
}

/// Arguments for `verify sort`
#[derive(Parser, Debug)]
pub struct SortArgs {
    /// Dropdown label (`"Price (low to high)"`) or value (`lohi`)
    #[arg(short, long)]
    pub mode: String,

    /// Displayed values in page order: names, or prices for price modes
    #[arg(required = true)]
    pub values: Vec<String>,
}

/// Browser argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserArg {
    /// Google Chrome / Chromium
    Chrome,
    /// Mozilla Firefox
    Firefox,
    /// Microsoft Edge
    Edge,
}

impl From<BrowserArg> for BrowserKind {
    fn from(arg: BrowserArg) -> Self {
        match arg {
            BrowserArg::Chrome => Self::Chrome,
            BrowserArg::Firefox => Self::Firefox,
            BrowserArg::Edge => Self::Edge,
        }
    }
}

/// Run environment argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunEnvArg {
    /// Browser on this machine
    Local,
    /// Browser in a container
    Docker,
}

impl From<RunEnvArg> for RunEnv {
    fn from(arg: RunEnvArg) -> Self {
        match arg {
            RunEnvArg::Local => Self::Local,
            RunEnvArg::Docker => Self::Docker,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
