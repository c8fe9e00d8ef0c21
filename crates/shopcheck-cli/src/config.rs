//! CLI and suite configuration
//!
//! A run is configured in three layers, later ones winning:
//! built-in defaults, an optional YAML file (`--config`), then flags and
//! environment variables.

use crate::commands::RunArgs;
use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use shopcheck::reporter::{self, RUN_LABEL_FILE};
use shopcheck::{DriverConfig, FailureMode};
use std::path::{Path, PathBuf};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - failures only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - scenario steps
    Verbose,
    /// Debug - driver calls
    Debug,
}

impl Verbosity {
    /// Verbosity from the `-q` flag and the `-v` count
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if debug mode
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Console log directives used when `RUST_LOG` is unset
    #[must_use]
    pub const fn console_directives(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "shopcheck=info,shopcheck_cli=info,warn",
            Self::Debug => "shopcheck=debug,shopcheck_cli=debug,info",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::colors_enabled_stderr(),
        }
    }
}

/// Process-wide CLI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Console logs as JSON lines
    pub log_json: bool,
    /// Plain-text log file
    pub log_file: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            log_json: false,
            log_file: PathBuf::from("Logs/logfile.log"),
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub const fn with_log_json(mut self, log_json: bool) -> Self {
        self.log_json = log_json;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }
}

/// Settings of one suite run, loadable from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Browser settings
    pub driver: DriverConfig,
    /// Scenario name filter
    pub filter: Option<String>,
    /// Stop after the first scenario that does not pass
    pub fail_fast: bool,
    /// Directory for the JSON report
    pub output_dir: PathBuf,
    /// Directory for executor.json; `ALLURE_RESULTS_PATH` or the default when unset
    pub results_dir: Option<PathBuf>,
    /// Directory for failure screenshots
    pub screenshot_dir: PathBuf,
    /// Run label counter file
    pub run_label_file: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            driver: DriverConfig::default(),
            filter: None,
            fail_fast: false,
            output_dir: PathBuf::from("Reports"),
            results_dir: None,
            screenshot_dir: PathBuf::from("Screenshots"),
            run_label_file: PathBuf::from(RUN_LABEL_FILE),
        }
    }
}

impl SuiteConfig {
    /// Parse a YAML document
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Read a YAML file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), "suite config loaded");
        Ok(config)
    }

    /// Defaults, then the `--config` file, then flags
    pub fn resolve(args: &RunArgs) -> CliResult<Self> {
        let base = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.apply_args(args))
    }

    /// Override file values with whatever was given on the command line
    #[must_use]
    pub fn apply_args(mut self, args: &RunArgs) -> Self {
        if let Some(browser) = args.browser {
            self.driver.browser = browser.into();
        }
        if let Some(run_env) = args.run_env {
            self.driver.run_env = run_env.into();
        }
        if let Some(url) = &args.base_url {
            self.driver.base_url.clone_from(url);
        }
        if args.filter.is_some() {
            self.filter.clone_from(&args.filter);
        }
        if args.fail_fast {
            self.fail_fast = true;
        }
        if args.headed {
            self.driver.headless = false;
        }
        if let Some(dir) = &args.output {
            self.output_dir.clone_from(dir);
        }
        if args.results_dir.is_some() {
            self.results_dir.clone_from(&args.results_dir);
        }
        if let Some(dir) = &args.screenshots {
            self.screenshot_dir.clone_from(dir);
        }
        self
    }

    /// How the reporter reacts to a failure
    #[must_use]
    pub const fn failure_mode(&self) -> FailureMode {
        if self.fail_fast {
            FailureMode::StopOnFirst
        } else {
            FailureMode::CollectAll
        }
    }

    /// Where executor.json goes
    #[must_use]
    pub fn results_dir(&self) -> PathBuf {
        self.results_dir.clone().unwrap_or_else(reporter::results_dir)
    }
}
