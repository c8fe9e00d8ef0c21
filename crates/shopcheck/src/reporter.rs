//! Scenario outcomes, run summaries and report files.
//!
//! ```text
//! scenario result ──► Outcome::classify ──► Reporter::record
//!                                              │
//!                     StopOnFirst: Err after the first non-pass
//!                     CollectAll:  keep going
//!                                              │
//!                     write_json ──► Report_YYYY-MM-DD_HH-MM-SS.json
//! ```
//!
//! A run also bumps the counter in `run_label.txt` and drops an
//! `executor.json` into the results directory so report viewers can label
//! the build.

use crate::result::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Results directory used when `ALLURE_RESULTS_PATH` is unset
pub const DEFAULT_RESULTS_DIR: &str = "Reports/allure-results/default";

/// Environment variable overriding [`DEFAULT_RESULTS_DIR`]
pub const RESULTS_DIR_ENV: &str = "ALLURE_RESULTS_PATH";

/// Counter file for run labels
pub const RUN_LABEL_FILE: &str = "Reports/run_label.txt";

/// How the run reacts to a scenario that did not pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Stop after the first failure or error
    StopOnFirst,
    /// Run every scenario
    #[default]
    CollectAll,
}

/// Outcome of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Every check held
    Passed,
    /// A check or verification did not hold
    Failed,
    /// The scenario could not finish (parse, element, timeout, driver)
    Errored,
    /// Not run
    Skipped,
}

impl Outcome {
    /// Map a scenario result to its outcome
    #[must_use]
    pub fn classify(result: &ShopResult<()>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(e) if e.is_assertion() => Self::Failed,
            Err(_) => Self::Errored,
        }
    }

    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Failed or errored
    #[must_use]
    pub const fn is_problem(self) -> bool {
        matches!(self, Self::Failed | Self::Errored)
    }
}

/// Record of one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub name: String,
    pub outcome: Outcome,
    /// Wall time in milliseconds
    pub duration_ms: u64,
    /// Error text for failed and errored scenarios
    pub error: Option<String>,
    /// Failure screenshot, when one was captured
    pub screenshot: Option<PathBuf>,
}

impl ScenarioRecord {
    /// Build a record from a finished scenario
    #[must_use]
    pub fn from_result(name: impl Into<String>, duration: Duration, result: &ShopResult<()>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::classify(result),
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            error: result.as_ref().err().map(ToString::to_string),
            screenshot: None,
        }
    }

    /// A scenario that was not run
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Skipped,
            duration_ms: 0,
            error: None,
            screenshot: None,
        }
    }

    /// Attach a failure screenshot
    #[must_use]
    pub fn with_screenshot(mut self, path: PathBuf) -> Self {
        self.screenshot = Some(path);
        self
    }
}

/// Counts per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
}

/// The JSON document written after a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique id of this run
    pub run_id: uuid::Uuid,
    pub suite: String,
    pub run_label: Option<u64>,
    pub started_at: String,
    pub finished_at: String,
    pub summary: Summary,
    pub scenarios: Vec<ScenarioRecord>,
}

/// Collects scenario records for one run
#[derive(Debug)]
pub struct Reporter {
    records: Vec<ScenarioRecord>,
    failure_mode: FailureMode,
    suite_name: String,
    run_id: uuid::Uuid,
    run_label: Option<u64>,
    started_at: chrono::DateTime<chrono::Local>,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(FailureMode::default())
    }
}

impl Reporter {
    #[must_use]
    pub fn new(failure_mode: FailureMode) -> Self {
        Self {
            records: Vec::new(),
            failure_mode,
            suite_name: "shopcheck".to_string(),
            run_id: uuid::Uuid::new_v4(),
            run_label: None,
            started_at: chrono::Local::now(),
        }
    }

    /// Stop after the first scenario that does not pass
    #[must_use]
    pub fn stop_on_first() -> Self {
        Self::new(FailureMode::StopOnFirst)
    }

    /// Run everything
    #[must_use]
    pub fn collect_all() -> Self {
        Self::new(FailureMode::CollectAll)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.suite_name = name.into();
        self
    }

    #[must_use]
    pub const fn with_run_label(mut self, label: u64) -> Self {
        self.run_label = Some(label);
        self
    }

    pub const fn run_id(&self) -> uuid::Uuid {
        self.run_id
    }

    pub const fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Record a scenario.
    ///
    /// # Errors
    ///
    /// In [`FailureMode::StopOnFirst`], an error naming the scenario when it
    /// failed or errored; the record is kept either way.
    pub fn record(&mut self, record: ScenarioRecord) -> ShopResult<()> {
        match record.outcome {
            Outcome::Passed => tracing::info!(scenario = %record.name, ms = record.duration_ms, "passed"),
            Outcome::Skipped => tracing::info!(scenario = %record.name, "skipped"),
            Outcome::Failed | Outcome::Errored => tracing::error!(
                scenario = %record.name,
                outcome = ?record.outcome,
                error = record.error.as_deref().unwrap_or_default(),
                "did not pass"
            ),
        }
        let stop = (self.failure_mode == FailureMode::StopOnFirst && record.outcome.is_problem())
            .then(|| {
                format!(
                    "stopping after '{}': {}",
                    record.name,
                    record.error.clone().unwrap_or_default()
                )
            });
        self.records.push(record);
        match stop {
            Some(message) => Err(ShopError::assertion(message)),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    /// Records that failed or errored
    #[must_use]
    pub fn problems(&self) -> Vec<&ScenarioRecord> {
        self.records.iter().filter(|r| r.outcome.is_problem()).collect()
    }

    #[must_use]
    pub fn counts(&self) -> Summary {
        let count = |outcome| self.records.iter().filter(|r| r.outcome == outcome).count();
        Summary {
            total: self.records.len(),
            passed: count(Outcome::Passed),
            failed: count(Outcome::Failed),
            errored: count(Outcome::Errored),
            skipped: count(Outcome::Skipped),
        }
    }

    /// No scenario failed or errored
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.records.iter().all(|r| !r.outcome.is_problem())
    }

    #[must_use]
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.records.iter().map(|r| r.duration_ms).sum())
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        let c = self.counts();
        format!(
            "{}: {}/{} passed, {} failed, {} errored, {} skipped in {:.1}s",
            self.suite_name,
            c.passed,
            c.total,
            c.failed,
            c.errored,
            c.skipped,
            self.total_duration().as_secs_f64()
        )
    }

    #[must_use]
    pub fn report(&self) -> Report {
        Report {
            run_id: self.run_id,
            suite: self.suite_name.clone(),
            run_label: self.run_label,
            started_at: self.started_at.to_rfc3339(),
            finished_at: chrono::Local::now().to_rfc3339(),
            summary: self.counts(),
            scenarios: self.records.clone(),
        }
    }

    /// Write the JSON report into `dir`, returning its path
    pub fn write_json(&self, dir: &Path) -> ShopResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(report_file_name(&chrono::Local::now()));
        std::fs::write(&path, serde_json::to_string_pretty(&self.report())?)?;
        tracing::info!(path = %path.display(), "report written");
        Ok(path)
    }
}

/// `Report_YYYY-MM-DD_HH-MM-SS.json` for `at`
#[must_use]
pub fn report_file_name<Tz: chrono::TimeZone>(at: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Report_{}.json", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Results directory from `ALLURE_RESULTS_PATH`, else the default
#[must_use]
pub fn results_dir() -> PathBuf {
    std::env::var_os(RESULTS_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR), PathBuf::from)
}

/// Read the last run label from `path`, increment it and write it back.
///
/// A missing file counts as label 0, so the first run is 1.
pub fn next_run_label(path: &Path) -> ShopResult<u64> {
    let current = match std::fs::read_to_string(path) {
        Ok(text) => text.trim().parse::<u64>().map_err(|e| ShopError::Config {
            message: format!("{} does not hold a run label: {e}", path.display()),
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
        Err(e) => return Err(e.into()),
    };
    let next = current + 1;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, next.to_string())?;
    tracing::info!(label = next, "run label");
    Ok(next)
}

/// Build metadata read by report viewers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    pub report_name: String,
    pub build_order: u64,
    pub report_url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub build_name: String,
}

impl Executor {
    /// Executor entry for a local run
    #[must_use]
    pub fn local(label: u64) -> Self {
        Self {
            report_name: format!("Run #{label}"),
            build_order: label,
            report_url: String::new(),
            name: "Local".to_string(),
            kind: "Local".to_string(),
            build_name: format!("Build {label}"),
        }
    }
}

/// Write `executor.json` into `dir`, creating it if needed
pub fn write_executor_file(dir: &Path, label: u64) -> ShopResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("executor.json");
    std::fs::write(&path, serde_json::to_string_pretty(&Executor::local(label))?)?;
    tracing::info!(path = %path.display(), "executor file written");
    Ok(path)
}
