//! Suite execution
//!
//! Every scenario gets its own [`Session`]: launch, run, screenshot on
//! failure, close. Results go to a [`Reporter`]; once it asks to stop, the
//! remaining scenarios are recorded as skipped.

use crate::config::SuiteConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use shopcheck::reporter::{next_run_label, write_executor_file};
use shopcheck::{BrowserDriver, DriverConfig, Reporter, Scenario, ScenarioRecord, Session, ShopResult};
use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

/// Files produced by a finished run
#[derive(Debug)]
pub struct RunOutcome {
    /// Every scenario record
    pub reporter: Reporter,
    /// Run label taken from the counter file
    pub run_label: u64,
    /// JSON report path
    pub report_path: PathBuf,
    /// executor.json path
    pub executor_path: PathBuf,
}

impl RunOutcome {
    /// `Ok` when nothing failed or errored
    pub fn into_result(self) -> CliResult<Self> {
        if self.reporter.all_passed() {
            return Ok(self);
        }
        let counts = self.reporter.counts();
        Err(CliError::SuiteFailed {
            failed: counts.failed + counts.errored,
            total: counts.total,
        })
    }
}

/// Run one scenario in a fresh session
async fn run_one<D, L, Fut>(
    scenario: &Scenario<D>,
    launch: &L,
    config: &SuiteConfig,
) -> ScenarioRecord
where
    D: BrowserDriver + 'static,
    L: Fn(DriverConfig) -> Fut,
    Fut: Future<Output = ShopResult<Session<D>>>,
{
    let start = Instant::now();
    let mut session = match launch(config.driver.clone()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(scenario = scenario.name, error = %e, "session did not start");
            return ScenarioRecord::from_result(scenario.name, start.elapsed(), &Err(e));
        }
    };

    let result = scenario.run(&mut session).await;
    let mut record = ScenarioRecord::from_result(scenario.name, start.elapsed(), &result);

    if record.outcome.is_problem() {
        match session.capture_failure(scenario.name, &config.screenshot_dir).await {
            Ok(path) => record = record.with_screenshot(path),
            Err(e) => tracing::warn!(scenario = scenario.name, error = %e, "no failure screenshot"),
        }
    }
    if let Err(e) = session.close().await {
        tracing::warn!(scenario = scenario.name, error = %e, "session did not close cleanly");
    }
    record
}

/// Run `scenarios` in order, recording into `reporter`
pub async fn run_scenarios<D, L, Fut>(
    scenarios: &[Scenario<D>],
    launch: L,
    config: &SuiteConfig,
    reporter: &mut Reporter,
    progress: &mut ProgressReporter,
) where
    D: BrowserDriver + 'static,
    L: Fn(DriverConfig) -> Fut,
    Fut: Future<Output = ShopResult<Session<D>>>,
{
    progress.start_progress(scenarios.len() as u64, "scenarios");
    let mut remaining = scenarios.iter();

    for scenario in remaining.by_ref() {
        progress.set_message(scenario.name);
        let record = run_one(scenario, &launch, config).await;
        progress.scenario(&record);
        if let Err(e) = reporter.record(record) {
            tracing::warn!(error = %e, "stopping run");
            break;
        }
    }

    for scenario in remaining {
        let record = ScenarioRecord::skipped(scenario.name);
        progress.scenario(&record);
        // Skips never trip the stop condition.
        let _ = reporter.record(record);
    }
    progress.finish();
}

/// Take a run label, run the suite, write executor.json and the report
pub async fn run_suite<D, L, Fut>(
    scenarios: &[Scenario<D>],
    launch: L,
    config: &SuiteConfig,
    progress: &mut ProgressReporter,
) -> CliResult<RunOutcome>
where
    D: BrowserDriver + 'static,
    L: Fn(DriverConfig) -> Fut,
    Fut: Future<Output = ShopResult<Session<D>>>,
{
    let run_label = next_run_label(&config.run_label_file)?;
    let mut reporter = Reporter::new(config.failure_mode()).with_run_label(run_label);
    tracing::info!(
        run_label,
        run_id = %reporter.run_id(),
        scenarios = scenarios.len(),
        browser = %config.driver.browser,
        base_url = %config.driver.base_url,
        "run started"
    );
    progress.header(&format!("Run #{run_label}: {} scenarios", scenarios.len()));

    run_scenarios(scenarios, launch, config, &mut reporter, progress).await;

    let executor_path = write_executor_file(&config.results_dir(), run_label)?;
    let report_path = reporter.write_json(&config.output_dir)?;
    progress.summary(reporter.counts(), reporter.total_duration());
    progress.info(&format!("report: {}", report_path.display()));
    tracing::info!(summary = %reporter.summary(), "run finished");

    Ok(RunOutcome {
        reporter,
        run_label,
        report_path,
        executor_path,
    })
}
