//! shopcheck: end-to-end checks for the Swag Labs storefront
//!
//! ## Usage
//!
//! ```bash
//! shopcheck list                              # Registered scenarios
//! shopcheck run                               # Every scenario, headless chrome
//! shopcheck run --filter sort --fail-fast     # Sorting scenarios only
//! shopcheck verify sort --mode lohi '$7.99' '$9.99'
//! ```

use clap::Parser;
use shopcheck_cli::{
    handlers, logging, Cli, CliConfig, CliError, CliResult, Commands, RunArgs, Verbosity,
    VerifyCommand,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(&config)?;

    match cli.command {
        Commands::Run(args) => run_suite(&config, &args),
        Commands::List(args) => {
            println!("{}", handlers::render_list(&args)?);
            Ok(())
        }
        Commands::Verify(VerifyCommand::Price(args)) => {
            println!("{}", handlers::verify_price(&args)?);
            Ok(())
        }
        Commands::Verify(VerifyCommand::Sort(args)) => {
            println!("{}", handlers::verify_sort(&args)?);
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(cli.color.into())
        .with_log_json(cli.log_json)
        .with_log_file(&cli.log_file)
}

#[cfg(feature = "browser")]
fn run_suite(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    use shopcheck::{scenarios, ChromiumDriver, Session};
    use shopcheck_cli::{ProgressReporter, SuiteConfig};

    let suite = SuiteConfig::resolve(args)?;
    let selected = scenarios::select::<ChromiumDriver>(suite.filter.as_deref());
    if selected.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "no scenario matches '{}'",
            suite.filter.as_deref().unwrap_or_default()
        )));
    }

    let mut progress = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(shopcheck_cli::run_suite(
        &selected,
        Session::<ChromiumDriver>::launch,
        &suite,
        &mut progress,
    ))?;
    outcome.into_result().map(|_| ())
}

#[cfg(not(feature = "browser"))]
fn run_suite(_config: &CliConfig, _args: &RunArgs) -> CliResult<()> {
    Err(CliError::config(
        "built without browser support; rebuild with --features browser",
    ))
}
