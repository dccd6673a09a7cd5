//! CLI command handling
//!
//! Resolves configuration, runs the suite and formats output.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use colored::Colorize;

use crate::api::{ApiClient, ApiTransport};
use crate::commands::{Commands, RunArgs};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::testing::{self, Case, Report, RunnerState};

/// Dispatch a CLI command
///
/// Returns whether the command succeeded; `Ok(false)` means at least one
/// case failed and the process should exit with code 1.
pub async fn dispatch(command: Commands) -> Result<bool> {
    match command {
        Commands::Run(args) => run(args).await,
        Commands::List => {
            list_cases();
            Ok(true)
        }
    }
}

/// Load the config file and apply command-line overrides
pub fn resolve_config(args: &RunArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(base_url) = &args.base_url {
        config.target.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeouts.request_secs = timeout;
    }

    Ok(config)
}

/// Cases to run, optionally narrowed by a case-insensitive name filter
pub fn select_cases(filter: Option<&str>) -> Result<Vec<Case>> {
    let Some(filter) = filter else {
        return Ok(Case::ALL.to_vec());
    };

    let needle = filter.to_lowercase();
    let cases: Vec<Case> = Case::ALL
        .into_iter()
        .filter(|c| c.name().to_lowercase().contains(&needle))
        .collect();

    if cases.is_empty() {
        return Err(Error::Config(format!("No cases match '{}'", filter)));
    }
    Ok(cases)
}

async fn run(args: RunArgs) -> Result<bool> {
    let config = resolve_config(&args)?;
    let cases = select_cases(args.only.as_deref())?;

    tracing::debug!(
        base_url = %config.target.base_url,
        timeout_secs = config.timeouts.request_secs,
        cases = cases.len(),
        "starting run"
    );

    let client = ApiClient::new(&config.target.base_url, config.timeouts.request())?;
    let transport: Arc<dyn ApiTransport> = Arc::new(client);
    let base_url = transport.base_url().to_string();
    let mut state = RunnerState::new(transport, config.accounts.clone());

    let started_at = Utc::now().to_rfc3339();
    let started = Instant::now();

    testing::print_banner(&base_url);
    let summary = testing::run_suite(&mut state, &cases).await;
    testing::print_summary(&summary, state.results());

    if let Some(path) = &args.report {
        let report = Report {
            base_url: &base_url,
            started_at,
            duration_ms: started.elapsed().as_millis() as u64,
            summary,
            results: state.results(),
        };
        testing::write_report(path, &report)?;
        println!("\nJSON report saved to: {}", path.display());
    }

    Ok(summary.all_passed())
}

fn list_cases() {
    println!("{}", "Cases (in execution order):".bold());
    for (i, case) in Case::ALL.iter().enumerate() {
        let (method, path) = case.endpoint();
        println!(
            "  {:>2}. {:<28} {} {}",
            i + 1,
            case.name(),
            method.cyan(),
            path.dimmed()
        );
    }
}
