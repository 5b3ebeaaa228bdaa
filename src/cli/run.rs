//! `run` subcommand: execute a scenario

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::info;

use crate::common::{Error, Result};
use crate::scenario::{Scenario, ScenarioPlayer};
use crate::sequence::{run_sequence, SequenceLog, SequenceSummary};

pub async fn run(
    scenario_path: &Path,
    log_override: Option<PathBuf>,
    continue_on_failure: bool,
    json: bool,
) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let name = scenario.name.clone();
    let log_path = log_override.unwrap_or_else(|| scenario.log_path());
    let continue_on_failure = continue_on_failure || scenario.continue_on_failure;
    let steps_total = scenario.steps.len();

    if !json {
        println!(
            "\n{} {}",
            "Running scenario:".blue().bold(),
            name.white().bold()
        );
        println!("  {}", format!("{steps_total} step(s)").dimmed());
        println!("  {}", format!("log: {}", log_path.display()).dimmed());
        println!();
    }
    info!(scenario = %name, log = %log_path.display(), "starting sequence");

    let mut log = SequenceLog::open(&log_path)?;
    let mut player = ScenarioPlayer::new(scenario);
    let summary = run_sequence(&mut log, &mut player, continue_on_failure).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if summary.failures > 0 {
        let first = summary
            .first_failure
            .unwrap_or_else(|| name.clone());
        return Err(Error::runtime_failure(
            &first,
            format!(
                "{} failing step(s), see {}",
                summary.failures,
                log_path.display()
            ),
        ));
    }
    Ok(())
}

fn print_summary(summary: &SequenceSummary) {
    if summary.failures == 0 {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            format!("{} step(s) completed", summary.steps).green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            format!(
                "{} step(s) logged, {} failure(s)",
                summary.steps, summary.failures
            )
            .red()
            .bold()
        );
        if summary.stopped_early {
            println!("  {}", "stopped at first failure".dimmed());
        }
    }
}
