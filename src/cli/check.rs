//! `check` subcommand: preflight a scenario's tools

use std::collections::BTreeSet;
use std::path::Path;

use colored::Colorize;
use which::which;

use crate::common::{Error, Result};
use crate::scenario::Scenario;

pub fn run(scenario_path: &Path) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;

    println!(
        "\n{} {}",
        "Checking tools for:".blue().bold(),
        scenario.name.white().bold()
    );

    let mut missing = 0;
    let mut seen = BTreeSet::new();
    for step in &scenario.steps {
        let Some(executable) = step.argv().and_then(|argv| argv.first()) else {
            continue;
        };
        if !seen.insert(executable.clone()) {
            continue;
        }
        match which(executable) {
            Ok(path) => {
                println!(
                    "  {} {} {}",
                    "✓".green(),
                    executable,
                    format!("({})", path.display()).dimmed()
                );
            }
            Err(_) => {
                println!("  {} {} {}", "✗".red(), executable, "not found on PATH".red());
                missing += 1;
            }
        }
    }

    if missing > 0 {
        return Err(Error::ToolsMissing(missing));
    }
    println!("\n{}", "All tools present.".green());
    Ok(())
}
