//! diagrun - drive external diagnostic tools through scripted step sequences
//!
//! Spawns each scenario step as a child process, tails its output live, and
//! records one durable log record per step with fail-fast semantics.

use clap::Parser;
use diagrun::cli;
use diagrun::commands::Commands;
use diagrun::common::logging;

#[derive(Parser)]
#[command(name = "diagrun", about = "Scenario runner for external diagnostic tools")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
