//! CLI command handling
//!
//! Dispatches CLI commands to their handlers and formats output.

mod check;
mod exec;
mod run;

use crate::commands::Commands;
use crate::common::Result;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            scenario,
            log,
            continue_on_failure,
            json,
        } => run::run(&scenario, log, continue_on_failure, json).await,

        Commands::Exec {
            cwd,
            env,
            silent,
            no_capture,
            stdin,
            log,
            argv,
        } => exec::run(cwd, &env, silent, no_capture, &stdin, log, argv).await,

        Commands::Check { scenario } => check::run(&scenario),
    }
}
