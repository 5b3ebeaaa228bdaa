//! CLI command definitions
//!
//! Defines the clap commands for the diagnostic runner.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scenario's steps in order, one durable log record per step
    Run {
        /// Path to the scenario TOML file
        scenario: PathBuf,

        /// Write the sequence log here instead of the scenario's log path
        #[arg(long)]
        log: Option<PathBuf>,

        /// Keep running after a failed step
        #[arg(long)]
        continue_on_failure: bool,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Run a single command and exit with its code
    Exec {
        /// Working directory for the child
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Overlay variable (NAME=VALUE), can be repeated
        #[arg(long = "env", short = 'e', value_name = "NAME=VALUE")]
        env: Vec<String>,

        /// Suppress the live output echo
        #[arg(long)]
        silent: bool,

        /// Leave the child's output connected to the console
        #[arg(long)]
        no_capture: bool,

        /// Line written to the child's stdin, can be repeated; stdin is
        /// closed after the last line
        #[arg(long = "stdin", value_name = "LINE")]
        stdin: Vec<String>,

        /// Also append the step's record to this log file
        #[arg(long)]
        log: Option<PathBuf>,

        /// The command and its arguments
        #[arg(last = true, required = true)]
        argv: Vec<String>,
    },

    /// Verify every tool a scenario needs is on PATH
    Check {
        /// Path to the scenario TOML file
        scenario: PathBuf,
    },
}
