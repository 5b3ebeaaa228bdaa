//! `exec` subcommand: run one command

use std::path::PathBuf;

use crate::common::{Error, Result};
use crate::invoke::{EnvironmentOverlay, Invocation, InvocationRequest};
use crate::sequence::{SequenceLog, StepOutcome};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    cwd: Option<PathBuf>,
    env_pairs: &[String],
    silent: bool,
    no_capture: bool,
    stdin_lines: &[String],
    log: Option<PathBuf>,
    argv: Vec<String>,
) -> Result<()> {
    let mut overlay = EnvironmentOverlay::new();
    for pair in env_pairs {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(Error::InvalidEnvPair(pair.clone()));
        };
        overlay.set(name, value);
    }

    let mut request = InvocationRequest::new(argv)
        .env(overlay)
        .silent(silent)
        .capture(!no_capture)
        .stdin_writable(!stdin_lines.is_empty());
    if let Some(dir) = cwd {
        request = request.cwd(dir);
    }

    let mut invocation = Invocation::spawn(request);
    if !invocation.failed_to_start() {
        for line in stdin_lines {
            invocation.write_stdin_line(line).await?;
        }
    }
    let result = invocation.wait().await?;

    if let Some(path) = log {
        let mut seq_log = SequenceLog::open(&path)?;
        seq_log.append(&StepOutcome::from(result.clone()))?;
    }

    if let Some(reason) = result.failure() {
        eprintln!("Fail to run command \"{}\": {}", result.command(), reason);
        std::process::exit(127);
    }

    // Non-zero codes travel through unchanged
    std::process::exit(result.exit_code().unwrap_or(1));
}
