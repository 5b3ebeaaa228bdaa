//! Lazy scenario execution
//!
//! The player is a [`StepProducer`]: each step is spawned only when the
//! runner pulls its outcome, so a fail-fast stop means the remaining steps
//! never start. Filesystem effects of step N are complete before step N+1
//! spawns.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::config::{Scenario, ScenarioStep};
use crate::invoke::{EnvironmentOverlay, Invocation, InvocationRequest};
use crate::sequence::{StepOutcome, StepProducer};

/// Executes scenario steps one at a time, as pulled
pub struct ScenarioPlayer {
    base_env: EnvironmentOverlay,
    steps: VecDeque<ScenarioStep>,
    ready_poll: Duration,
}

impl ScenarioPlayer {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            base_env: scenario.env,
            steps: scenario.steps.into(),
            ready_poll: Duration::from_millis(200),
        }
    }

    /// Poll interval for monitor `ready` markers
    pub fn ready_poll(mut self, poll: Duration) -> Self {
        self.ready_poll = poll;
        self
    }

    async fn play(&self, step: ScenarioStep) -> StepOutcome {
        match step {
            ScenarioStep::Command {
                argv,
                cwd,
                env,
                silent,
                capture,
                stdin,
            } => {
                let mut request = InvocationRequest::new(argv)
                    .env(env.merged_over(&self.base_env))
                    .silent(silent)
                    .capture(capture)
                    .stdin_writable(!stdin.is_empty());
                if let Some(dir) = cwd {
                    request = request.cwd(dir);
                }

                let mut invocation = Invocation::spawn(request);
                if !invocation.failed_to_start() {
                    for line in &stdin {
                        if let Err(e) = invocation.write_stdin_line(line).await {
                            // wait() below reports whatever went wrong
                            debug!(error = %e, "stdin write abandoned");
                            break;
                        }
                    }
                }
                settle(invocation).await
            }
            ScenarioStep::Message { text } => StepOutcome::message(text),
            ScenarioStep::Monitor {
                argv,
                cwd,
                env,
                silent,
                seconds,
                ready,
            } => {
                let mut request = InvocationRequest::new(argv)
                    .env(env.merged_over(&self.base_env))
                    .silent(silent);
                if let Some(dir) = cwd {
                    request = request.cwd(dir);
                }

                let invocation = Invocation::spawn(request);
                if invocation.failed_to_start() {
                    return settle(invocation).await;
                }

                if let Some(marker) = &ready {
                    debug!(marker, "waiting for readiness marker");
                    if let Err(e) = invocation.wait_for_output(marker, self.ready_poll).await {
                        let command = invocation.command_line().to_string();
                        return StepOutcome::failure(command, e.to_string());
                    }
                }

                tokio::time::sleep(Duration::from_secs(seconds)).await;
                let command = invocation.command_line().to_string();
                match invocation.terminate().await {
                    Ok(result) => result.into(),
                    Err(e) => StepOutcome::failure(command, e.to_string()),
                }
            }
        }
    }
}

/// Wait an invocation out and wrap what it produced
///
/// Drain errors become failure outcomes so the log records them before the
/// runner decides whether to stop.
async fn settle(invocation: Invocation) -> StepOutcome {
    let command = invocation.command_line().to_string();
    match invocation.wait().await {
        Ok(result) => result.into(),
        Err(e) => StepOutcome::failure(command, e.to_string()),
    }
}

#[async_trait]
impl StepProducer for ScenarioPlayer {
    async fn next_outcome(&mut self) -> Option<StepOutcome> {
        let step = self.steps.pop_front()?;
        Some(self.play(step).await)
    }
}
