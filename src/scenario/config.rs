//! Scenario file types
//!
//! Scenarios are TOML files describing an ordered step pipeline: commands
//! run to completion, informational messages, and timed monitor windows.
//! Collaborators (install scripts, CI) write these; the runner consumes
//! them.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::{paths, Error, Result};
use crate::invoke::EnvironmentOverlay;

/// A scenario loaded from a TOML file
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Name of the scenario; also names the default log file
    pub name: String,
    /// Sequence log path; when omitted, derived from the name under the
    /// platform data directory
    pub log: Option<PathBuf>,
    /// Keep running after a failed step
    #[serde(default)]
    pub continue_on_failure: bool,
    /// Overlay applied to every command in the scenario
    #[serde(default)]
    pub env: EnvironmentOverlay,
    /// The ordered steps
    #[serde(rename = "step", default)]
    pub steps: Vec<ScenarioStep>,
}

/// One scenario step
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Run a command to completion
    Command {
        argv: Vec<String>,
        cwd: Option<PathBuf>,
        /// Per-step overlay; wins over the scenario-wide one
        #[serde(default)]
        env: EnvironmentOverlay,
        #[serde(default)]
        silent: bool,
        #[serde(default = "default_capture")]
        capture: bool,
        /// Lines written to the child's stdin before waiting; implies a
        /// piped stdin that waiting closes
        #[serde(default)]
        stdin: Vec<String>,
    },
    /// Write a line to the log
    Message { text: String },
    /// Run in the background for a timed window, then terminate
    Monitor {
        argv: Vec<String>,
        cwd: Option<PathBuf>,
        #[serde(default)]
        env: EnvironmentOverlay,
        #[serde(default)]
        silent: bool,
        /// Length of the window in seconds
        seconds: u64,
        /// Stdout marker to await before the window starts, e.g.
        /// "Application started". Waits as long as it takes.
        ready: Option<String>,
    },
}

fn default_capture() -> bool {
    true
}

impl Scenario {
    /// Load and validate a scenario file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::scenario_read(path, e))?;
        let scenario: Scenario =
            toml::from_str(&text).map_err(|e| Error::scenario_parse(path, e))?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            if let Some(argv) = step.argv() {
                if argv.is_empty() {
                    return Err(Error::EmptyArgv { index: index + 1 });
                }
            }
        }
        Ok(())
    }

    /// Resolved log path: the explicit `log` field or the default derived
    /// from the scenario name
    pub fn log_path(&self) -> PathBuf {
        self.log
            .clone()
            .unwrap_or_else(|| paths::default_log_path(&self.name))
    }
}

impl ScenarioStep {
    /// The step's argv, for steps that run a process
    pub fn argv(&self) -> Option<&[String]> {
        match self {
            Self::Command { argv, .. } | Self::Monitor { argv, .. } => Some(argv),
            Self::Message { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Scenario {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_minimal_scenario() {
        let scenario = parse(
            r#"
            name = "smoke"

            [[step]]
            kind = "command"
            argv = ["dotnet", "--info"]
            "#,
        );
        assert_eq!(scenario.name, "smoke");
        assert!(!scenario.continue_on_failure);
        assert_eq!(scenario.steps.len(), 1);
        match &scenario.steps[0] {
            ScenarioStep::Command {
                argv,
                silent,
                capture,
                stdin,
                ..
            } => {
                assert_eq!(argv, &["dotnet", "--info"]);
                assert!(!silent);
                assert!(*capture);
                assert!(stdin.is_empty());
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn test_env_overlays_and_step_kinds() {
        let scenario = parse(
            r#"
            name = "trace collection"
            log = "logs/trace.log"
            continue_on_failure = true

            [env]
            DOTNET_CLI_TELEMETRY_OPTOUT = "1"

            [[step]]
            kind = "message"
            text = "starting trace"

            [[step]]
            kind = "monitor"
            argv = ["dotnet-counters", "monitor"]
            seconds = 5
            ready = "Application started"

            [[step]]
            kind = "command"
            argv = ["dotnet", "build"]
            silent = true

            [step.env]
            DOTNET_ROOT = "/opt/dotnet"
            "#,
        );
        assert!(scenario.continue_on_failure);
        assert_eq!(scenario.log_path(), PathBuf::from("logs/trace.log"));
        assert_eq!(scenario.env.iter().count(), 1);
        assert_eq!(scenario.steps.len(), 3);
        match &scenario.steps[1] {
            ScenarioStep::Monitor { seconds, ready, .. } => {
                assert_eq!(*seconds, 5);
                assert_eq!(ready.as_deref(), Some("Application started"));
            }
            other => panic!("unexpected step: {other:?}"),
        }
        match &scenario.steps[2] {
            ScenarioStep::Command { env, .. } => {
                assert_eq!(env.iter().next(), Some(("DOTNET_ROOT", "/opt/dotnet")));
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn test_empty_argv_is_rejected() {
        let scenario = parse(
            r#"
            name = "bad"

            [[step]]
            kind = "command"
            argv = []
            "#,
        );
        let err = scenario.validate().unwrap_err();
        assert!(matches!(err, Error::EmptyArgv { index: 1 }));
    }

    #[test]
    fn test_default_log_path_comes_from_name() {
        let scenario = parse(r#"name = "dotnet sdk smoke""#);
        assert!(scenario
            .log_path()
            .ends_with("dotnet-sdk-smoke.log"));
    }
}
