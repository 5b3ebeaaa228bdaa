//! Error types for the diagnostic runner
//!
//! Spawn failures are not represented here: a command that never started is
//! data (a failed [`InvocationResult`](crate::invoke::InvocationResult)), so
//! pipelines can log it and decide whether to continue. The variants below
//! cover everything that genuinely aborts an operation.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the diagnostic runner
#[derive(Error, Debug)]
pub enum Error {
    // === Invocation Errors ===
    #[error("Failed to run command \"{command}\": {reason}")]
    SpawnFailure { command: String, reason: String },

    #[error("Command \"{command}\" failed: {reason}")]
    RuntimeFailure { command: String, reason: String },

    #[error("Lost output of \"{command}\": {reason}")]
    DrainFailure { command: String, reason: String },

    #[error("Standard input of \"{command}\" is not piped. Build the request with stdin_writable(true)")]
    StdinNotPiped { command: String },

    #[error("Output of \"{command}\" is not captured. Build the request with capture(true)")]
    OutputNotCaptured { command: String },

    // === Sequence Log Errors ===
    #[error("Failed to open sequence log '{path}': {error}")]
    LogOpen { path: String, error: String },

    #[error("Failed to append to sequence log '{path}': {error}")]
    LogWrite { path: String, error: String },

    // === Scenario Errors ===
    #[error("Failed to read scenario '{path}': {error}")]
    ScenarioRead { path: String, error: String },

    #[error("Invalid scenario file '{path}': {error}")]
    ScenarioParse { path: String, error: String },

    #[error("Step {index} of the scenario has an empty argv")]
    EmptyArgv { index: usize },

    // === Preflight Errors ===
    #[error("{0} required tool(s) missing from PATH")]
    ToolsMissing(usize),

    // === CLI Errors ===
    #[error("Invalid --env value '{0}', expected NAME=VALUE")]
    InvalidEnvPair(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a spawn failure error with command context
    pub fn spawn_failure(command: &str, reason: impl ToString) -> Self {
        Self::SpawnFailure {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a runtime failure error with command context
    pub fn runtime_failure(command: &str, reason: impl ToString) -> Self {
        Self::RuntimeFailure {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a drain failure error with command context
    pub fn drain_failure(command: &str, reason: impl ToString) -> Self {
        Self::DrainFailure {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a log open error for the given path
    pub fn log_open(path: &std::path::Path, error: io::Error) -> Self {
        Self::LogOpen {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a log write error for the given path
    pub fn log_write(path: &std::path::Path, error: io::Error) -> Self {
        Self::LogWrite {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a scenario read error for the given path
    pub fn scenario_read(path: &std::path::Path, error: impl ToString) -> Self {
        Self::ScenarioRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a scenario parse error for the given path
    pub fn scenario_parse(path: &std::path::Path, error: impl ToString) -> Self {
        Self::ScenarioParse {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
