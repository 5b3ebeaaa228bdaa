//! Step outcomes flowing through a pipeline

use crate::invoke::InvocationResult;

/// What one pipeline step produced
///
/// Producers emit these in order; the runner logs and classifies each one.
/// An outcome is logged once and discarded, never retried.
#[derive(Debug)]
pub enum StepOutcome {
    /// A completed invocation
    Invocation(InvocationResult),
    /// A free-form line for the log, e.g. a phase heading
    Message(String),
    /// A step that could not run
    Failure { command: String, reason: String },
}

impl StepOutcome {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    pub fn failure(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failure {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Short display text identifying the step: the command line, or the
    /// message itself
    pub fn label(&self) -> &str {
        match self {
            Self::Invocation(result) => result.command(),
            Self::Message(text) => text,
            Self::Failure { command, .. } => command,
        }
    }
}

impl From<InvocationResult> for StepOutcome {
    /// Results carrying a captured startup failure become failure outcomes,
    /// so the log records why the command never ran.
    fn from(result: InvocationResult) -> Self {
        match result.failure() {
            Some(reason) => Self::Failure {
                command: result.command().to_string(),
                reason: reason.to_string(),
            },
            None => Self::Invocation(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_failed_result_becomes_failure_outcome() {
        let result = InvocationResult::fixture("nope", None, "", "", Some("No such file"));
        let outcome = StepOutcome::from(result);
        assert!(matches!(
            outcome,
            StepOutcome::Failure { ref command, ref reason }
                if command == "nope" && reason == "No such file"
        ));
    }

    #[test]
    fn test_completed_result_stays_an_invocation() {
        let result = InvocationResult::fixture("echo hello", Some(0), "hello\n", "", None);
        let outcome = StepOutcome::from(result);
        assert!(matches!(outcome, StepOutcome::Invocation(_)));
        assert_eq!(outcome.label(), "echo hello");
    }
}
