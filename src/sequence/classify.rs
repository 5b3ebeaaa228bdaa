//! Success/failure decision for one step outcome

use super::outcome::StepOutcome;

/// Classification of one step, driving the fail-fast decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    Failure,
}

/// Classify one outcome, no side effects
///
/// Precedence: a captured startup failure fails first, then any non-empty
/// stderr (whitespace-only text included), then an explicit failure
/// outcome. Everything else, messages included, is success. Exit codes are
/// not consulted: 0-means-success is a convention between collaborators
/// and the code travels through unreinterpreted.
pub fn classify(outcome: &StepOutcome) -> StepStatus {
    match outcome {
        StepOutcome::Invocation(result) => {
            if result.failure().is_some() || !result.stderr().is_empty() {
                StepStatus::Failure
            } else {
                StepStatus::Success
            }
        }
        StepOutcome::Message(_) => StepStatus::Success,
        StepOutcome::Failure { .. } => StepStatus::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::InvocationResult;

    #[test]
    fn test_clean_invocation_is_success() {
        let result = InvocationResult::fixture("echo hello", Some(0), "hello\n", "", None);
        assert_eq!(classify(&StepOutcome::Invocation(result)), StepStatus::Success);
    }

    #[test]
    fn test_captured_failure_wins() {
        let result = InvocationResult::fixture("nope", None, "", "", Some("No such file"));
        assert_eq!(classify(&StepOutcome::Invocation(result)), StepStatus::Failure);
    }

    #[test]
    fn test_any_stderr_is_failure() {
        let result = InvocationResult::fixture("dotnet build", Some(0), "ok\n", "warning\n", None);
        assert_eq!(classify(&StepOutcome::Invocation(result)), StepStatus::Failure);
    }

    #[test]
    fn test_whitespace_only_stderr_is_failure() {
        let result = InvocationResult::fixture("tool", Some(0), "", "   \n", None);
        assert_eq!(classify(&StepOutcome::Invocation(result)), StepStatus::Failure);
    }

    #[test]
    fn test_nonzero_exit_with_empty_stderr_is_not_reinterpreted() {
        let result = InvocationResult::fixture("grep -q x f", Some(1), "", "", None);
        assert_eq!(classify(&StepOutcome::Invocation(result)), StepStatus::Success);
    }

    #[test]
    fn test_message_is_success() {
        assert_eq!(
            classify(&StepOutcome::message("phase one done")),
            StepStatus::Success
        );
    }

    #[test]
    fn test_explicit_failure_outcome() {
        assert_eq!(
            classify(&StepOutcome::failure("dotnet trace", "timed out")),
            StepStatus::Failure
        );
    }
}
