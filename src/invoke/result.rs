//! Frozen result of one invocation

use std::process::ExitStatus;

/// What one external-process execution produced
///
/// Built by the invoker when the process exits, is terminated, or fails to
/// start. The text fields are frozen at that point: repeated reads return
/// identical content.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    command: String,
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
    failure: Option<String>,
    pid: Option<u32>,
}

impl InvocationResult {
    pub(crate) fn completed(
        command: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
        pid: Option<u32>,
    ) -> Self {
        Self {
            command,
            // Signal deaths carry no code; -1 marks them as failed without
            // colliding with real codes.
            exit_code: Some(status.code().unwrap_or(-1)),
            stdout,
            stderr,
            failure: None,
            pid,
        }
    }

    /// A command that never started. No process existed, so there is no
    /// exit code, no output, and no pid.
    pub(crate) fn spawn_failed(command: String, reason: String) -> Self {
        Self {
            command,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            failure: Some(reason),
            pid: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn fixture(
        command: &str,
        exit_code: Option<i32>,
        stdout: &str,
        stderr: &str,
        failure: Option<&str>,
    ) -> Self {
        Self {
            command: command.to_string(),
            exit_code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            failure: failure.map(str::to_string),
            pid: None,
        }
    }

    /// Display text of the invoked command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Exit code of the process; `None` only when it never started
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Accumulated standard output, newline-terminated per captured line
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Accumulated standard error, newline-terminated per captured line
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// The captured startup failure, if the command never started
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Process id, when a process existed
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_failed_result_shape() {
        let result =
            InvocationResult::spawn_failed("nope --version".into(), "No such file".into());
        assert_eq!(result.command(), "nope --version");
        assert_eq!(result.exit_code(), None);
        assert_eq!(result.stdout(), "");
        assert_eq!(result.stderr(), "");
        assert_eq!(result.failure(), Some("No such file"));
        assert_eq!(result.pid(), None);
    }

    #[test]
    fn test_repeated_reads_return_identical_text() {
        let result = InvocationResult::spawn_failed("x".into(), "missing".into());
        let first = result.stdout().to_string();
        let second = result.stdout().to_string();
        assert_eq!(first, second);
        assert_eq!(result.failure(), result.failure());
    }
}
