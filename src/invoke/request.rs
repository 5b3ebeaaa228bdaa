//! Invocation request builder

use std::path::{Path, PathBuf};

use super::env::EnvironmentOverlay;
use super::invoker::Invocation;

/// One external-process execution request
///
/// Built by a collaborator, consumed once by
/// [`Invocation::spawn`]. The consuming builder makes requests immutable
/// once built.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    argv: Vec<String>,
    cwd: Option<PathBuf>,
    env: EnvironmentOverlay,
    stdin_writable: bool,
    capture: bool,
    silent: bool,
}

impl InvocationRequest {
    /// Create a request from an argument vector; the first element is the
    /// executable. An empty argv is accepted here and reported as a spawn
    /// failure, so producers can yield it like any other bad command.
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            cwd: None,
            env: EnvironmentOverlay::new(),
            stdin_writable: false,
            capture: true,
            silent: false,
        }
    }

    /// Set the working directory for the child
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Set the environment overlay for the child
    pub fn env(mut self, overlay: EnvironmentOverlay) -> Self {
        self.env = overlay;
        self
    }

    /// Add one overlay variable
    pub fn env_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.set(name, value);
        self
    }

    /// Pipe the child's stdin so the caller can write to it. Waiting closes
    /// the pipe first, signalling end-of-input to children that read until
    /// stdin closes.
    pub fn stdin_writable(mut self, writable: bool) -> Self {
        self.stdin_writable = writable;
        self
    }

    /// Capture stdout/stderr into the invocation's accumulators (default).
    /// With capture off the streams stay connected to the inherited console.
    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    /// Suppress the live echo of captured lines
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// The executable, i.e. the first argv element
    pub fn executable(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn overlay(&self) -> &EnvironmentOverlay {
        &self.env
    }

    pub fn is_stdin_writable(&self) -> bool {
        self.stdin_writable
    }

    pub fn is_capture(&self) -> bool {
        self.capture
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Display text of the command, argv joined with single spaces
    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }

    /// Consume the request and spawn the process, shorthand for
    /// [`Invocation::spawn`]
    pub fn spawn(self) -> Invocation {
        Invocation::spawn(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_joins_argv() {
        let request = InvocationRequest::new(["dotnet", "--info"]);
        assert_eq!(request.command_line(), "dotnet --info");
        assert_eq!(request.executable(), Some("dotnet"));
    }

    #[test]
    fn test_defaults() {
        let request = InvocationRequest::new(["true"]);
        assert!(request.is_capture());
        assert!(!request.is_silent());
        assert!(!request.is_stdin_writable());
        assert!(request.working_dir().is_none());
        assert!(request.overlay().is_empty());
    }

    #[test]
    fn test_empty_argv_has_no_executable() {
        let request = InvocationRequest::new(Vec::<String>::new());
        assert_eq!(request.executable(), None);
        assert_eq!(request.command_line(), "");
    }
}
