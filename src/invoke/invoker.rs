//! Child process invoker
//!
//! [`Invocation::spawn`] starts one external process per request and hands
//! the caller the live handle. The caller decides what happens next: wait
//! for exit, drive stdin, watch for a readiness marker, or terminate a
//! monitor-style child after a timed window.
//!
//! A command that cannot start is not an error here. The failed handle
//! yields a result carrying the captured failure, so step producers treat
//! unlaunchable commands like any other outcome.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};
use tracing::debug;

use super::request::InvocationRequest;
use super::result::InvocationResult;
use super::tailing::{self, OutputBuffer, OutputTailing};
use crate::common::{Error, Result};

/// Live handle of one spawn attempt, 1:1 with one external process
///
/// Exclusively owned by the caller. [`wait`](Self::wait) and
/// [`terminate`](Self::terminate) consume the handle, so the
/// join/drain/release sequence runs exactly once; dropping a live handle
/// kills the child and the readers run out on their own.
pub struct Invocation {
    command: String,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    tailing: Option<OutputTailing>,
    stdout_buf: OutputBuffer,
    stderr_buf: OutputBuffer,
    spawn_failure: Option<String>,
    capturing: bool,
    pid: Option<u32>,
}

impl Invocation {
    /// Spawn the external process described by the request
    ///
    /// With capture on, both output streams are piped and one tailing
    /// reader per stream starts immediately; otherwise the child stays
    /// connected to the inherited console. Unless the request was silent,
    /// the command line is echoed before the spawn and every captured line
    /// is echoed as it arrives, indented four spaces.
    pub fn spawn(request: InvocationRequest) -> Self {
        let command = request.command_line();

        let Some(executable) = request.executable() else {
            return Self::failed(command, "no executable given (empty argv)".to_string());
        };

        if !request.is_silent() {
            println!("Run command: {command}");
        }
        debug!(command = %command, cwd = ?request.working_dir(), "spawning child");

        let mut cmd = Command::new(executable);
        cmd.args(&request.argv()[1..]);
        if let Some(dir) = request.working_dir() {
            cmd.current_dir(dir);
        }
        cmd.envs(request.overlay().iter());
        cmd.stdin(if request.is_stdin_writable() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        if request.is_capture() {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        cmd.kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(command = %command, error = %e, "spawn failed");
                return Self::failed(command, e.to_string());
            }
        };

        let pid = child.id();
        let stdin = child.stdin.take();
        let stdout_buf = tailing::new_buffer();
        let stderr_buf = tailing::new_buffer();

        let tailing = if request.is_capture() {
            match (child.stdout.take(), child.stderr.take()) {
                (Some(out), Some(err)) => Some(OutputTailing::start(
                    out,
                    err,
                    stdout_buf.clone(),
                    stderr_buf.clone(),
                    request.is_silent(),
                )),
                _ => {
                    let _ = child.start_kill();
                    return Self::failed(command, "child spawned without piped output".to_string());
                }
            }
        } else {
            None
        };

        Self {
            command,
            child: Some(child),
            stdin,
            tailing,
            stdout_buf,
            stderr_buf,
            spawn_failure: None,
            capturing: request.is_capture(),
            pid,
        }
    }

    fn failed(command: String, reason: String) -> Self {
        Self {
            command,
            child: None,
            stdin: None,
            tailing: None,
            stdout_buf: tailing::new_buffer(),
            stderr_buf: tailing::new_buffer(),
            spawn_failure: Some(reason),
            capturing: false,
            pid: None,
        }
    }

    /// Wait for the child to exit and freeze the result
    ///
    /// Closes stdin first when the request piped it, so children that read
    /// until end-of-input get to finish. Both tailing readers are joined
    /// before the result is built; their accumulated text is complete up to
    /// the instant of exit.
    pub async fn wait(mut self) -> Result<InvocationResult> {
        if let Some(reason) = self.spawn_failure.take() {
            return Ok(InvocationResult::spawn_failed(self.command, reason));
        }
        drop(self.stdin.take());

        let status = match self.child.as_mut() {
            Some(child) => child.wait().await?,
            None => {
                return Err(Error::runtime_failure(
                    &self.command,
                    "process handle already consumed",
                ))
            }
        };
        self.settle(status).await
    }

    /// Kill the child, then run the same join/drain/release sequence as a
    /// normal exit
    ///
    /// Ends a timed monitoring window. Output written before the kill
    /// lands in the result exactly as for a voluntary exit.
    pub async fn terminate(mut self) -> Result<InvocationResult> {
        if let Some(reason) = self.spawn_failure.take() {
            return Ok(InvocationResult::spawn_failed(self.command, reason));
        }
        drop(self.stdin.take());

        let status = match self.child.as_mut() {
            Some(child) => {
                debug!(command = %self.command, "terminating child");
                if let Err(e) = child.start_kill() {
                    debug!(command = %self.command, error = %e, "kill not delivered; child may have exited");
                }
                child.wait().await?
            }
            None => {
                return Err(Error::runtime_failure(
                    &self.command,
                    "process handle already consumed",
                ))
            }
        };
        self.settle(status).await
    }

    async fn settle(mut self, status: ExitStatus) -> Result<InvocationResult> {
        if let Some(tailing) = self.tailing.take() {
            tailing.join(&self.command).await?;
        }
        let stdout = tailing::take(&self.stdout_buf);
        let stderr = tailing::take(&self.stderr_buf);
        Ok(InvocationResult::completed(
            self.command,
            status,
            stdout,
            stderr,
            self.pid,
        ))
    }

    /// Write one line to the child's stdin
    ///
    /// Drives interactive tools: send each command, then wait, which closes
    /// the pipe. Requires the request to have piped stdin.
    pub async fn write_stdin_line(&mut self, line: &str) -> Result<()> {
        if let Some(reason) = &self.spawn_failure {
            return Err(Error::spawn_failure(&self.command, reason));
        }
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(Error::StdinNotPiped {
                command: self.command.clone(),
            });
        };
        stdin.write_all(line.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await?;
        Ok(())
    }

    /// Suspend until the accumulated stdout contains `marker`
    ///
    /// Used to await readiness lines such as "Application started" before
    /// the next step proceeds. There is no internal timeout; callers bound
    /// the wait externally when they need one.
    pub async fn wait_for_output(&self, marker: &str, poll: Duration) -> Result<()> {
        if let Some(reason) = &self.spawn_failure {
            return Err(Error::spawn_failure(&self.command, reason));
        }
        if !self.capturing {
            return Err(Error::OutputNotCaptured {
                command: self.command.clone(),
            });
        }
        loop {
            if tailing::snapshot(&self.stdout_buf).contains(marker) {
                return Ok(());
            }
            tokio::time::sleep(poll).await;
        }
    }

    /// Display text of the invoked command
    pub fn command_line(&self) -> &str {
        &self.command
    }

    /// Whether the spawn itself failed
    pub fn failed_to_start(&self) -> bool {
        self.spawn_failure.is_some()
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Current accumulated stdout; grows monotonically until exit
    pub fn stdout_snapshot(&self) -> String {
        tailing::snapshot(&self.stdout_buf)
    }

    /// Current accumulated stderr; grows monotonically until exit
    pub fn stderr_snapshot(&self) -> String {
        tailing::snapshot(&self.stderr_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_failure_is_data_and_starts_no_readers() {
        let request = InvocationRequest::new(["definitely-not-a-binary-xyz", "--version"]);
        let invocation = Invocation::spawn(request);

        assert!(invocation.failed_to_start());
        assert!(invocation.tailing.is_none());
        assert!(invocation.child.is_none());

        let result = invocation.wait().await.unwrap();
        assert_eq!(result.command(), "definitely-not-a-binary-xyz --version");
        assert_eq!(result.exit_code(), None);
        assert!(result.failure().is_some());
    }

    #[tokio::test]
    async fn test_empty_argv_is_a_spawn_failure() {
        let invocation = Invocation::spawn(InvocationRequest::new(Vec::<String>::new()));
        assert!(invocation.failed_to_start());
        let result = invocation.wait().await.unwrap();
        assert!(result.failure().unwrap().contains("empty argv"));
    }

    #[tokio::test]
    async fn test_echo_hello_is_captured() {
        let request = InvocationRequest::new(["echo", "hello"]).silent(true);
        let result = Invocation::spawn(request).wait().await.unwrap();

        assert_eq!(result.exit_code(), Some(0));
        assert_eq!(result.stdout(), "hello\n");
        assert_eq!(result.stderr(), "");
        assert!(result.failure().is_none());
        assert!(result.pid().is_some());
    }

    #[tokio::test]
    async fn test_write_stdin_line_requires_piped_stdin() {
        let request = InvocationRequest::new(["cat"]).silent(true);
        let mut invocation = Invocation::spawn(request);
        let err = invocation.write_stdin_line("hi").await.unwrap_err();
        assert!(matches!(err, Error::StdinNotPiped { .. }));
        let _ = invocation.terminate().await.unwrap();
    }
}
