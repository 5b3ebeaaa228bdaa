//! Background output tailing
//!
//! Each capturing invocation owns two readers, one per stream. A reader
//! appends every line to its accumulator and, unless the request was silent,
//! echoes it live. The readers share nothing with each other; the only state
//! a reader shares with the caller is its accumulator, behind a mutex.
//!
//! Reading to end-of-stream doubles as the final drain: the pipe reaches EOF
//! only after the child has exited and every byte it wrote has been
//! consumed, so joining the readers guarantees no line is lost to the
//! exit race and none is read twice.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::common::{Error, Result};

/// Accumulated text of one stream, shared with the caller for live snapshots
pub(crate) type OutputBuffer = Arc<Mutex<String>>;

pub(crate) fn new_buffer() -> OutputBuffer {
    Arc::new(Mutex::new(String::new()))
}

/// Read a buffer's current content
pub(crate) fn snapshot(buffer: &OutputBuffer) -> String {
    buffer
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Take a buffer's final content once its reader has been joined
pub(crate) fn take(buffer: &OutputBuffer) -> String {
    std::mem::take(&mut *buffer.lock().unwrap_or_else(PoisonError::into_inner))
}

/// The two background readers of one invocation
pub(crate) struct OutputTailing {
    stdout_task: JoinHandle<io::Result<()>>,
    stderr_task: JoinHandle<io::Result<()>>,
}

impl OutputTailing {
    /// Start one reader per stream
    pub(crate) fn start<O, E>(
        stdout: O,
        stderr: E,
        stdout_buf: OutputBuffer,
        stderr_buf: OutputBuffer,
        silent: bool,
    ) -> Self
    where
        O: AsyncRead + Unpin + Send + 'static,
        E: AsyncRead + Unpin + Send + 'static,
    {
        Self {
            stdout_task: tokio::spawn(tail_stream(stdout, stdout_buf, silent)),
            stderr_task: tokio::spawn(tail_stream(stderr, stderr_buf, silent)),
        }
    }

    /// Join both readers
    ///
    /// Returns once both streams have been drained to end-of-stream. Both
    /// tasks are always joined, even when the first reports an error.
    pub(crate) async fn join(self, command: &str) -> Result<()> {
        let stdout_res = join_reader(self.stdout_task, command).await;
        let stderr_res = join_reader(self.stderr_task, command).await;
        debug!(command, "output readers joined");
        stdout_res.and(stderr_res)
    }
}

/// One reader loop: accumulate every line, echo unless silent
///
/// Blank and whitespace-only lines are accumulated too; whether stderr is
/// empty decides success, so they must not be dropped on the floor.
async fn tail_stream<R>(stream: R, buffer: OutputBuffer, silent: bool) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    while let Some(line) = lines.next_line().await? {
        {
            let mut buf = buffer.lock().unwrap_or_else(PoisonError::into_inner);
            buf.push_str(&line);
            buf.push('\n');
        }
        if !silent {
            println!("    {line}");
        }
    }
    Ok(())
}

async fn join_reader(task: JoinHandle<io::Result<()>>, command: &str) -> Result<()> {
    match task.await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(Error::drain_failure(command, e)),
        Err(e) => Err(Error::drain_failure(command, format!("reader task panicked: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_accumulates_every_line_to_eof() {
        let (mut tx, rx) = tokio::io::duplex(64);
        let (tx_err, rx_err) = tokio::io::duplex(64);
        drop(tx_err);

        let out = new_buffer();
        let err = new_buffer();
        let tailing = OutputTailing::start(rx, rx_err, out.clone(), err.clone(), true);

        tx.write_all(b"first\n\nsecond").await.unwrap();
        drop(tx);

        tailing.join("demo").await.unwrap();
        assert_eq!(take(&out), "first\n\nsecond\n");
        assert_eq!(take(&err), "");
    }

    #[tokio::test]
    async fn test_snapshot_grows_while_running() {
        let (mut tx, rx) = tokio::io::duplex(64);
        let (tx_err, rx_err) = tokio::io::duplex(64);
        drop(tx_err);

        let out = new_buffer();
        let err = new_buffer();
        let tailing = OutputTailing::start(rx, rx_err, out.clone(), err.clone(), true);

        tx.write_all(b"ready\n").await.unwrap();
        while snapshot(&out).is_empty() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(snapshot(&out), "ready\n");

        drop(tx);
        tailing.join("demo").await.unwrap();
    }
}
