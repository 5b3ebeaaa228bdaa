//! Durable sequence log
//!
//! One record per step, blank-line separated, UTF-8, append-only. Each
//! append flushes before returning, so a crash mid-run still leaves a
//! complete trail of everything that ran.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::outcome::StepOutcome;
use crate::common::{paths, Error, Result};

/// Append-only record file for one sequence run
pub struct SequenceLog {
    path: PathBuf,
    file: File,
}

impl SequenceLog {
    /// Open for appending, creating parent directories as needed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        paths::ensure_parent_dir(&path).map_err(|e| Error::log_open(&path, e))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::log_open(&path, e))?;
        debug!(path = %path.display(), "sequence log open");
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one outcome's record and flush it to disk
    pub fn append(&mut self, outcome: &StepOutcome) -> Result<()> {
        let record = format_record(outcome);
        self.file
            .write_all(record.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|e| Error::log_write(&self.path, e))
    }
}

/// Format one outcome as its log record, trailing blank line included
///
/// - invocation: `Run command: <cmdline>`, the captured stdout lines, then
///   the captured stderr lines (omitted when empty)
/// - message: the text verbatim
/// - failure: `Fail to run command "<cmdline>": <reason>`
pub fn format_record(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Invocation(result) => {
            let mut record = format!("Run command: {}\n", result.command());
            push_text(&mut record, result.stdout());
            if !result.stderr().is_empty() {
                push_text(&mut record, result.stderr());
            }
            record.push('\n');
            record
        }
        StepOutcome::Message(text) => {
            let mut record = String::new();
            push_text(&mut record, text);
            record.push('\n');
            record
        }
        StepOutcome::Failure { command, reason } => {
            format!("Fail to run command \"{command}\": {reason}\n\n")
        }
    }
}

/// Append text ensuring it ends with exactly one trailing newline
fn push_text(record: &mut String, text: &str) {
    record.push_str(text);
    if !text.is_empty() && !text.ends_with('\n') {
        record.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::InvocationResult;

    #[test]
    fn test_echo_hello_record_bytes() {
        let result = InvocationResult::fixture("echo hello", Some(0), "hello\n", "", None);
        let record = format_record(&StepOutcome::Invocation(result));
        assert_eq!(record, "Run command: echo hello\nhello\n\n");
    }

    #[test]
    fn test_stderr_section_follows_stdout() {
        let result =
            InvocationResult::fixture("dotnet build", Some(1), "Restoring\n", "error CS1002\n", None);
        let record = format_record(&StepOutcome::Invocation(result));
        assert_eq!(record, "Run command: dotnet build\nRestoring\nerror CS1002\n\n");
    }

    #[test]
    fn test_empty_output_record() {
        let result = InvocationResult::fixture("true", Some(0), "", "", None);
        let record = format_record(&StepOutcome::Invocation(result));
        assert_eq!(record, "Run command: true\n\n");
    }

    #[test]
    fn test_message_record_verbatim() {
        let record = format_record(&StepOutcome::message("SDK installed, starting validation"));
        assert_eq!(record, "SDK installed, starting validation\n\n");
    }

    #[test]
    fn test_failure_record() {
        let record = format_record(&StepOutcome::failure("nope --version", "No such file"));
        assert_eq!(record, "Fail to run command \"nope --version\": No such file\n\n");
    }

    #[test]
    fn test_append_creates_parents_and_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("run.log");

        let mut log = SequenceLog::open(&path).unwrap();
        log.append(&StepOutcome::message("first")).unwrap();
        log.append(&StepOutcome::failure("x", "boom")).unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\n\nFail to run command \"x\": boom\n\n");
    }

    #[test]
    fn test_reopening_appends_rather_than_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");

        let mut log = SequenceLog::open(&path).unwrap();
        log.append(&StepOutcome::message("one")).unwrap();
        drop(log);

        let mut log = SequenceLog::open(&path).unwrap();
        log.append(&StepOutcome::message("two")).unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "one\n\ntwo\n\n");
    }
}
