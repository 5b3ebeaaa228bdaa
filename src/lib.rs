//! diagrun - a process-invocation-and-sequencing engine
//!
//! Drives external diagnostic tools: one child process per invocation with
//! its output tailed live by two background readers, and ordered step
//! pipelines with fail-fast policy and a durable per-step log.

pub mod cli;
pub mod commands;
pub mod common;
pub mod invoke;
pub mod scenario;
pub mod sequence;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use invoke::{EnvironmentOverlay, Invocation, InvocationRequest, InvocationResult};
pub use sequence::{run_sequence, SequenceLog, StepOutcome, StepProducer};
