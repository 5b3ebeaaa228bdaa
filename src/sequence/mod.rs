//! Step sequencing
//!
//! An ordered producer of step outcomes, a pure classifier, and a runner
//! that writes one durable log record per step and stops at the first
//! failure unless told to continue.

pub mod classify;
pub mod log;
pub mod outcome;
pub mod producer;
pub mod runner;

pub use classify::{classify, StepStatus};
pub use log::{format_record, SequenceLog};
pub use outcome::StepOutcome;
pub use producer::{QueuedSteps, StepProducer, StreamProducer};
pub use runner::{run_sequence, SequenceSummary};
