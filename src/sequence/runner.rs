//! Fail-fast step sequencing

use serde::Serialize;
use tracing::{info, warn};

use super::classify::{classify, StepStatus};
use super::log::SequenceLog;
use super::producer::StepProducer;
use crate::common::Result;

/// Accounting of one sequence run
#[derive(Debug, Clone, Serialize)]
pub struct SequenceSummary {
    /// Outcomes pulled and logged
    pub steps: usize,
    /// Outcomes classified as failures
    pub failures: usize,
    /// Whether the run stopped at a failure instead of exhausting the producer
    pub stopped_early: bool,
    /// Label of the first failing step, if any
    pub first_failure: Option<String>,
}

/// Drive a producer until it is exhausted or a failure stops it
///
/// Every outcome is appended to the log, flushed, and only then classified;
/// the failing record is always on disk before the stop decision. With
/// `continue_on_failure` false the producer is not consulted again after a
/// failure, so lazily-executing producers never start the remaining steps.
/// The policy flag is required: call sites must choose.
pub async fn run_sequence(
    log: &mut SequenceLog,
    producer: &mut (dyn StepProducer + '_),
    continue_on_failure: bool,
) -> Result<SequenceSummary> {
    let mut summary = SequenceSummary {
        steps: 0,
        failures: 0,
        stopped_early: false,
        first_failure: None,
    };

    while let Some(outcome) = producer.next_outcome().await {
        log.append(&outcome)?;
        summary.steps += 1;

        if classify(&outcome) == StepStatus::Failure {
            summary.failures += 1;
            if summary.first_failure.is_none() {
                summary.first_failure = Some(outcome.label().to_string());
            }
            if continue_on_failure {
                warn!(step = outcome.label(), "step failed, continuing");
            } else {
                warn!(step = outcome.label(), "step failed, stopping sequence");
                summary.stopped_early = true;
                break;
            }
        }
    }

    info!(
        steps = summary.steps,
        failures = summary.failures,
        "sequence finished"
    );
    Ok(summary)
}
