//! Ordered producers of step outcomes

use std::collections::VecDeque;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;

use super::outcome::StepOutcome;

/// Pull-based source of step outcomes
///
/// The runner asks for one outcome at a time and stops asking at the first
/// classified failure when fail-fast is on, so producers that spawn work
/// lazily never run a step past the stop.
#[async_trait]
pub trait StepProducer: Send {
    /// The next outcome, or `None` when the pipeline is done
    async fn next_outcome(&mut self) -> Option<StepOutcome>;
}

/// Ready-made outcomes yielded in order
///
/// For pre-computed pipelines and tests; no work happens when an outcome is
/// pulled.
pub struct QueuedSteps {
    queue: VecDeque<StepOutcome>,
}

impl QueuedSteps {
    pub fn new(outcomes: impl IntoIterator<Item = StepOutcome>) -> Self {
        Self {
            queue: outcomes.into_iter().collect(),
        }
    }
}

#[async_trait]
impl StepProducer for QueuedSteps {
    async fn next_outcome(&mut self) -> Option<StepOutcome> {
        self.queue.pop_front()
    }
}

/// Push-based producers feed a channel; the receiving half is a producer
#[async_trait]
impl StepProducer for mpsc::Receiver<StepOutcome> {
    async fn next_outcome(&mut self) -> Option<StepOutcome> {
        self.recv().await
    }
}

#[async_trait]
impl StepProducer for mpsc::UnboundedReceiver<StepOutcome> {
    async fn next_outcome(&mut self) -> Option<StepOutcome> {
        self.recv().await
    }
}

/// Adapter from any stream of outcomes
pub struct StreamProducer<S>(pub S);

#[async_trait]
impl<S> StepProducer for StreamProducer<S>
where
    S: Stream<Item = StepOutcome> + Unpin + Send,
{
    async fn next_outcome(&mut self) -> Option<StepOutcome> {
        self.0.next().await
    }
}
