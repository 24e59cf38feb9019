// Consumer Worker - bounded removal loop with sentinel exit

use std::sync::Arc;

use tracing::debug;

use crate::domain::{BoundedQueue, Message, WorkerId};
use crate::error::Result;
use crate::port::{Reporter, ThinkTime};

/// How a consumer's run ended, with its consumption count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerOutcome {
    /// Data messages removed (sentinels excluded)
    pub consumed: u64,
    /// Whether the worker stopped because it received its sentinel
    pub saw_sentinel: bool,
}

/// A consumer performs at most `max_iterations` removals: think, pop one
/// message, report it; a sentinel ends the worker immediately.
pub struct Consumer {
    id: WorkerId,
    queue: Arc<BoundedQueue<Message>>,
    think: Arc<dyn ThinkTime>,
    reporter: Arc<dyn Reporter>,
    max_iterations: u64,
}

impl Consumer {
    pub fn new(
        id: WorkerId,
        queue: Arc<BoundedQueue<Message>>,
        think: Arc<dyn ThinkTime>,
        reporter: Arc<dyn Reporter>,
        max_iterations: u64,
    ) -> Self {
        Self {
            id,
            queue,
            think,
            reporter,
            max_iterations,
        }
    }

    /// Run until the sentinel arrives or the iteration bound is reached.
    pub fn run(&self) -> Result<ConsumerOutcome> {
        debug!(worker = %self.id, max_iterations = self.max_iterations, "consumer started");

        let mut outcome = ConsumerOutcome {
            consumed: 0,
            saw_sentinel: false,
        };

        for _ in 0..self.max_iterations {
            self.think.pause();

            let message = self.queue.pop()?;
            if message.is_sentinel() {
                self.reporter.sentinel_received(self.id);
                outcome.saw_sentinel = true;
                break;
            }

            self.reporter.message_received(self.id, &message);
            outcome.consumed += 1;
        }

        debug!(
            worker = %self.id,
            consumed = outcome.consumed,
            saw_sentinel = outcome.saw_sentinel,
            "consumer finished"
        );
        Ok(outcome)
    }
}
