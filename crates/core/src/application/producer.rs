// Producer Worker - bounded insertion loop

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::application::writer::MessageWriter;
use crate::domain::{BoundedQueue, Message, WorkerId};
use crate::error::Result;
use crate::port::{Reporter, ThinkTime};

/// A producer performs a fixed number of iterations: think, build one
/// message, push it, report the send.
pub struct Producer {
    id: WorkerId,
    queue: Arc<BoundedQueue<Message>>,
    writer: MessageWriter,
    think: Arc<dyn ThinkTime>,
    reporter: Arc<dyn Reporter>,
    iterations: u32,
}

impl Producer {
    pub fn new(
        id: WorkerId,
        queue: Arc<BoundedQueue<Message>>,
        writer: MessageWriter,
        think: Arc<dyn ThinkTime>,
        reporter: Arc<dyn Reporter>,
        iterations: u32,
    ) -> Self {
        Self {
            id,
            queue,
            writer,
            think,
            reporter,
            iterations,
        }
    }

    /// Run to completion; returns the number of messages inserted.
    pub fn run(&self) -> Result<u64> {
        debug!(worker = %self.id, iterations = self.iterations, "producer started");

        let mut produced = 0u64;
        for _ in 0..self.iterations {
            self.think.pause();

            let value: u32 = rand::thread_rng().gen();
            let body = format!("hello from {}. My random number is {}", self.id, value);
            let message = self.writer.data(&body);

            self.queue.push(message.clone())?;
            self.reporter.message_sent(self.id, &message);
            produced += 1;
        }

        debug!(worker = %self.id, produced, "producer finished");
        Ok(produced)
    }
}
