// Reporter Port - worker events out to the console layer
//
// The core never formats console output itself; it raises events through
// this port and the composition root decides how they are rendered.

use tracing::info;

use crate::domain::{Message, WorkerId};

/// Sink for the per-operation worker events
pub trait Reporter: Send + Sync {
    /// A producer successfully inserted `message`.
    fn message_sent(&self, worker: WorkerId, message: &Message);

    /// A consumer successfully removed a data `message`.
    fn message_received(&self, worker: WorkerId, message: &Message);

    /// A consumer removed its termination signal and is about to stop.
    fn sentinel_received(&self, worker: WorkerId);
}

/// Renders one log line per event via `tracing` (production)
pub struct LogReporter;

impl Reporter for LogReporter {
    fn message_sent(&self, worker: WorkerId, message: &Message) {
        info!(worker = %worker, id = message.id, "sent a message");
    }

    fn message_received(&self, worker: WorkerId, message: &Message) {
        info!(worker = %worker, "received a message: {}", message);
    }

    fn sentinel_received(&self, worker: WorkerId) {
        info!(worker = %worker, "received termination signal, stopping");
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// One recorded worker event
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Sent { worker: WorkerId, id: u64 },
        Received { worker: WorkerId, message: Message },
        Sentinel { worker: WorkerId },
    }

    /// Collects every event for later assertions (testing)
    #[derive(Default)]
    pub struct RecordingReporter {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingReporter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        /// Ids of data messages received, in removal order.
        pub fn received_ids(&self) -> Vec<u64> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Received { message, .. } => Some(message.id),
                    _ => None,
                })
                .collect()
        }

        /// Ids of messages sent, in insertion-report order.
        pub fn sent_ids(&self) -> Vec<u64> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Sent { id, .. } => Some(id),
                    _ => None,
                })
                .collect()
        }

        /// Workers that reported a sentinel, in receipt order.
        pub fn sentinel_workers(&self) -> Vec<WorkerId> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Event::Sentinel { worker } => Some(worker),
                    _ => None,
                })
                .collect()
        }
    }

    impl Reporter for RecordingReporter {
        fn message_sent(&self, worker: WorkerId, message: &Message) {
            self.events.lock().unwrap().push(Event::Sent {
                worker,
                id: message.id,
            });
        }

        fn message_received(&self, worker: WorkerId, message: &Message) {
            self.events.lock().unwrap().push(Event::Received {
                worker,
                message: message.clone(),
            });
        }

        fn sentinel_received(&self, worker: WorkerId) {
            self.events.lock().unwrap().push(Event::Sentinel { worker });
        }
    }
}
