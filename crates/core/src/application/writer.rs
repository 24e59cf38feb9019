// Message Writer - stamps fresh ids onto outgoing messages

use std::sync::Arc;

use crate::domain::Message;
use crate::port::IdProvider;

/// Builds messages with ids from the shared counter.
///
/// The id critical section lives inside the provider and is distinct
/// from the queue's lock, so producers contend on it only for the length
/// of one counter increment.
#[derive(Clone)]
pub struct MessageWriter {
    ids: Arc<dyn IdProvider>,
}

impl MessageWriter {
    pub fn new(ids: Arc<dyn IdProvider>) -> Self {
        Self { ids }
    }

    /// Build a data message; the body is truncated to the domain bound.
    pub fn data(&self, body: &str) -> Message {
        Message::data(self.ids.next_id(), body)
    }

    /// Build a termination signal.
    pub fn sentinel(&self) -> Message {
        Message::sentinel(self.ids.next_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::id_provider::SequentialIds;

    #[test]
    fn test_writer_assigns_increasing_ids() {
        let writer = MessageWriter::new(Arc::new(SequentialIds::new()));
        let a = writer.data("first");
        let b = writer.data("second");
        let s = writer.sentinel();
        assert_eq!(a.id, 0);
        assert_eq!(b.id, 1);
        assert_eq!(s.id, 2);
        assert!(s.is_sentinel());
    }

    #[test]
    fn test_clones_share_the_counter() {
        let writer = MessageWriter::new(Arc::new(SequentialIds::new()));
        let other = writer.clone();
        assert_eq!(writer.data("a").id, 0);
        assert_eq!(other.data("b").id, 1);
    }
}
