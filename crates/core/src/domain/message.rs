// Message Domain Model

use serde::{Deserialize, Serialize};

/// Maximum number of characters a message body may carry.
/// Longer bodies are silently truncated, never rejected.
pub const MESSAGE_BODY_MAX_LEN: usize = 256;

/// Message kind: real data or a termination signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    Data,
    /// Injected by the orchestrator after all producers have finished;
    /// tells the receiving consumer to stop.
    Sentinel,
}

/// A unit of work flowing through the queue.
///
/// Ids are unique and strictly increasing across the process lifetime;
/// they are assigned by the shared [`IdProvider`](crate::port::IdProvider)
/// counter, never by the queue itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub body: String,
    pub kind: MessageKind,
}

impl Message {
    /// Build a data message. The body is truncated to
    /// [`MESSAGE_BODY_MAX_LEN`] characters (on a char boundary).
    pub fn data(id: u64, body: impl Into<String>) -> Self {
        Self {
            id,
            body: truncate_chars(body.into(), MESSAGE_BODY_MAX_LEN),
            kind: MessageKind::Data,
        }
    }

    /// Build a termination signal.
    pub fn sentinel(id: u64) -> Self {
        Self {
            id,
            body: String::new(),
            kind: MessageKind::Sentinel,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.kind == MessageKind::Sentinel
    }
}

// Pure rendering, no shared state: safe to call with or without locks held.
impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "id: {} content: {}", self.id, self.body)
    }
}

/// Truncate to at most `max` characters without splitting a code point.
fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}
