// Domain Layer - Pure business logic and entities

pub mod message;
pub mod queue;
pub mod worker;

// Re-exports
pub use message::{Message, MessageKind, MESSAGE_BODY_MAX_LEN};
pub use queue::{BoundedQueue, MAX_QUEUE_CAPACITY};
pub use worker::{Role, WorkerId};
