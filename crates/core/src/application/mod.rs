// Application Layer - Worker protocol and orchestration

pub mod constants;
pub mod consumer;
pub mod orchestrator;
pub mod producer;
pub mod writer;


// Re-exports
pub use consumer::{Consumer, ConsumerOutcome};
pub use orchestrator::{Orchestrator, RunConfig, RunReport};
pub use producer::Producer;
pub use writer::MessageWriter;
