// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod reporter;
pub mod think_time;

// Re-exports
pub use id_provider::IdProvider;
pub use reporter::Reporter;
pub use think_time::ThinkTime;
