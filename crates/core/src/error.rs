// Central Error Type for the Application

use thiserror::Error;

use crate::domain::Role;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid queue capacity: {0}")]
    InvalidCapacity(usize),

    #[error("Failed to spawn {role} thread: {source}")]
    Spawn {
        role: Role,
        #[source]
        source: std::io::Error,
    },

    #[error("A {role} worker panicked before completing")]
    Join { role: Role },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
