// ID Provider Port (for deterministic testing)

use std::sync::{Mutex, PoisonError};

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Hand out the next unique message id (strictly increasing)
    fn next_id(&self) -> u64;
}

/// Process-wide sequential counter (production).
///
/// The counter sits behind its own lock, deliberately separate from the
/// queue's lock: id assignment contention never serializes against queue
/// traffic.
pub struct SequentialIds {
    next: Mutex<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Mutex::new(first),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdProvider for SequentialIds {
    fn next_id(&self) -> u64 {
        // A u64 cannot be left half-updated, so a poisoned lock is still
        // a consistent counter; recover instead of propagating the panic.
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let id = *next;
        *next += 1;
        id
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Always returns the same id (for tests that only care about shape)
    pub struct FixedIds(pub u64);

    impl IdProvider for FixedIds {
        fn next_id(&self) -> u64 {
            self.0
        }
    }
}
