// Think Time Port - randomized inter-operation delay

use std::thread;
use std::time::Duration;

use rand::Rng;

/// Source of the jitter a worker sleeps between operations.
///
/// The pause is thread-local and carries no contract toward other
/// threads; tests substitute a no-op implementation.
pub trait ThinkTime: Send + Sync {
    /// Block the calling thread for one think period.
    fn pause(&self);
}

/// Uniform random delay in `[0, max]`, drawn from the calling thread's
/// own RNG so concurrent workers do not share a seed (production).
pub struct UniformThinkTime {
    max: Duration,
}

impl UniformThinkTime {
    pub fn from_secs(max_secs: u64) -> Self {
        Self {
            max: Duration::from_secs(max_secs),
        }
    }
}

impl ThinkTime for UniformThinkTime {
    fn pause(&self) {
        let max_millis = self.max.as_secs().saturating_mul(1000);
        if max_millis == 0 {
            return;
        }
        let millis = rand::thread_rng().gen_range(0..=max_millis);
        thread::sleep(Duration::from_millis(millis));
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Never sleeps (deterministic tests)
    pub struct NoThinkTime;

    impl ThinkTime for NoThinkTime {
        fn pause(&self) {}
    }
}
