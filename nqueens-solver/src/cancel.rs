//! Cooperative cancellation shared by all workers of a solver

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared stop flag.
///
/// Clones observe the same flag. Workers poll it at every recursion entry,
/// so a stop takes effect no later than each worker's next search node.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    stopped: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create an unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal all holders to stop. Idempotent.
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Check whether a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    pub(crate) fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }
}
