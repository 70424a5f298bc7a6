//! Shared result collection for concurrent workers
//!
//! The aggregator is the only cross-thread mutable state of a solve besides
//! the cancellation flag. The counters are lock-free atomics; solutions are
//! appended under a mutex. Neither is guaranteed consistent until every
//! worker has joined. The solution count survives
//! [`take_solutions`](Aggregator::take_solutions), which moves the list out
//! without copying it.

use crate::board::Solution;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Synchronized solution collection and explored-state counter
#[derive(Debug, Default)]
pub struct Aggregator {
    states_explored: AtomicU64,
    solutions_found: AtomicU64,
    observer_failures: AtomicU64,
    solutions: Mutex<Vec<Solution>>,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed board. Safe to call from any worker.
    pub fn record_solution(&self, solution: Solution) {
        self.lock_solutions().push(solution);
        self.solutions_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one visited search node. Safe to call from any worker.
    pub fn increment_explored(&self) {
        self.states_explored.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn increment_observer_failures(&self) {
        self.observer_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Nodes visited so far
    pub fn states_explored(&self) -> u64 {
        self.states_explored.load(Ordering::Relaxed)
    }

    /// Observer calls that failed so far
    pub fn observer_failures(&self) -> u64 {
        self.observer_failures.load(Ordering::Relaxed)
    }

    /// Number of solutions recorded since the last reset, taken or not
    pub fn solutions_found(&self) -> usize {
        self.solutions_found.load(Ordering::Relaxed) as usize
    }

    /// Copy of the solutions still held, in arrival order
    pub fn solutions(&self) -> Vec<Solution> {
        self.lock_solutions().clone()
    }

    /// Move the held solutions out, leaving an empty list behind
    pub(crate) fn take_solutions(&self) -> Vec<Solution> {
        std::mem::take(&mut *self.lock_solutions())
    }

    /// Clear all counters and solutions for a fresh solve
    pub(crate) fn reset(&self) {
        self.states_explored.store(0, Ordering::SeqCst);
        self.solutions_found.store(0, Ordering::SeqCst);
        self.observer_failures.store(0, Ordering::SeqCst);
        self.lock_solutions().clear();
    }

    // Appends are the only mutation, so a poisoned lock still holds a
    // consistent prefix of results.
    fn lock_solutions(&self) -> MutexGuard<'_, Vec<Solution>> {
        self.solutions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
