//! Error types for the solver library

use std::ops::Range;
use thiserror::Error;

/// Error type for solver construction and all-or-nothing result conversion
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// The board size is below 1
    #[error("Invalid configuration: board size must be at least 1, got {board_size}")]
    InvalidConfiguration { board_size: i64 },
    /// One or more workers terminated abnormally during a solve
    #[error("{} worker(s) failed during solve", .0.len())]
    WorkerFailures(Vec<WorkerFailure>),
}

/// A worker that terminated abnormally.
///
/// The other workers keep running and publishing their own results; the
/// failure is reported after the join barrier alongside the partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Worker {worker_id} (columns {}..{}) failed: {message}", .columns.start, .columns.end)]
pub struct WorkerFailure {
    /// Index of the failed worker
    pub worker_id: usize,
    /// First-row columns assigned to the worker
    pub columns: Range<usize>,
    /// Panic payload rendered as text
    pub message: String,
}

/// Error type an observation hook may report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObserverError {
    /// The hook reported a failure
    #[error("Observer failed: {0}")]
    Failed(String),
    /// The hook panicked
    #[error("Observer panicked: {0}")]
    Panicked(String),
}

/// Render a panic payload as text
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
