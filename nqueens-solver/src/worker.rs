//! Worker loop over one partition of first-row columns

use crate::board::Board;
use crate::engine::{Engine, SearchShared};
use std::ops::Range;

/// What a worker did during one solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    /// Index of the worker, matching its partition
    pub worker_id: usize,
    /// First-row columns assigned to the worker
    pub columns: Range<usize>,
    /// Nodes this worker visited
    pub states_explored: u64,
    /// Solutions this worker published
    pub solutions_found: u64,
    /// Observer calls on this worker that failed
    pub observer_failures: u64,
    /// Whether cancellation left part of the worker's columns unsearched
    pub cancelled: bool,
}

/// Search every start column in `columns` sequentially, each on a fresh board
pub(crate) fn run_worker(
    worker_id: usize,
    columns: Range<usize>,
    board_size: usize,
    shared: SearchShared<'_>,
) -> WorkerReport {
    tracing::trace!(worker = worker_id, ?columns, "worker started");
    let mut engine = Engine::new(worker_id, shared);

    let mut skipped_columns = false;
    for column in columns.clone() {
        if shared.cancel.is_stopped() {
            skipped_columns = true;
            break;
        }
        let mut board = Board::with_first_row(board_size, column);
        engine.search(&mut board, 1);
    }

    let report = WorkerReport {
        worker_id,
        columns,
        states_explored: engine.states_explored,
        solutions_found: engine.solutions_found,
        observer_failures: engine.observer_failures,
        cancelled: skipped_columns || engine.cut_short,
    };
    tracing::trace!(
        worker = worker_id,
        states = report.states_explored,
        solutions = report.solutions_found,
        cancelled = report.cancelled,
        "worker finished"
    );
    report
}
