//! Recursive backtracking search over a single worker's board

use crate::aggregator::Aggregator;
use crate::board::Board;
use crate::cancel::CancellationToken;
use crate::error::ObserverError;
use crate::observer::{SearchObserver, notify};

/// Shared, read-only handles a worker needs while searching
#[derive(Clone, Copy)]
pub(crate) struct SearchShared<'a> {
    pub aggregator: &'a Aggregator,
    pub cancel: &'a CancellationToken,
    pub observer: Option<&'a dyn SearchObserver>,
}

/// Backtracking engine owned by one worker.
///
/// Keeps worker-local tallies next to the shared aggregator so per-worker
/// reports need no extra synchronization.
pub(crate) struct Engine<'a> {
    worker_id: usize,
    shared: SearchShared<'a>,
    pub states_explored: u64,
    pub solutions_found: u64,
    pub observer_failures: u64,
    /// Set once the search returned early on the cancellation flag
    pub cut_short: bool,
}

impl<'a> Engine<'a> {
    pub fn new(worker_id: usize, shared: SearchShared<'a>) -> Self {
        Self {
            worker_id,
            shared,
            states_explored: 0,
            solutions_found: 0,
            observer_failures: 0,
            cut_short: false,
        }
    }

    /// Explore every completion of `board` from `row` onwards.
    ///
    /// Rows `0..row` must already be placed without conflicts. The board is
    /// restored to its entry state before returning, cancelled or not.
    pub fn search(&mut self, board: &mut Board, row: usize) {
        if self.shared.cancel.is_stopped() {
            self.cut_short = true;
            return;
        }

        self.shared.aggregator.increment_explored();
        self.states_explored += 1;

        if let Some(observer) = self.shared.observer
            && let Err(e) = notify(observer, board, row)
        {
            self.observer_failed(&e);
        }

        if row == board.size() {
            if let Some(solution) = board.to_solution() {
                self.shared.aggregator.record_solution(solution);
                self.solutions_found += 1;
            }
            return;
        }

        for col in 0..board.size() {
            if board.is_safe(row, col) {
                board.place(row, col);
                self.search(board, row + 1);
                board.remove(row);
            }
        }
    }

    fn observer_failed(&mut self, error: &ObserverError) {
        self.observer_failures += 1;
        self.shared.aggregator.increment_observer_failures();
        if self.observer_failures == 1 {
            tracing::warn!(worker = self.worker_id, "{}", error);
        } else {
            tracing::debug!(worker = self.worker_id, "{}", error);
        }
    }
}
