//! Per-node observation hook

use crate::board::Board;
use crate::error::{ObserverError, panic_message};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Receives every visited search node, partial and terminal.
///
/// Called synchronously on the worker thread that visited the node, so a
/// slow observer throttles only that worker. The observer gets an owned
/// snapshot of the board; it never sees the worker's live board or the
/// shared aggregator.
///
/// Returning an error (or panicking) is reported as an observer failure; the
/// worker keeps searching.
///
/// # Example
///
/// ```
/// use nqueens_solver::{Board, Solver, SolverConfig};
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
///
/// let visited = Arc::new(AtomicU64::new(0));
/// let counter = Arc::clone(&visited);
/// let solver = Solver::with_observer(SolverConfig::new(4), move |_board: Board, _row: usize| {
///     counter.fetch_add(1, Ordering::Relaxed);
/// })
/// .unwrap();
///
/// solver.solve();
/// assert_eq!(visited.load(Ordering::Relaxed), solver.stats().states_explored);
/// ```
pub trait SearchObserver: Send + Sync {
    /// Observe the board as it stands on entry to `row`
    fn on_node(&self, board: Board, row: usize) -> Result<(), ObserverError>;
}

impl<F> SearchObserver for F
where
    F: Fn(Board, usize) + Send + Sync,
{
    fn on_node(&self, board: Board, row: usize) -> Result<(), ObserverError> {
        self(board, row);
        Ok(())
    }
}

/// Invoke the observer, converting a panic into [`ObserverError::Panicked`]
pub(crate) fn notify(
    observer: &dyn SearchObserver,
    board: &Board,
    row: usize,
) -> Result<(), ObserverError> {
    let snapshot = board.clone();
    catch_unwind(AssertUnwindSafe(|| observer.on_node(snapshot, row)))
        .unwrap_or_else(|payload| Err(ObserverError::Panicked(panic_message(payload.as_ref()))))
}
