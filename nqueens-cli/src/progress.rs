//! Search progress printing through the solver's observation hook

use crate::output::render_progress;
use nqueens_solver::{Board, ObserverError, SearchObserver};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prints every `every`-th visited node of a solve to stdout
pub struct ProgressPrinter {
    every: u64,
    visited: AtomicU64,
}

impl ProgressPrinter {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            visited: AtomicU64::new(0),
        }
    }

    /// Step number of the next node if it is due for printing
    fn next_due_step(&self) -> Option<u64> {
        let step = self.visited.fetch_add(1, Ordering::Relaxed) + 1;
        (step % self.every == 0).then_some(step)
    }
}

impl SearchObserver for ProgressPrinter {
    fn on_node(&self, board: Board, row: usize) -> Result<(), ObserverError> {
        let Some(step) = self.next_due_step() else {
            return Ok(());
        };
        let text = render_progress(step, row, board.size(), board.placed());
        // One locked write per step keeps concurrent workers from interleaving
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text).map_err(|e| ObserverError::Failed(e.to_string()))
    }
}
