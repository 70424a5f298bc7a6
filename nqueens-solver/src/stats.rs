//! Solve statistics

use chrono::{DateTime, TimeDelta, Utc};

/// Snapshot of a solver's counters.
///
/// Fully consistent once `solve` has returned; during a solve the counters
/// reflect whatever workers have published so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStats {
    /// Solutions recorded by the most recent solve
    pub solutions_found: usize,
    /// Search nodes visited by the most recent solve
    pub states_explored: u64,
    /// Worker threads per solve
    pub threads_used: usize,
    /// Board side length N
    pub board_size: usize,
    /// Whether the most recent solve was stopped early
    pub cancelled: bool,
    /// Workers that terminated abnormally in the most recent solve
    pub worker_failures: usize,
    /// Observer calls that failed in the most recent solve
    pub observer_failures: u64,
    /// When the most recent solve started (UTC)
    pub solve_start: Option<DateTime<Utc>>,
    /// When the most recent solve passed its join barrier (UTC)
    pub solve_end: Option<DateTime<Utc>>,
}

impl SolverStats {
    /// Wall-clock time of the most recent completed solve
    pub fn elapsed(&self) -> Option<TimeDelta> {
        Some(self.solve_end? - self.solve_start?)
    }

    /// Search nodes visited per second of wall-clock time
    pub fn throughput(&self) -> f64 {
        let micros = self
            .elapsed()
            .and_then(|d| d.num_microseconds())
            .unwrap_or(0);
        if micros <= 0 {
            0.0
        } else {
            self.states_explored as f64 / (micros as f64 / 1_000_000.0)
        }
    }
}

impl std::fmt::Display for SolverStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solutions: {} | States: {} | Threads: {} | Board: {}x{}",
            self.solutions_found,
            self.states_explored,
            self.threads_used,
            self.board_size,
            self.board_size
        )
    }
}
