//! N-Queens Solver Library
//!
//! Finds every placement of N non-attacking queens on an N x N board with a
//! backtracking search parallelized across worker threads.
//!
//! # Overview
//!
//! The search space is split by the queen's column in the first row:
//! - The partitioner divides the columns `0..N` into one contiguous range per
//!   worker (see [`partition`] and [`worker_count`])
//! - Each worker owns a private [`Board`] and runs the backtracking engine from
//!   every start column in its range
//! - Workers publish into a shared [`Aggregator`]: an atomic explored-state
//!   counter and a mutex-guarded solution list
//! - A [`CancellationToken`] stops all workers cooperatively
//! - An optional [`SearchObserver`] sees an owned snapshot of every visited node
//!
//! The search tree depends only on N, so the number of explored states and the
//! set of solutions are the same for every thread count and interleaving.
//! Only the order of solutions differs between runs.
//!
//! # Quick Example
//!
//! ```
//! use nqueens_solver::{Solver, SolverConfig, ThreadMode};
//!
//! let solver = Solver::new(SolverConfig::new(6).with_thread_mode(ThreadMode::Auto)).unwrap();
//! let outcome = solver.solve();
//!
//! assert_eq!(outcome.solutions.len(), 4);
//! assert!(outcome.solutions.iter().all(|s| s.is_valid()));
//!
//! let stats = solver.stats();
//! assert_eq!(stats.states_explored, 152);
//! println!("{}", stats);
//! ```
//!
//! # Failures
//!
//! - Construction with a board size below 1 fails with
//!   [`SolverError::InvalidConfiguration`]
//! - A worker that panics is reported as a [`WorkerFailure`] in the
//!   [`SolveOutcome`], next to the solutions of the workers that completed
//! - An observer that fails or panics is counted and logged; the search goes on
//! - Cancellation is not an error: `solve` returns the partial outcome

mod aggregator;
mod board;
mod cancel;
mod config;
mod engine;
mod error;
mod observer;
mod outcome;
mod partition;
mod solver;
mod stats;
mod worker;

// Re-export public API
pub use aggregator::Aggregator;
pub use board::{Board, Solution, is_safe};
pub use cancel::CancellationToken;
pub use config::{SolverConfig, ThreadMode};
pub use error::{ObserverError, SolverError, WorkerFailure};
pub use observer::SearchObserver;
pub use outcome::SolveOutcome;
pub use partition::{partition, worker_count};
pub use solver::Solver;
pub use stats::SolverStats;
pub use worker::WorkerReport;
