//! Multi-threaded solver front end

use crate::aggregator::Aggregator;
use crate::cancel::CancellationToken;
use crate::config::SolverConfig;
use crate::engine::SearchShared;
use crate::error::{SolverError, WorkerFailure, panic_message};
use crate::observer::SearchObserver;
use crate::outcome::SolveOutcome;
use crate::partition::{partition, worker_count};
use crate::stats::SolverStats;
use crate::worker::{WorkerReport, run_worker};
use chrono::{DateTime, Utc};
use std::ops::Range;
use std::sync::{Mutex, PoisonError};
use std::thread;

/// Body of one worker thread: id, start columns, board size, shared handles
type WorkerFn = fn(usize, Range<usize>, usize, SearchShared<'_>) -> WorkerReport;

/// Bookkeeping of the most recent solve that the aggregator does not hold
#[derive(Debug, Default, Clone, Copy)]
struct LastRun {
    cancelled: bool,
    worker_failures: usize,
    solve_start: Option<DateTime<Utc>>,
    solve_end: Option<DateTime<Utc>>,
}

/// Parallel N-Queens solver.
///
/// Partitions the first-row columns across worker threads, each searching
/// with its own board. Results meet in a shared [`Aggregator`]. The solver is
/// reusable: every [`solve`](Self::solve) resets counters, solutions and the
/// cancellation flag.
///
/// `solve` is not reentrant. A concurrent second call blocks until the first
/// one has joined all its workers. Calling `solve` from inside an observer
/// deadlocks.
///
/// # Example
///
/// ```
/// use nqueens_solver::{Solver, SolverConfig, ThreadMode};
///
/// let solver = Solver::new(SolverConfig::new(8).with_thread_mode(ThreadMode::All)).unwrap();
/// let outcome = solver.solve();
///
/// assert_eq!(outcome.solutions.len(), 92);
/// assert_eq!(solver.stats().threads_used, 8);
/// ```
pub struct Solver {
    config: SolverConfig,
    worker_count: usize,
    observer: Option<Box<dyn SearchObserver>>,
    aggregator: Aggregator,
    cancel: CancellationToken,
    solve_lock: Mutex<()>,
    last_run: Mutex<LastRun>,
    run_worker: WorkerFn,
}

impl Solver {
    /// Create a solver without an observer
    ///
    /// # Returns
    /// * `Err(SolverError::InvalidConfiguration)` - `board_size` is below 1
    pub fn new(config: SolverConfig) -> Result<Self, SolverError> {
        Self::build(config, None)
    }

    /// Create a solver that reports every visited node to `observer`
    pub fn with_observer<O>(config: SolverConfig, observer: O) -> Result<Self, SolverError>
    where
        O: SearchObserver + 'static,
    {
        Self::build(config, Some(Box::new(observer)))
    }

    /// Create a solver whose threads run `run_worker` instead of the search
    #[cfg(test)]
    pub(crate) fn with_worker_fn(
        config: SolverConfig,
        run_worker: WorkerFn,
    ) -> Result<Self, SolverError> {
        let mut solver = Self::build(config, None)?;
        solver.run_worker = run_worker;
        Ok(solver)
    }

    fn build(
        config: SolverConfig,
        observer: Option<Box<dyn SearchObserver>>,
    ) -> Result<Self, SolverError> {
        config.validate()?;
        let available = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Ok(Self {
            config,
            worker_count: worker_count(config.board_size, config.thread_mode, available),
            observer,
            aggregator: Aggregator::new(),
            cancel: CancellationToken::new(),
            solve_lock: Mutex::new(()),
            last_run: Mutex::new(LastRun::default()),
            run_worker,
        })
    }

    /// The configuration this solver was built with
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Worker threads each solve spawns
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Run the search on all workers and block until every worker joined.
    ///
    /// Returns early, without error, if cancellation is requested while
    /// running; the outcome then holds whatever was found so far. A stop
    /// that arrives after every worker ran out of work leaves the outcome
    /// complete.
    ///
    /// The solutions are moved into the outcome; the solver keeps only
    /// their count for [`stats`](Self::stats).
    pub fn solve(&self) -> SolveOutcome {
        let _running = self.solve_lock.lock().unwrap_or_else(PoisonError::into_inner);

        self.aggregator.reset();
        self.cancel.reset();
        let solve_start = Utc::now();
        *self.lock_last_run() = LastRun {
            solve_start: Some(solve_start),
            ..LastRun::default()
        };

        let board_size = self.config.board_size;
        let partitions = partition(board_size, self.worker_count);
        tracing::debug!(
            board_size,
            mode = %self.config.thread_mode,
            workers = partitions.len(),
            ?partitions,
            "starting solve"
        );

        let shared = SearchShared {
            aggregator: &self.aggregator,
            cancel: &self.cancel,
            observer: self.observer.as_deref(),
        };
        let results = self.run_workers(partitions, shared);

        let mut workers = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(report) => workers.push(report),
                Err(failure) => {
                    tracing::error!("{}", failure);
                    failures.push(failure);
                }
            }
        }

        let solve_end = Utc::now();
        let cancelled = workers.iter().any(|w| w.cancelled);
        *self.lock_last_run() = LastRun {
            cancelled,
            worker_failures: failures.len(),
            solve_start: Some(solve_start),
            solve_end: Some(solve_end),
        };

        let outcome = SolveOutcome {
            solutions: self.aggregator.take_solutions(),
            workers,
            failures,
            cancelled,
            observer_failures: self.aggregator.observer_failures(),
        };
        tracing::info!(
            board_size,
            solutions = outcome.solutions.len(),
            states = self.aggregator.states_explored(),
            elapsed_ms = (solve_end - solve_start).num_milliseconds(),
            cancelled,
            "solve finished"
        );
        outcome
    }

    /// Spawn one scoped thread per partition and join them all
    fn run_workers(
        &self,
        partitions: Vec<Range<usize>>,
        shared: SearchShared<'_>,
    ) -> Vec<Result<WorkerReport, WorkerFailure>> {
        let board_size = self.config.board_size;
        let run_worker = self.run_worker;

        thread::scope(|s| {
            let handles: Vec<_> = partitions
                .into_iter()
                .enumerate()
                .map(|(worker_id, columns)| {
                    let worker_columns = columns.clone();
                    let handle = thread::Builder::new()
                        .name(format!("nqueens-worker-{}", worker_id))
                        .spawn_scoped(s, move || {
                            run_worker(worker_id, worker_columns, board_size, shared)
                        });
                    (worker_id, columns, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(worker_id, columns, handle)| {
                    let message = match handle {
                        Ok(handle) => match handle.join() {
                            Ok(report) => return Ok(report),
                            Err(payload) => panic_message(payload.as_ref()),
                        },
                        Err(e) => format!("failed to spawn worker thread: {}", e),
                    };
                    Err(WorkerFailure {
                        worker_id,
                        columns,
                        message,
                    })
                })
                .collect()
        })
    }

    /// Ask every running worker to stop at its next search node.
    ///
    /// Safe to call from any thread at any time. A stop requested while no
    /// solve is running is cleared by the next solve.
    pub fn request_stop(&self) {
        self.cancel.request_stop();
    }

    /// A handle that can stop this solver from another thread
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Counters of the most recent solve
    pub fn stats(&self) -> SolverStats {
        let last_run = *self.lock_last_run();
        SolverStats {
            solutions_found: self.aggregator.solutions_found(),
            states_explored: self.aggregator.states_explored(),
            threads_used: self.worker_count,
            board_size: self.config.board_size,
            cancelled: last_run.cancelled,
            worker_failures: last_run.worker_failures,
            observer_failures: self.aggregator.observer_failures(),
            solve_start: last_run.solve_start,
            solve_end: last_run.solve_end,
        }
    }

    fn lock_last_run(&self) -> std::sync::MutexGuard<'_, LastRun> {
        self.last_run.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("config", &self.config)
            .field("worker_count", &self.worker_count)
            .field("has_observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
