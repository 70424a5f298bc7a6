//! Parallel executor for solving boards

use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::progress::ProgressPrinter;
use nqueens_solver::{
    CancellationToken, SolveOutcome, Solver, SolverConfig, SolverError, SolverStats, ThreadMode,
};
use rayon::prelude::*;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Interval between repeated stop requests once a board's time is up
const STOP_RETRY: Duration = Duration::from_millis(1);

/// Result of solving one board
pub struct BoardResult {
    /// Position of the board in the input order
    pub index: usize,
    pub size: i64,
    pub report: Result<BoardReport, SolverError>,
    /// The same board solved in the other thread mode, with `--compare-modes`
    pub comparison: Option<BoardReport>,
}

/// Outcome and statistics of a solve that ran
pub struct BoardReport {
    pub thread_mode: ThreadMode,
    pub outcome: SolveOutcome,
    pub stats: SolverStats,
}

/// Work item representing a board to solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    pub index: usize,
    pub size: i64,
}

/// Parallel executor for solving boards
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    board_sizes: Vec<i64>,
    thread_pool: rayon::ThreadPool,
}

/// Settings shared by every work item
#[derive(Debug, Clone, Copy)]
pub struct SyncExecutorConfig {
    thread_mode: ThreadMode,
    compare_modes: bool,
    timeout: Option<Duration>,
    trace_every: Option<u64>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .thread_name(|i| format!("nqueens-board-{}", i))
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                thread_mode: config.thread_mode,
                compare_modes: config.compare_modes,
                timeout: config.timeout,
                trace_every: config.trace_every,
            },
            board_sizes: config.board_sizes.clone(),
            thread_pool,
        })
    }

    /// One work item per requested board, in input order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.board_sizes
            .iter()
            .enumerate()
            .map(|(index, &size)| WorkItem { index, size })
            .collect()
    }

    /// Solve all work items and send results to channel.
    ///
    /// Every board produces a result, failed or not. The returned error
    /// collects the boards that could not be solved completely.
    pub fn execute(&self, tx: Sender<BoardResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| solve_board(work, &tx, sync_executor_config).err())
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }
}

/// Solve one board and send its result
fn solve_board(
    work: WorkItem,
    tx: &Sender<BoardResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    tracing::debug!(index = work.index, size = work.size, "board started");

    let mode = sync_executor_config.thread_mode;
    let report = solve_in_mode(work.size, mode, sync_executor_config);
    let comparison = match &report {
        Ok(_) if sync_executor_config.compare_modes => {
            solve_in_mode(work.size, other_mode(mode), sync_executor_config).ok()
        }
        _ => None,
    };

    let failures: Vec<_> = report
        .iter()
        .chain(comparison.iter())
        .flat_map(|r| r.outcome.failures.iter().cloned())
        .collect();
    let error = match &report {
        Err(e) => Some(e.clone()),
        Ok(_) if !failures.is_empty() => Some(SolverError::WorkerFailures(failures)),
        Ok(_) => None,
    };

    tx.send(BoardResult {
        index: work.index,
        size: work.size,
        report,
        comparison,
    })
    .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))?;

    match error {
        Some(source) => Err(ExecutorError::Board {
            size: work.size,
            source,
        }
        .into()),
        None => Ok(()),
    }
}

fn other_mode(mode: ThreadMode) -> ThreadMode {
    match mode {
        ThreadMode::Auto => ThreadMode::All,
        ThreadMode::All => ThreadMode::Auto,
    }
}

fn solve_in_mode(
    size: i64,
    mode: ThreadMode,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<BoardReport, SolverError> {
    let solver = build_solver(size, mode, sync_executor_config.trace_every)?;
    Ok(run_with_timeout(&solver, sync_executor_config.timeout))
}

fn build_solver(size: i64, mode: ThreadMode, trace_every: Option<u64>) -> Result<Solver, SolverError> {
    let config = SolverConfig::from_signed(size, mode)?;
    match trace_every {
        Some(every) => Solver::with_observer(config, ProgressPrinter::new(every)),
        None => Solver::new(config),
    }
}

/// Solve, stopping the solver from a timer thread once `timeout` elapses
fn run_with_timeout(solver: &Solver, timeout: Option<Duration>) -> BoardReport {
    let outcome = match timeout {
        None => solver.solve(),
        Some(timeout) => {
            let token = solver.cancellation_token();
            let (done_tx, done_rx) = mpsc::channel::<()>();
            thread::scope(|s| {
                s.spawn(move || stop_after(timeout, &token, done_rx));
                let outcome = solver.solve();
                drop(done_tx);
                outcome
            })
        }
    };

    BoardReport {
        thread_mode: solver.config().thread_mode,
        outcome,
        stats: solver.stats(),
    }
}

/// Request a stop once `timeout` passes without the solve finishing.
///
/// The solve clears the flag on entry, so the request is repeated until the
/// solve returns and drops the sender.
fn stop_after(timeout: Duration, token: &CancellationToken, done: Receiver<()>) {
    let mut wait = timeout;
    while let Err(RecvTimeoutError::Timeout) = done.recv_timeout(wait) {
        if wait == timeout {
            tracing::info!(timeout_ms = timeout.as_millis() as u64, "time limit reached, stopping");
        }
        token.request_stop();
        wait = STOP_RETRY;
    }
}
