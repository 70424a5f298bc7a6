//! Integration tests for the public solver API

use nqueens_solver::{
    Board, ObserverError, SearchObserver, Solution, Solver, SolverConfig, SolverError, ThreadMode,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn test_four_queens_solutions() {
    let solver = Solver::new(SolverConfig::new(4)).unwrap();
    let solutions = solver.solve().sorted_solutions();

    let columns: Vec<&[usize]> = solutions.iter().map(Solution::columns).collect();
    assert_eq!(columns, vec![&[1, 3, 0, 2][..], &[2, 0, 3, 1][..]]);
}

#[test]
fn test_eight_queens_both_modes() {
    for mode in [ThreadMode::Auto, ThreadMode::All] {
        let solver = Solver::new(SolverConfig::new(8).with_thread_mode(mode)).unwrap();
        let outcome = solver.solve();
        assert_eq!(outcome.solutions.len(), 92, "mode {}", mode);
        assert!(outcome.is_complete());
        assert_eq!(solver.stats().states_explored, 2056);
    }
}

#[test]
fn test_all_mode_uses_one_thread_per_column() {
    let solver = Solver::new(SolverConfig::new(8).with_thread_mode(ThreadMode::All)).unwrap();
    assert_eq!(solver.worker_count(), 8);
    let outcome = solver.solve();
    assert_eq!(outcome.workers.len(), 8);
    assert!(outcome.workers.iter().all(|w| w.columns.len() == 1));
}

#[test]
fn test_auto_mode_thread_bounds() {
    let solver = Solver::new(SolverConfig::new(8)).unwrap();
    let threads = solver.stats().threads_used;
    assert!((1..=8).contains(&threads));
}

#[test]
fn test_invalid_sizes_fail_at_construction() {
    assert!(matches!(
        Solver::new(SolverConfig::new(0)),
        Err(SolverError::InvalidConfiguration { board_size: 0 })
    ));
    assert!(matches!(
        SolverConfig::from_signed(-4, ThreadMode::All),
        Err(SolverError::InvalidConfiguration { board_size: -4 })
    ));
}

#[test]
fn test_single_square_board() {
    let solver = Solver::new(SolverConfig::new(1).with_thread_mode(ThreadMode::All)).unwrap();
    let outcome = solver.solve();
    assert_eq!(outcome.solutions.len(), 1);
    assert_eq!(outcome.solutions[0].columns(), &[0]);
    assert_eq!(solver.stats().states_explored, 1);
}

#[test]
fn test_unsolvable_boards() {
    for size in [2, 3] {
        let solver = Solver::new(SolverConfig::new(size)).unwrap();
        assert!(solver.solve().solutions.is_empty());
    }
}

#[test]
fn test_repeat_solve_yields_same_set() {
    let solver = Solver::new(SolverConfig::new(7).with_thread_mode(ThreadMode::All)).unwrap();
    let first: HashSet<Solution> = solver.solve().solutions.into_iter().collect();
    let second: HashSet<Solution> = solver.solve().solutions.into_iter().collect();
    assert_eq!(first.len(), 40);
    assert_eq!(first, second);
}

#[test]
fn test_observer_called_once_per_state() {
    let calls = Arc::new(AtomicU64::new(0));
    let terminal = Arc::new(AtomicU64::new(0));
    let (c, t) = (Arc::clone(&calls), Arc::clone(&terminal));

    let solver = Solver::with_observer(
        SolverConfig::new(6).with_thread_mode(ThreadMode::All),
        move |board: Board, row: usize| {
            c.fetch_add(1, Ordering::Relaxed);
            if row == board.size() {
                t.fetch_add(1, Ordering::Relaxed);
            }
        },
    )
    .unwrap();
    solver.solve();

    assert_eq!(calls.load(Ordering::Relaxed), solver.stats().states_explored);
    assert_eq!(terminal.load(Ordering::Relaxed), 4);
}

struct Flaky {
    calls: AtomicU64,
}

impl SearchObserver for Flaky {
    fn on_node(&self, _board: Board, _row: usize) -> Result<(), ObserverError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        match n % 3 {
            0 => Err(ObserverError::Failed(format!("call {}", n))),
            1 => panic!("observer panicked on call {}", n),
            _ => Ok(()),
        }
    }
}

#[test]
fn test_failing_observer_does_not_lose_solutions() {
    let solver = Solver::with_observer(
        SolverConfig::new(8).with_thread_mode(ThreadMode::All),
        Flaky {
            calls: AtomicU64::new(0),
        },
    )
    .unwrap();
    let outcome = solver.solve();

    assert_eq!(outcome.solutions.len(), 92);
    assert!(outcome.failures.is_empty());
    // Two out of every three calls fail
    assert!(outcome.observer_failures >= 2056 * 2 / 3);
    assert_eq!(outcome.observer_failures, solver.stats().observer_failures);
}

#[test]
fn test_request_stop_during_solve() {
    let solver = Solver::new(SolverConfig::new(14).with_thread_mode(ThreadMode::All)).unwrap();
    let stopper = solver.cancellation_token();

    let outcome = thread::scope(|s| {
        let handle = s.spawn(|| solver.solve());
        thread::sleep(Duration::from_millis(10));
        while !handle.is_finished() {
            stopper.request_stop();
            thread::sleep(Duration::from_millis(1));
        }
        handle.join().unwrap()
    });

    // The full 14-queens search finds 365_596 solutions
    assert!(outcome.cancelled);
    assert!(outcome.workers.iter().any(|w| w.cancelled));
    assert!(outcome.solutions.len() < 365_596);
    assert!(outcome.failures.is_empty());
    assert!(outcome.solutions.iter().all(Solution::is_valid));
    assert_eq!(solver.stats().solutions_found, outcome.solutions.len());
    assert!(solver.stats().cancelled);
}

#[test]
fn test_stop_from_observer_returns_partial_stats() {
    let slot: Arc<Mutex<Option<nqueens_solver::CancellationToken>>> = Arc::new(Mutex::new(None));
    let seen = Arc::new(AtomicU64::new(0));
    let (slot_ref, seen_ref) = (Arc::clone(&slot), Arc::clone(&seen));

    let solver = Solver::with_observer(
        SolverConfig::new(9).with_thread_mode(ThreadMode::Auto),
        move |_board: Board, _row: usize| {
            if seen_ref.fetch_add(1, Ordering::SeqCst) >= 50
                && let Some(token) = slot_ref.lock().unwrap().as_ref()
            {
                token.request_stop();
            }
        },
    )
    .unwrap();
    *slot.lock().unwrap() = Some(solver.cancellation_token());

    let outcome = solver.solve();
    let stats = solver.stats();

    assert!(outcome.cancelled);
    assert!(!outcome.is_complete());
    assert!(stats.cancelled);
    assert!(stats.states_explored < 8393);
    assert!(stats.solutions_found < 352);
    assert_eq!(stats.states_explored, seen.load(Ordering::SeqCst));

    // The next solve starts clean and runs to completion
    *slot.lock().unwrap() = None;
    let outcome = solver.solve();
    assert!(!outcome.cancelled);
    assert_eq!(outcome.solutions.len(), 352);
}
