//! Result of a single solve

use crate::board::Solution;
use crate::error::{SolverError, WorkerFailure};
use crate::worker::WorkerReport;

/// Everything a solve produced once all workers joined.
///
/// Worker failures do not discard the solutions the other workers found;
/// both are returned together.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Solutions in arrival order, which depends on thread interleaving
    pub solutions: Vec<Solution>,
    /// One report per worker that returned normally, ordered by worker id
    pub workers: Vec<WorkerReport>,
    /// Workers that terminated abnormally, ordered by worker id
    pub failures: Vec<WorkerFailure>,
    /// Whether cancellation was observed before the join barrier
    pub cancelled: bool,
    /// Observer calls that failed across all workers
    pub observer_failures: u64,
}

impl SolveOutcome {
    /// Solutions sorted lexicographically by column sequence
    pub fn sorted_solutions(&self) -> Vec<Solution> {
        let mut sorted = self.solutions.clone();
        sorted.sort_unstable();
        sorted
    }

    /// True when the whole search space was covered
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.failures.is_empty()
    }

    /// Convert to the solution list, or an error if any worker failed
    pub fn into_result(self) -> Result<Vec<Solution>, SolverError> {
        if self.failures.is_empty() {
            Ok(self.solutions)
        } else {
            Err(SolverError::WorkerFailures(self.failures))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(failures: Vec<WorkerFailure>) -> SolveOutcome {
        SolveOutcome {
            solutions: vec![
                Solution::from_columns(vec![2, 0, 3, 1]).unwrap(),
                Solution::from_columns(vec![1, 3, 0, 2]).unwrap(),
            ],
            workers: Vec::new(),
            failures,
            cancelled: false,
            observer_failures: 0,
        }
    }

    #[test]
    fn test_sorted_solutions() {
        let sorted = outcome(Vec::new()).sorted_solutions();
        assert_eq!(sorted[0].columns(), &[1, 3, 0, 2]);
        assert_eq!(sorted[1].columns(), &[2, 0, 3, 1]);
    }

    #[test]
    fn test_into_result_without_failures() {
        let outcome = outcome(Vec::new());
        assert!(outcome.is_complete());
        assert_eq!(outcome.into_result().unwrap().len(), 2);
    }

    #[test]
    fn test_into_result_with_failures() {
        let failure = WorkerFailure {
            worker_id: 1,
            columns: 2..4,
            message: "boom".to_string(),
        };
        let outcome = outcome(vec![failure.clone()]);
        assert!(!outcome.is_complete());
        match outcome.into_result() {
            Err(SolverError::WorkerFailures(failures)) => assert_eq!(failures, vec![failure]),
            other => panic!("Expected WorkerFailures, got {:?}", other),
        }
    }
}
