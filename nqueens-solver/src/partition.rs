//! Splitting first-row starting columns across workers

use crate::config::ThreadMode;
use std::ops::Range;

/// Compute the worker count for an N x N board.
///
/// `All` uses exactly N workers. `Auto` uses `N / available_parallelism`,
/// clamped to `1..=N`.
pub fn worker_count(board_size: usize, mode: ThreadMode, available_parallelism: usize) -> usize {
    match mode {
        ThreadMode::All => board_size,
        ThreadMode::Auto => (board_size / available_parallelism.max(1)).clamp(1, board_size.max(1)),
    }
}

/// Split `0..board_size` into `workers` contiguous, disjoint ranges.
///
/// Every range holds `board_size / workers` columns, and the final range also
/// absorbs the remainder, so the ranges cover `0..board_size` exactly.
/// `workers` is clamped to `1..=board_size` so no range is empty.
pub fn partition(board_size: usize, workers: usize) -> Vec<Range<usize>> {
    if board_size == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, board_size);
    let per_worker = board_size / workers;

    (0..workers)
        .map(|id| {
            let start = id * per_worker;
            let end = if id == workers - 1 {
                board_size
            } else {
                start + per_worker
            };
            start..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_mode_uses_board_size() {
        assert_eq!(worker_count(8, ThreadMode::All, 4), 8);
        assert_eq!(worker_count(1, ThreadMode::All, 64), 1);
    }

    #[test]
    fn test_auto_mode_divides_by_parallelism() {
        assert_eq!(worker_count(8, ThreadMode::Auto, 4), 2);
        assert_eq!(worker_count(12, ThreadMode::Auto, 5), 2);
        assert_eq!(worker_count(16, ThreadMode::Auto, 1), 16);
    }

    #[test]
    fn test_auto_mode_at_least_one_worker() {
        assert_eq!(worker_count(4, ThreadMode::Auto, 16), 1);
        assert_eq!(worker_count(1, ThreadMode::Auto, 1), 1);
        assert_eq!(worker_count(5, ThreadMode::Auto, 0), 5);
    }

    #[test]
    fn test_even_partition() {
        assert_eq!(partition(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_remainder_goes_to_last_partition() {
        assert_eq!(partition(8, 3), vec![0..2, 2..4, 4..8]);
        assert_eq!(partition(7, 2), vec![0..3, 3..7]);
    }

    #[test]
    fn test_one_column_per_worker() {
        assert_eq!(partition(4, 4), vec![0..1, 1..2, 2..3, 3..4]);
    }

    #[test]
    fn test_single_worker_takes_everything() {
        assert_eq!(partition(9, 1), vec![0..9]);
    }

    #[test]
    fn test_worker_count_clamped() {
        assert_eq!(partition(3, 10), vec![0..1, 1..2, 2..3]);
        assert_eq!(partition(3, 0), vec![0..3]);
        assert!(partition(0, 4).is_empty());
    }
}
