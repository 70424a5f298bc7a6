//! Solver configuration

use crate::error::SolverError;

/// How many worker threads a solve uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadMode {
    /// `N / available_parallelism` workers, clamped to `1..=N`
    #[default]
    Auto,
    /// Exactly one worker per first-row column
    All,
}

impl std::fmt::Display for ThreadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreadMode::Auto => write!(f, "auto"),
            ThreadMode::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for ThreadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ThreadMode::Auto),
            "all" => Ok(ThreadMode::All),
            _ => Err(format!(
                "Unknown thread mode: '{}'. Valid options: auto, all",
                s
            )),
        }
    }
}

/// Immutable solver configuration, validated by [`Solver::new`](crate::Solver::new)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Board side length N
    pub board_size: usize,
    /// Worker count policy
    pub thread_mode: ThreadMode,
}

impl SolverConfig {
    /// Create a config for an N x N board using [`ThreadMode::Auto`]
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            thread_mode: ThreadMode::Auto,
        }
    }

    /// Create a config from a signed board size, rejecting sizes below 1
    pub fn from_signed(board_size: i64, thread_mode: ThreadMode) -> Result<Self, SolverError> {
        match usize::try_from(board_size) {
            Ok(size) if size >= 1 => Ok(Self::new(size).with_thread_mode(thread_mode)),
            _ => Err(SolverError::InvalidConfiguration { board_size }),
        }
    }

    /// Set the worker count policy
    pub fn with_thread_mode(mut self, thread_mode: ThreadMode) -> Self {
        self.thread_mode = thread_mode;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SolverError> {
        if self.board_size < 1 {
            return Err(SolverError::InvalidConfiguration {
                board_size: i64::try_from(self.board_size).unwrap_or(i64::MAX),
            });
        }
        Ok(())
    }
}
