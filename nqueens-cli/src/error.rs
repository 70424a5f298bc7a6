//! Error types for the CLI

use std::any::Any;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),

    /// The background executor thread panicked
    #[error("Executor thread panicked: {0}")]
    ExecutorPanicked(String),
}

impl CliError {
    /// Build a [`CliError::ExecutorPanicked`] from a join payload
    pub fn executor_panicked(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        CliError::ExecutorPanicked(message)
    }
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// A board could not be solved completely
    #[error("Board {size}: {source}")]
    Board {
        size: i64,
        #[source]
        source: nqueens_solver::SolverError,
    },

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one, flattening `Multiple` on
    /// either side so the result is never nested
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    /// Every non-`Multiple` error, in combination order
    pub fn leaves(&self) -> Vec<ArcExecutorError> {
        match self.inner() {
            ExecutorError::Multiple(v) => v.iter().flat_map(|e| e.leaves()).collect(),
            _ => vec![self.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nqueens_solver::SolverError;

    fn board_error(size: i64) -> ArcExecutorError {
        ExecutorError::Board {
            size,
            source: SolverError::InvalidConfiguration { board_size: size },
        }
        .into()
    }

    fn sizes(error: &ArcExecutorError) -> Vec<i64> {
        error
            .leaves()
            .iter()
            .map(|e| match e.inner() {
                ExecutorError::Board { size, .. } => *size,
                other => panic!("unexpected error {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_combine_singles() {
        let combined = ArcExecutorError::combine(board_error(0), board_error(-1));
        assert!(matches!(combined.inner(), ExecutorError::Multiple(v) if v.len() == 2));
        assert_eq!(sizes(&combined), vec![0, -1]);
    }

    #[test]
    fn test_combine_flattens_multiple() {
        let left = ArcExecutorError::combine(board_error(0), board_error(-1));
        let right = ArcExecutorError::combine(board_error(-2), board_error(-3));

        let both = ArcExecutorError::combine(left.clone(), right.clone());
        assert!(matches!(both.inner(), ExecutorError::Multiple(v) if v.len() == 4));
        assert_eq!(sizes(&both), vec![0, -1, -2, -3]);

        let prepended = ArcExecutorError::combine(board_error(5), right);
        assert_eq!(sizes(&prepended), vec![5, -2, -3]);

        let appended = ArcExecutorError::combine(left, board_error(5));
        assert_eq!(sizes(&appended), vec![0, -1, 5]);
    }

    #[test]
    fn test_combine_opt() {
        assert_eq!(sizes(&ArcExecutorError::combine_opt(None, board_error(0))), vec![0]);
        let combined = ArcExecutorError::combine_opt(Some(board_error(0)), board_error(-7));
        assert_eq!(sizes(&combined), vec![0, -7]);
    }

    #[test]
    fn test_executor_panic_is_not_a_config_error() {
        let joined = std::thread::spawn(|| -> Result<(), ArcExecutorError> {
            panic!("pool went away")
        })
        .join();
        let error = CliError::executor_panicked(joined.unwrap_err());

        assert!(matches!(&error, CliError::ExecutorPanicked(m) if m == "pool went away"));
        assert_eq!(error.to_string(), "Executor thread panicked: pool went away");

        let error = CliError::executor_panicked(Box::new(7u32));
        assert_eq!(error.to_string(), "Executor thread panicked: unknown panic payload");
    }

    #[test]
    fn test_display() {
        let error = board_error(-4);
        assert!(error.to_string().starts_with("Board -4: "));
        let combined = ArcExecutorError::combine(board_error(0), error);
        assert_eq!(combined.to_string(), "Multiple errors occurred (2 total)");
        let cli: CliError = combined.into();
        assert_eq!(cli.to_string(), "Multiple errors occurred (2 total)");
    }
}
