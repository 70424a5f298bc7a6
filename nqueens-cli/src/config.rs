//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use nqueens_solver::ThreadMode;
use std::time::Duration;
use tracing::Level;

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Board sizes as given; validated by the solver
    pub board_sizes: Vec<i64>,
    /// Worker thread policy for every board
    pub thread_mode: ThreadMode,
    /// Also solve each board in the other thread mode
    pub compare_modes: bool,
    /// Boards solved concurrently
    pub jobs: usize,
    /// Per-board time limit
    pub timeout: Option<Duration>,
    /// Solutions printed per board
    pub show: usize,
    /// Print solutions in lexicographic order
    pub sorted: bool,
    /// Progress printing interval in visited nodes
    pub trace_every: Option<u64>,
    /// Quiet mode
    pub quiet: bool,
    /// Maximum level of the log subscriber
    pub log_level: Level,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        if args.sizes.is_empty() {
            return Err(CliError::Config("At least one board size is required".to_string()));
        }
        if args.quiet && args.trace_every.is_some() {
            return Err(CliError::Config(
                "--trace-every cannot be combined with --quiet".to_string(),
            ));
        }

        Ok(Config {
            board_sizes: args.sizes,
            thread_mode: args.thread_mode.into(),
            compare_modes: args.compare_modes,
            jobs: usize::from(args.jobs),
            timeout: args.timeout_ms.map(Duration::from_millis),
            show: args.show,
            sorted: args.sorted,
            trace_every: args.trace_every,
            quiet: args.quiet,
            log_level: log_level(args.verbose),
        })
    }
}

/// Map the `-v` count to a log level
fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
