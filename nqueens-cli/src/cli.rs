//! CLI argument parsing using clap

use clap::{ArgAction, Parser, ValueEnum};
use nqueens_solver::ThreadMode;

/// Worker thread policy exposed on the command line
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ThreadModeArg {
    /// Derive the worker count from the available CPUs (default)
    #[default]
    Auto,
    /// One worker per first-row column
    All,
}

impl From<ThreadModeArg> for ThreadMode {
    fn from(arg: ThreadModeArg) -> Self {
        match arg {
            ThreadModeArg::Auto => ThreadMode::Auto,
            ThreadModeArg::All => ThreadMode::All,
        }
    }
}

/// Multi-threaded N-Queens solver
#[derive(Parser, Debug)]
#[command(name = "nqueens", about = "Count and print N-Queens solutions", version)]
pub struct Args {
    /// Board sizes to solve, in output order
    #[arg(default_values_t = [8], allow_negative_numbers = true)]
    pub sizes: Vec<i64>,

    /// Worker thread policy: auto or all
    #[arg(short = 'm', long, value_enum, default_value = "auto")]
    pub thread_mode: ThreadModeArg,

    /// Solve every board in both thread modes and report the speedup of `all` over `auto`
    #[arg(long)]
    pub compare_modes: bool,

    /// Number of boards solved concurrently
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Stop each board after this many milliseconds and report partial results
    #[arg(short, long)]
    pub timeout_ms: Option<u64>,

    /// Number of solutions to print per board
    #[arg(short, long, default_value_t = 1)]
    pub show: usize,

    /// Print solutions in lexicographic order
    #[arg(long)]
    pub sorted: bool,

    /// Print search progress every K-th visited node
    #[arg(long, value_name = "K", value_parser = clap::value_parser!(u64).range(1..))]
    pub trace_every: Option<u64>,

    /// Quiet mode - only output solution counts
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
