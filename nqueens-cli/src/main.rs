//! N-Queens CLI - Command-line interface for the multi-threaded solver

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod output;
mod progress;

use clap::Parser;
use cli::Args;
use config::Config;
use executor::Executor;
use output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    let executor = Executor::new(&config).map_err(|e| error::CliError::Executor(e.into()))?;
    run_executor(executor, &config)
}

/// Run the executor and print results in input order
fn run_executor(executor: Executor, config: &Config) -> Result<(), error::CliError> {
    let work_items = executor.collect_work_items();
    if !config.quiet {
        println!(
            "Solving {} board(s) with thread mode {}...",
            work_items.len(),
            config.thread_mode
        );
    }

    let (tx, rx) = std::sync::mpsc::channel();

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(config.quiet, config.show, config.sorted);
    let mut aggregator = aggregator::ResultAggregator::new(work_items.iter().map(|w| w.index));
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        tracing::warn!("not all expected results were received");
    }

    let executed = executor_handle
        .join()
        .map_err(error::CliError::executor_panicked)?;

    formatter.print_summary(&results);

    executed.map_err(error::CliError::Executor)
}
