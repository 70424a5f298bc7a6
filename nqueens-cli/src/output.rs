//! Output formatting for board results

use crate::executor::{BoardReport, BoardResult};
use chrono::TimeDelta;
use itertools::Itertools;
use nqueens_solver::{Solution, ThreadMode};

/// Output formatter for board results
pub struct OutputFormatter {
    quiet: bool,
    show: usize,
    sorted: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool, show: usize, sorted: bool) -> Self {
        Self {
            quiet,
            show,
            sorted,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &BoardResult) {
        match &result.report {
            Ok(report) if self.quiet => println!("{}", report.outcome.solutions.len()),
            Ok(report) => println!(
                "{}",
                self.render_report(result.size, report, result.comparison.as_ref())
            ),
            Err(e) if self.quiet => eprintln!("Error: {}", e),
            Err(e) => eprintln!("Board {}: Error - {}", result.size, e),
        }
        let reports = result.report.iter().chain(result.comparison.iter());
        for report in reports {
            for failure in &report.outcome.failures {
                eprintln!("Board {} ({}): {}", result.size, report.thread_mode, failure);
            }
        }
    }

    /// Header, stats line, mode comparison and the first `show` solutions of one board
    fn render_report(
        &self,
        size: i64,
        report: &BoardReport,
        comparison: Option<&BoardReport>,
    ) -> String {
        let outcome = &report.outcome;
        let elapsed = report
            .stats
            .elapsed()
            .map(format_duration)
            .unwrap_or_else(|| "N/A".to_string());
        let status = if outcome.cancelled { " (cancelled)" } else { "" };

        let mut lines = vec![
            format!(
                "Board {}x{}: {} solutions (solve: {}){}",
                size,
                size,
                outcome.solutions.len(),
                elapsed,
                status
            ),
            report.stats.to_string(),
        ];
        if let Some(other) = comparison {
            lines.extend(render_comparison(report, other));
        }

        let solutions = if self.sorted {
            outcome.sorted_solutions()
        } else {
            outcome.solutions.clone()
        };
        for solution in solutions.iter().take(self.show) {
            lines.push(String::new());
            lines.push(render_grid(solution));
        }
        let remaining = solutions.len().saturating_sub(self.show);
        if remaining > 0 {
            lines.push(format!("(... and {} more solutions)", remaining));
        }
        lines.join("\n")
    }

    /// Print a summary after all results
    pub fn print_summary(&self, results: &[BoardResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::from_results(results);
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Boards: {} solved, {} cancelled, {} failed",
            summary.solved, summary.cancelled, summary.failed
        );
        println!("Total solutions: {}", summary.solutions);
        println!("Total states explored: {}", summary.states);
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_solve_secs =
                summary.solve_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_solve_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// Totals over all board results
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    solved: usize,
    cancelled: usize,
    failed: usize,
    solutions: usize,
    states: u64,
    solve_time: TimeDelta,
}

impl Summary {
    fn empty() -> Self {
        Self {
            solved: 0,
            cancelled: 0,
            failed: 0,
            solutions: 0,
            states: 0,
            solve_time: TimeDelta::zero(),
        }
    }

    fn from_results(results: &[BoardResult]) -> Self {
        results
            .iter()
            .fold(Summary::empty(), |mut summary, result| {
                match &result.report {
                    Ok(report) => {
                        if !report.outcome.failures.is_empty() {
                            summary.failed += 1;
                        } else if report.outcome.cancelled {
                            summary.cancelled += 1;
                        } else {
                            summary.solved += 1;
                        }
                        summary.solutions += report.outcome.solutions.len();
                        summary.states += report.stats.states_explored;
                        summary.solve_time += report.stats.elapsed().unwrap_or_else(TimeDelta::zero);
                    }
                    Err(_) => summary.failed += 1,
                }
                summary
            })
    }
}

/// One line per thread mode, `auto` first, then the speedup of `all` over `auto`
fn render_comparison(first: &BoardReport, second: &BoardReport) -> Vec<String> {
    let (auto, all) = match first.thread_mode {
        ThreadMode::Auto => (first, second),
        ThreadMode::All => (second, first),
    };
    let mut lines: Vec<String> = [auto, all]
        .iter()
        .map(|r| {
            let elapsed = r
                .stats
                .elapsed()
                .map(format_duration)
                .unwrap_or_else(|| "N/A".to_string());
            let status = if r.outcome.cancelled { " (cancelled)" } else { "" };
            format!(
                "Mode {}: {} solutions, {} states, {} threads (solve: {}){}",
                r.thread_mode,
                r.outcome.solutions.len(),
                r.stats.states_explored,
                r.stats.threads_used,
                elapsed,
                status
            )
        })
        .collect();
    if let Some(speedup) = mode_speedup(auto, all) {
        lines.push(format!("Speedup with more threads: {:.2}x", speedup));
    }
    lines
}

/// Solve time of `auto` divided by solve time of `all`
fn mode_speedup(auto: &BoardReport, all: &BoardReport) -> Option<f64> {
    let micros = |r: &BoardReport| r.stats.elapsed().and_then(|d| d.num_microseconds());
    let (auto_micros, all_micros) = (micros(auto)?, micros(all)?);
    (all_micros > 0).then(|| auto_micros as f64 / all_micros as f64)
}

/// Render a solution as rows of `Q` and `.` separated by spaces
pub fn render_grid(solution: &Solution) -> String {
    let size = solution.size();
    solution
        .columns()
        .iter()
        .map(|&col| render_row(size, col))
        .join("\n")
}

/// Render a progress step: a header line followed by the placed rows only
pub fn render_progress(
    step: u64,
    row: usize,
    size: usize,
    placed: impl Iterator<Item = (usize, usize)>,
) -> String {
    std::iter::once(format!("Step {}: exploring row {}", step, row))
        .chain(placed.map(|(_, col)| render_row(size, col)))
        .join("\n")
}

fn render_row(size: usize, queen: usize) -> String {
    (0..size)
        .map(|c| if c == queen { "Q" } else { "." })
        .join(" ")
}

/// Format a TimeDelta for display
pub fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
