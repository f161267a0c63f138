//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::{Duration, Instant};

/// Totals over every printed result
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
}

impl Summary {
    /// Only successful results count towards the timings
    pub fn from_results(results: &[SolverResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, r| {
            if r.answer.is_ok() {
                summary.solved += 1;
                summary.parse_time += r.parse_duration.unwrap_or_default();
                summary.solve_time += r.solve_duration;
            } else {
                summary.failed += 1;
            }
            summary
        })
    }

    pub fn compute_time(&self) -> TimeDelta {
        self.parse_time + self.solve_time
    }
}

pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Answers go to stdout, failures to stderr
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(_), _) => println!("{}", self.format_answer(result)),
            (Err(e), true) => eprintln!("Error: {e}"),
            (Err(e), false) => eprintln!("{}: Error - {e}", prefix(result)),
        }
    }

    fn format_answer(&self, result: &SolverResult) -> String {
        let answer = result.answer.as_deref().unwrap_or_default();
        if self.quiet {
            return answer.to_string();
        }
        let parse = result
            .parse_duration
            .map(|d| format!("parse: {}, ", format_duration(d)))
            .unwrap_or_default();
        format!(
            "{}: {answer} ({parse}solve: {})",
            prefix(result),
            format_duration(result.solve_duration)
        )
    }

    /// Print totals and the parallel speedup over wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }
        let summary = Summary::from_results(results);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", summary.solved, summary.failed);
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_std_duration(elapsed));
        if let Some(speedup) = speedup(summary.compute_time(), elapsed) {
            println!("Speedup factor: {speedup:.2}x");
        }
    }
}

fn prefix(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

fn speedup(compute: TimeDelta, elapsed: Duration) -> Option<f64> {
    if elapsed.is_zero() {
        return None;
    }
    let compute_secs = compute.num_microseconds()? as f64 / 1_000_000.0;
    Some(compute_secs / elapsed.as_secs_f64())
}

fn format_micros(micros: u128) -> String {
    if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

fn format_duration(d: TimeDelta) -> String {
    match d.num_microseconds() {
        None => "N/A".to_string(),
        Some(micros) if micros < 0 => format!("-{}", format_micros(micros.unsigned_abs().into())),
        Some(micros) => format_micros(micros.unsigned_abs().into()),
    }
}

fn format_std_duration(d: Duration) -> String {
    format_micros(d.as_micros())
}
