//! A day's solver bound to its puzzle input

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{TimeDelta, Utc};

/// Answer to one part and the wall time spent computing it
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub part: u8,
    pub answer: String,
    pub duration: TimeDelta,
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, TimeDelta) {
    let start = Utc::now();
    let value = f();
    (value, Utc::now() - start)
}

/// Parsed input of one day, ready to answer any of its parts
///
/// Puzzle inputs are plain text consumed line by line; an input without a
/// single non-blank line is rejected before the day's parser runs.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    input_lines: usize,
    shared: S::SharedData<'a>,
    parse_duration: TimeDelta,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let input_lines = input.lines().count();
        if input.lines().all(|line| line.trim().is_empty()) {
            return Err(ParseError::EmptyInput);
        }
        let (shared, parse_duration) = timed(|| S::parse(input));
        Ok(Self {
            year,
            day,
            input_lines,
            shared: shared?,
            parse_duration,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], as handed out by the registry
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn run_all(solver: &mut dyn DynSolver) -> Result<(), aoc_solver::SolveError> {
///     println!("{}/{:02}: {} lines", solver.year(), solver.day(), solver.input_lines());
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("part {}: {} ({})", result.part, result.answer, result.duration);
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Number of parts the day answers
    fn parts(&self) -> u8;

    /// Lines in the raw input, blank ones included
    fn input_lines(&self) -> usize;

    fn parse_duration(&self) -> TimeDelta;
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, duration) = timed(|| S::solve_part_checked_range(&mut self.shared, part));
        Ok(SolveResult {
            part,
            answer: answer?,
            duration,
        })
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }

    fn input_lines(&self) -> usize {
        self.input_lines
    }

    fn parse_duration(&self) -> TimeDelta {
        self.parse_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AocParser;

    /// Part 1 counts group answers, part 2 the longest line
    struct Customs;

    impl AocParser for Customs {
        type SharedData<'a> = Vec<&'a str>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            Ok(input.lines().filter(|l| !l.is_empty()).collect())
        }
    }

    impl Solver for Customs {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.len().to_string()),
                2 => Ok(shared.iter().map(|l| l.len()).max().unwrap_or(0).to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn test_blank_input_rejected_before_parsing() {
        for input in ["", "\n\n", "  \n\t\n"] {
            assert!(matches!(
                SolverInstance::<Customs>::new(2020, 6, input),
                Err(ParseError::EmptyInput)
            ));
        }
    }

    #[test]
    fn test_counts_lines_and_solves() {
        let mut solver = SolverInstance::<Customs>::new(2020, 6, "abc\n\na\nb\nc\n").unwrap();
        assert_eq!(solver.input_lines(), 5);
        assert_eq!((solver.year(), solver.day(), solver.parts()), (2020, 6, 2));
        assert!(solver.parse_duration() >= TimeDelta::zero());

        let result = solver.solve(2).unwrap();
        assert_eq!((result.part, result.answer.as_str()), (2, "3"));
        assert!(result.duration >= TimeDelta::zero());
        assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
    }
}
