//! Day 1: Report Repair

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::input::{into_parse_error, into_solve_error, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 1, tags = ["2020", "search"])]
pub struct Solver;

const TARGET: u64 = 2020;

/// Product of the first `k` distinct entries summing to 2020
fn find_product(expenses: &[u64], k: usize) -> anyhow::Result<u64> {
    expenses
        .iter()
        .combinations(k)
        .find(|combo| combo.iter().copied().sum::<u64>() == TARGET)
        .map(|combo| combo.into_iter().product())
        .ok_or_else(|| anyhow!("no combination of {k} expenses adds up to {TARGET}"))
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    find_product(&parse_lines(lines)?, 2)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    find_product(&parse_lines(lines)?, 3)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_product(shared, 2)
            .map(|p| p.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_product(shared, 3)
            .map(|p| p.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [&str; 6] = ["1721", "979", "366", "299", "675", "1456"];

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE).unwrap(), 514579);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE).unwrap(), 241861950);
    }

    #[test]
    fn test_no_combination() {
        let err = first(["1", "2", "3"]).unwrap_err();
        assert_eq!(err.to_string(), "no combination of 2 expenses adds up to 2020");
    }

    #[test]
    fn test_same_entry_not_reused() {
        assert!(first(["1010", "5"]).is_err());
        assert_eq!(first(["1010", "1010"]).unwrap(), 1020100);
    }
}
