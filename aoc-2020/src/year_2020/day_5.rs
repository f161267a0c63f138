//! Day 5: Binary Boarding

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{into_parse_error, into_solve_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 5, tags = ["2020", "binary"])]
pub struct Solver;

const ROWS: u32 = 128;
const COLUMNS: u32 = 8;

/// Narrow `0..size` by halves: `B`/`R` keep the upper half, `F`/`L` the lower
pub fn binary_partition_number(code: &str, size: u32) -> u32 {
    let (mut low, mut high) = (0, size);
    for c in code.chars() {
        let mid = (low + high) / 2;
        if c == 'B' || c == 'R' {
            low = mid;
        } else {
            high = mid;
        }
    }
    low
}

pub fn seat_id(pass: &str) -> anyhow::Result<u32> {
    if pass.len() != 10 || !pass.is_ascii() {
        bail!("boarding pass '{pass}' must have 10 ASCII characters");
    }
    let (row, column) = pass.split_at(7);
    if !row.chars().all(|c| c == 'F' || c == 'B') || !column.chars().all(|c| c == 'L' || c == 'R') {
        bail!("boarding pass '{pass}' has invalid characters");
    }
    let row = binary_partition_number(row, ROWS);
    let column = binary_partition_number(column, COLUMNS);
    Ok(row * COLUMNS + column)
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<u32>> {
    non_empty_lines(lines).map(seat_id).collect()
}

fn highest(ids: &[u32]) -> anyhow::Result<u32> {
    ids.iter()
        .copied()
        .max()
        .ok_or_else(|| anyhow!("no boarding passes"))
}

/// The free seat whose neighbours on both sides are taken
fn find_own_seat(ids: &[u32]) -> anyhow::Result<u32> {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted
        .windows(2)
        .find(|pair| pair[1] == pair[0] + 2)
        .map(|pair| pair[0] + 1)
        .ok_or_else(|| anyhow!("boarding pass not found"))
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u32> {
    highest(&parse(lines)?)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u32> {
    find_own_seat(&parse(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        highest(shared)
            .map(|id| id.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_own_seat(shared)
            .map(|id| id.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_partition() {
        assert_eq!(binary_partition_number("FBFBBFF", ROWS), 44);
        assert_eq!(binary_partition_number("BFFFBBF", ROWS), 70);
        assert_eq!(binary_partition_number("RLR", COLUMNS), 5);
        assert_eq!(binary_partition_number("RRR", COLUMNS), 7);
    }

    #[test]
    fn test_seat_ids() {
        assert_eq!(seat_id("FBFBBFFRLR").unwrap(), 357);
        assert_eq!(seat_id("BFFFBBFRRR").unwrap(), 567);
        assert_eq!(seat_id("FFFBBBFRRR").unwrap(), 119);
        assert_eq!(seat_id("BBFFBBFRLL").unwrap(), 820);
    }

    #[test]
    fn test_first() {
        assert_eq!(first(["BFFFBBFRRR", "FFFBBBFRRR", "BBFFBBFRLL"]).unwrap(), 820);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(["FFFFFFFLLL", "FFFFFFFLLR", "FFFFFFFLRR"]).unwrap(), 2);
        assert!(second(["FFFFFFFLLL", "FFFFFFFLLR"]).is_err());
    }

    #[test]
    fn test_malformed_pass() {
        assert!(seat_id("FBFBBFFRL").is_err());
        assert!(seat_id("FBFBBFFRLX").is_err());
        assert!(seat_id("FBFBBFRRLR").is_err());
    }
}
