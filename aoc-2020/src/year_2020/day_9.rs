//! Day 9: Encoding Error

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::{Itertools, MinMaxResult};

use crate::utils::input::{into_parse_error, into_solve_error, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 9, tags = ["2020", "sliding-window"])]
pub struct Solver;

pub const PREAMBLE: usize = 25;

/// First number that is not the sum of two of the `preamble` numbers before it
pub fn find_first_invalid_num(numbers: &[u64], preamble: usize) -> anyhow::Result<u64> {
    numbers
        .windows(preamble + 1)
        .find(|window| {
            let (candidates, target) = window.split_at(preamble);
            !candidates
                .iter()
                .tuple_combinations()
                .any(|(a, b)| a + b == target[0])
        })
        .map(|window| window[preamble])
        .ok_or_else(|| anyhow!("every number is a sum of two preceding numbers"))
}

/// Contiguous run of at least two numbers adding up to `target`
pub fn find_contiguous_sum_to(numbers: &[u64], target: u64) -> anyhow::Result<&[u64]> {
    let (mut start, mut end, mut sum) = (0, 0, 0u64);
    loop {
        let len = end - start;
        if sum == target && len >= 2 {
            return Ok(&numbers[start..end]);
        }
        if (sum < target || len < 2) && end < numbers.len() {
            sum += numbers[end];
            end += 1;
        } else if start < end {
            sum -= numbers[start];
            start += 1;
        } else {
            break;
        }
    }
    Err(anyhow!("no contiguous run adds up to {target}"))
}

fn weakness(numbers: &[u64], preamble: usize) -> anyhow::Result<u64> {
    let invalid = find_first_invalid_num(numbers, preamble)?;
    match find_contiguous_sum_to(numbers, invalid)?.iter().minmax() {
        MinMaxResult::MinMax(min, max) => Ok(min + max),
        _ => Err(anyhow!("run is shorter than two numbers")),
    }
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    find_first_invalid_num(&parse_lines(lines)?, PREAMBLE)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    weakness(&parse_lines(lines)?, PREAMBLE)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        find_first_invalid_num(shared, PREAMBLE)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        weakness(shared, PREAMBLE)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [u64; 20] = [
        35, 20, 15, 25, 47, 40, 62, 55, 65, 95, 102, 117, 150, 182, 127, 219, 299, 277, 309, 576,
    ];

    #[test]
    fn test_first_invalid() {
        assert_eq!(find_first_invalid_num(&EXAMPLE, 5).unwrap(), 127);
    }

    #[test]
    fn test_equal_values_at_different_positions_form_a_pair() {
        assert_eq!(find_first_invalid_num(&[5, 5, 10, 15, 99], 2).unwrap(), 99);
        assert!(find_first_invalid_num(&[5, 5, 10], 2).is_err());
    }

    #[test]
    fn test_contiguous_run() {
        assert_eq!(find_contiguous_sum_to(&EXAMPLE, 127).unwrap(), &[15, 25, 47, 40]);
        assert!(find_contiguous_sum_to(&[1, 2, 3], 100).is_err());
    }

    #[test]
    fn test_weakness() {
        assert_eq!(weakness(&EXAMPLE, 5).unwrap(), 62);
    }

    #[test]
    fn test_entry_points_use_full_preamble() {
        let lines: Vec<String> = (1..=25).chain([26, 49, 100]).map(|n| n.to_string()).collect();
        assert_eq!(first(lines.iter().map(String::as_str)).unwrap(), 100);
    }
}
