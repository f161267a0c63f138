//! Day 10: Adapter Array

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, VecBackend};
use crate::utils::input::{into_parse_error, into_solve_error, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 10, tags = ["2020", "dp"])]
pub struct Solver;

const MAX_STEP: u32 = 3;

/// Sorted joltages from the outlet (0) up to the device (max + 3)
fn chain(adapters: &[u32]) -> Vec<u32> {
    let mut chain = Vec::with_capacity(adapters.len() + 2);
    chain.push(0);
    chain.extend_from_slice(adapters);
    chain.sort_unstable();
    let device = chain.last().copied().unwrap_or(0) + MAX_STEP;
    chain.push(device);
    chain
}

/// Counts of 1-, 2- and 3-jolt differences along the full chain
pub fn find_jolt_diff_counts(adapters: &[u32]) -> anyhow::Result<[usize; 3]> {
    let mut counts = [0; 3];
    for pair in chain(adapters).windows(2) {
        match pair[1] - pair[0] {
            diff @ 1..=MAX_STEP => counts[diff as usize - 1] += 1,
            0 => bail!("duplicate adapter {}", pair[0]),
            diff => bail!("gap of {diff} jolts after adapter {}", pair[0]),
        }
    }
    Ok(counts)
}

/// Number of ways to reach each position of the chain from the outlet
struct Arrangements<'a> {
    chain: &'a [u32],
}

impl DpProblem<usize, u64> for Arrangements<'_> {
    fn deps(&self, index: &usize) -> Vec<usize> {
        let jolts = self.chain[*index];
        (index.saturating_sub(MAX_STEP as usize)..*index)
            .filter(|&prev| jolts - self.chain[prev] <= MAX_STEP)
            .collect()
    }

    fn compute(&self, index: &usize, deps: Vec<u64>) -> u64 {
        if *index == 0 { 1 } else { deps.iter().sum() }
    }
}

pub fn count_arrangements(adapters: &[u32]) -> u64 {
    let chain = chain(adapters);
    let last = chain.len() - 1;
    let cache = DpCache::with_problem(
        VecBackend::with_capacity(chain.len()),
        Arrangements { chain: &chain },
    );
    // Resolve bottom-up so the recursion depth stays small on long chains.
    (0..last).for_each(|i| {
        cache.get(&i);
    });
    cache.get(&last)
}

fn part_one(adapters: &[u32]) -> anyhow::Result<usize> {
    let [ones, _, threes] = find_jolt_diff_counts(adapters)?;
    Ok(ones * threes)
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    part_one(&parse_lines(lines)?)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    Ok(count_arrangements(&parse_lines(lines)?))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        part_one(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_arrangements(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: [u32; 11] = [16, 10, 15, 5, 1, 11, 7, 19, 6, 12, 4];
    const LONG: [u32; 31] = [
        28, 33, 18, 42, 31, 14, 46, 20, 48, 47, 24, 23, 49, 45, 19, 38, 39, 11, 1, 32, 25, 35, 8,
        17, 7, 9, 4, 2, 34, 10, 3,
    ];

    #[test]
    fn test_jolt_diffs() {
        assert_eq!(find_jolt_diff_counts(&SHORT).unwrap(), [7, 0, 5]);
        assert_eq!(find_jolt_diff_counts(&LONG).unwrap(), [22, 0, 10]);
        assert_eq!(part_one(&SHORT).unwrap(), 35);
        assert_eq!(part_one(&LONG).unwrap(), 220);
    }

    #[test]
    fn test_arrangements() {
        assert_eq!(count_arrangements(&SHORT), 8);
        assert_eq!(count_arrangements(&LONG), 19208);
    }

    #[test]
    fn test_gap_is_error() {
        assert!(find_jolt_diff_counts(&[1, 5]).is_err());
    }

    #[test]
    fn test_entry_points() {
        assert_eq!(first(["1", "4", "5"]).unwrap(), 2 * 2);
        assert_eq!(second(["1", "2", "3"]).unwrap(), 4);
    }
}
