//! Day 15: Rambunctious Recitation

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{into_parse_error, into_solve_error, non_empty_lines, parse_csv};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 15, tags = ["2020", "simulation"])]
pub struct Solver;

const FIRST_TURN: usize = 2020;
const SECOND_TURN: usize = 30_000_000;

/// Number spoken on turn `turns` of the memory game
pub fn play(starting: &[u32], turns: usize) -> anyhow::Result<u32> {
    let Some((&last_start, earlier)) = starting.split_last() else {
        bail!("no starting numbers");
    };
    if turns <= starting.len() {
        return starting
            .get(turns.wrapping_sub(1))
            .copied()
            .context("turn must be at least 1");
    }

    // last_seen[n] = turn (1-based) when n was last spoken, 0 if never
    let size = turns.max(starting.iter().map(|&n| n as usize + 1).max().unwrap_or(0));
    let mut last_seen = vec![0u32; size];
    for (turn, &n) in earlier.iter().enumerate() {
        last_seen[n as usize] = turn as u32 + 1;
    }

    let mut current = last_start;
    for turn in starting.len()..turns {
        let turn = turn as u32;
        let seen = std::mem::replace(&mut last_seen[current as usize], turn);
        current = if seen == 0 { 0 } else { turn - seen };
    }
    Ok(current)
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<u32>> {
    parse_csv(non_empty_lines(lines).next().context("missing starting numbers")?)
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u32> {
    play(&parse(lines)?, FIRST_TURN)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u32> {
    play(&parse(lines)?, SECOND_TURN)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        play(shared, FIRST_TURN)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        play(shared, SECOND_TURN)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_turns() {
        let spoken: Vec<u32> = (1..=10).map(|t| play(&[0, 3, 6], t).unwrap()).collect();
        assert_eq!(spoken, vec![0, 3, 6, 0, 3, 3, 1, 0, 4, 0]);
    }

    #[test]
    fn test_first() {
        assert_eq!(first(["0,3,6"]).unwrap(), 436);
        assert_eq!(first(["1,3,2"]).unwrap(), 1);
        assert_eq!(first(["2,1,3"]).unwrap(), 10);
        assert_eq!(first(["1,2,3"]).unwrap(), 27);
        assert_eq!(first(["2,3,1"]).unwrap(), 78);
        assert_eq!(first(["3,2,1"]).unwrap(), 438);
        assert_eq!(first(["3,1,2"]).unwrap(), 1836);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(["0,3,6"]).unwrap(), 175594);
    }

    #[test]
    fn test_invalid_input() {
        assert!(first(["1,x,3"]).is_err());
        assert!(play(&[], 10).is_err());
        assert!(play(&[1, 2], 0).is_err());
    }
}
