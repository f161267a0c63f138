//! Day 12: Rain Risk

use std::str::FromStr;

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{into_parse_error, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 12, tags = ["2020", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move by (east, north)
    Move(i64, i64),
    /// Quarter turns counter-clockwise (negative for clockwise)
    Turn(i64),
    Forward(i64),
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let kind = chars.next().context("empty action")?;
        let value: i64 = chars
            .as_str()
            .parse()
            .with_context(|| format!("bad value in '{s}'"))?;
        let quarter_turns = |degrees: i64| -> anyhow::Result<i64> {
            if degrees % 90 != 0 {
                bail!("turn of {degrees} degrees is not a multiple of 90");
            }
            Ok(degrees / 90)
        };
        Ok(match kind {
            'N' => Action::Move(0, value),
            'S' => Action::Move(0, -value),
            'E' => Action::Move(value, 0),
            'W' => Action::Move(-value, 0),
            'L' => Action::Turn(quarter_turns(value)?),
            'R' => Action::Turn(-quarter_turns(value)?),
            'F' => Action::Forward(value),
            other => bail!("unknown action '{other}'"),
        })
    }
}

/// Rotate (east, north) by quarter turns counter-clockwise
fn rotate((x, y): (i64, i64), quarter_turns: i64) -> (i64, i64) {
    match quarter_turns.rem_euclid(4) {
        0 => (x, y),
        1 => (-y, x),
        2 => (-x, -y),
        _ => (y, -x),
    }
}

/// Navigate with a direction vector. When `move_vector` is set, N/S/E/W move
/// the vector (waypoint) instead of the ship.
fn navigate(actions: &[Action], start_vector: (i64, i64), move_vector: bool) -> i64 {
    let mut ship = (0i64, 0i64);
    let mut vector = start_vector;
    for &action in actions {
        match action {
            Action::Move(dx, dy) if move_vector => vector = (vector.0 + dx, vector.1 + dy),
            Action::Move(dx, dy) => ship = (ship.0 + dx, ship.1 + dy),
            Action::Turn(q) => vector = rotate(vector, q),
            Action::Forward(n) => ship = (ship.0 + vector.0 * n, ship.1 + vector.1 * n),
        }
    }
    ship.0.abs() + ship.1.abs()
}

fn part_one(actions: &[Action]) -> i64 {
    navigate(actions, (1, 0), false)
}

fn part_two(actions: &[Action]) -> i64 {
    navigate(actions, (10, 1), true)
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<i64> {
    Ok(part_one(&parse_lines(lines)?))
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<i64> {
    Ok(part_two(&parse_lines(lines)?))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Action>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(part_one(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(part_two(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [&str; 5] = ["F10", "N3", "F7", "R90", "F11"];

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE).unwrap(), 25);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE).unwrap(), 286);
    }

    #[test]
    fn test_rotate() {
        assert_eq!(rotate((10, 4), -1), (4, -10));
        assert_eq!(rotate((10, 4), 1), (-4, 10));
        assert_eq!(rotate((10, 4), 6), (-10, -4));
    }

    #[test]
    fn test_bad_turn() {
        assert!("R45".parse::<Action>().is_err());
        assert!("X10".parse::<Action>().is_err());
    }
}
