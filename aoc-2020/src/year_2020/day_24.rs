//! Day 24: Lobby Layout

use std::collections::{HashMap, HashSet};

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{into_parse_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 24, tags = ["2020", "automaton"])]
pub struct Solver;

const DAYS: usize = 100;

/// Axial hex coordinates (q, r)
pub type Hex = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
    NorthEast,
}

impl Direction {
    const ALL: [Self; 6] = [
        Self::East,
        Self::SouthEast,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
        Self::NorthEast,
    ];

    fn offset(self) -> Hex {
        match self {
            Self::East => (1, 0),
            Self::SouthEast => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (0, -1),
            Self::NorthEast => (1, -1),
        }
    }
}

/// Split an unseparated run of `e`, `se`, `sw`, `w`, `nw`, `ne`
pub fn parse_directions(line: &str) -> anyhow::Result<Vec<Direction>> {
    let mut directions = Vec::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        let direction = match c {
            'e' => Direction::East,
            'w' => Direction::West,
            'n' | 's' => match (c, chars.next()) {
                ('n', Some('e')) => Direction::NorthEast,
                ('n', Some('w')) => Direction::NorthWest,
                ('s', Some('e')) => Direction::SouthEast,
                ('s', Some('w')) => Direction::SouthWest,
                (v, other) => bail!("'{v}' must be followed by e or w, found {other:?}"),
            },
            other => bail!("unknown direction '{other}' in '{line}'"),
        };
        directions.push(direction);
    }
    Ok(directions)
}

fn walk(directions: &[Direction]) -> Hex {
    directions.iter().fold((0, 0), |(q, r), d| {
        let (dq, dr) = d.offset();
        (q + dq, r + dr)
    })
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<Vec<Direction>>> {
    non_empty_lines(lines).map(parse_directions).collect()
}

/// Tiles left black after flipping the end of every path
pub fn black_tiles(paths: &[Vec<Direction>]) -> HashSet<Hex> {
    let mut black = HashSet::new();
    for path in paths {
        let tile = walk(path);
        if !black.remove(&tile) {
            black.insert(tile);
        }
    }
    black
}

/// One day of the exhibit: black tiles with 0 or more than 2 black
/// neighbours turn white, white tiles with exactly 2 turn black
pub fn next_day(black: &HashSet<Hex>) -> HashSet<Hex> {
    let mut neighbours: HashMap<Hex, u8> = HashMap::new();
    for &(q, r) in black {
        for d in Direction::ALL {
            let (dq, dr) = d.offset();
            *neighbours.entry((q + dq, r + dr)).or_default() += 1;
        }
    }
    neighbours
        .into_iter()
        .filter(|(tile, n)| *n == 2 || (*n == 1 && black.contains(tile)))
        .map(|(tile, _)| tile)
        .collect()
}

fn black_after(paths: &[Vec<Direction>], days: usize) -> usize {
    let mut black = black_tiles(paths);
    for _ in 0..days {
        black = next_day(&black);
    }
    black.len()
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(black_tiles(&parse(lines)?).len())
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(black_after(&parse(lines)?, DAYS))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<Direction>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(black_tiles(shared).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(black_after(shared, DAYS).to_string())
    }
}
