//! Day 11: Seating System

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{into_parse_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 11, tags = ["2020", "grid", "automaton"])]
pub struct Solver;

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Floor,
    Empty,
    Occupied,
}

#[derive(Debug, Clone)]
pub struct Layout {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Layout {
    pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Self> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        for line in non_empty_lines(lines) {
            if *width.get_or_insert(line.len()) != line.len() {
                bail!("row {} has a different width", height + 1);
            }
            for c in line.chars() {
                cells.push(match c {
                    '.' => Cell::Floor,
                    'L' => Cell::Empty,
                    '#' => Cell::Occupied,
                    other => return Err(anyhow!("unexpected cell '{other}'")),
                });
            }
            height += 1;
        }
        Ok(Self {
            cells,
            width: width.unwrap_or(0),
            height,
        })
    }

    fn step_from(&self, index: usize, (dr, dc): (isize, isize)) -> Option<usize> {
        let row = (index / self.width).checked_add_signed(dr)?;
        let col = (index % self.width).checked_add_signed(dc)?;
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// For every seat, the seats it watches: adjacent ones, or the first seat
    /// visible in each direction
    fn watched_seats(&self, line_of_sight: bool) -> Vec<Vec<usize>> {
        (0..self.cells.len())
            .map(|index| {
                if self.cells[index] == Cell::Floor {
                    return Vec::new();
                }
                DIRECTIONS
                    .iter()
                    .filter_map(|&dir| {
                        let mut pos = self.step_from(index, dir)?;
                        while line_of_sight && self.cells[pos] == Cell::Floor {
                            pos = self.step_from(pos, dir)?;
                        }
                        (self.cells[pos] != Cell::Floor).then_some(pos)
                    })
                    .collect()
            })
            .collect()
    }

    /// Apply the seating rules until nothing changes; returns occupied seats
    pub fn settle(&self, line_of_sight: bool, tolerance: usize) -> usize {
        let watched = self.watched_seats(line_of_sight);
        let mut cells = self.cells.clone();
        loop {
            let next: Vec<Cell> = cells
                .iter()
                .zip(&watched)
                .map(|(&cell, seats)| {
                    let occupied = seats
                        .iter()
                        .filter(|&&s| cells[s] == Cell::Occupied)
                        .count();
                    match cell {
                        Cell::Empty if occupied == 0 => Cell::Occupied,
                        Cell::Occupied if occupied >= tolerance => Cell::Empty,
                        other => other,
                    }
                })
                .collect();
            if next == cells {
                return cells.iter().filter(|&&c| c == Cell::Occupied).count();
            }
            cells = next;
        }
    }
}

fn part_one(layout: &Layout) -> usize {
    layout.settle(false, 4)
}

fn part_two(layout: &Layout) -> usize {
    layout.settle(true, 5)
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(part_one(&Layout::parse(lines)?))
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(part_two(&Layout::parse(lines)?))
}

impl AocParser for Solver {
    type SharedData<'a> = Layout;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Layout::parse(input.lines()).map_err(into_parse_error)
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

    const EXAMPLE: &str = "\
L.LL.LL.LL
LLLLLLL.LL
L.L.L..L..
LLLL.LL.LL
L.LL.LL.LL
L.LLLLL.LL
..L.L.....
LLLLLLLLLL
L.LLLLLL.L
L.LLLLL.LL";

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE.lines()).unwrap(), 37);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE.lines()).unwrap(), 26);
    }

    #[test]
    fn test_line_of_sight() {
        let layout = Layout::parse([".L.L.#.#.#.#.", "............."]).unwrap();
        let watched = layout.watched_seats(true);
        // the leftmost empty seat only sees the seat to its right
        assert_eq!(watched[1], vec![3]);
    }

    #[test]
    fn test_ragged_rows() {
        assert!(Layout::parse(["L.L", "LL"]).is_err());
    }
}
