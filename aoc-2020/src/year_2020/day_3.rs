//! Day 3: Toboggan Trajectory

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{into_parse_error, into_solve_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 3, tags = ["2020", "grid"])]
pub struct Solver;

const SLOPES: [(usize, usize); 5] = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)];

/// Tree map that repeats endlessly to the right
#[derive(Debug)]
pub struct Forest {
    rows: Vec<Vec<bool>>,
    width: usize,
}

impl Forest {
    pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Self> {
        let rows = non_empty_lines(lines)
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        '#' => Ok(true),
                        '.' => Ok(false),
                        other => Err(anyhow!("unexpected cell '{other}' in line '{line}'")),
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            bail!("rows have different widths");
        }
        Ok(Self { rows, width })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether a tree stands at (x, y); x wraps around
    pub fn get_cell(&self, x: usize, y: usize) -> anyhow::Result<bool> {
        let row = self
            .rows
            .get(y)
            .ok_or_else(|| anyhow!("row {y} is outside the map"))?;
        Ok(row[x % self.width])
    }

    pub fn count_trees_in_slope(&self, right: usize, down: usize) -> anyhow::Result<usize> {
        if down == 0 {
            bail!("slope must move down");
        }
        let mut trees = 0;
        for (step, y) in (0..self.height()).step_by(down).enumerate() {
            if self.get_cell(step * right, y)? {
                trees += 1;
            }
        }
        Ok(trees)
    }
}

fn part_one(forest: &Forest) -> anyhow::Result<usize> {
    forest.count_trees_in_slope(3, 1)
}

fn part_two(forest: &Forest) -> anyhow::Result<usize> {
    SLOPES
        .iter()
        .map(|&(right, down)| forest.count_trees_in_slope(right, down))
        .product()
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    part_one(&Forest::parse(lines)?)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    part_two(&Forest::parse(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = Forest;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Forest::parse(input.lines()).map_err(into_parse_error)
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
        part_two(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
..##.......
#...#...#..
.#....#..#.
..#.#...#.#
.#...##..#.
..#.##.....
.#.#.#....#
.#........#
#.##...#...
#...##....#
.#..#...#.#";

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE.lines()).unwrap(), 7);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE.lines()).unwrap(), 336);
    }

    #[test]
    fn test_slopes() {
        let forest = Forest::parse(EXAMPLE.lines()).unwrap();
        let counts: Vec<_> = SLOPES
            .iter()
            .map(|&(r, d)| forest.count_trees_in_slope(r, d).unwrap())
            .collect();
        assert_eq!(counts, vec![2, 7, 3, 4, 2]);
    }

    #[test]
    fn test_get_cell() {
        let forest = Forest::parse(EXAMPLE.lines()).unwrap();
        assert!(forest.get_cell(2, 0).unwrap());
        assert!(forest.get_cell(13, 0).unwrap());
        assert!(!forest.get_cell(0, 0).unwrap());
        assert!(forest.get_cell(0, 11).is_err());
    }
}
