//! Day 17: Conway Cubes

use std::collections::{HashMap, HashSet};

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::input::{into_parse_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 17, tags = ["2020", "automaton"])]
pub struct Solver;

const CYCLES: usize = 6;

/// Active cells of the initial 2-D slice as (x, y)
fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<(i32, i32)>> {
    let mut active = Vec::new();
    for (y, line) in non_empty_lines(lines).enumerate() {
        for (x, c) in line.chars().enumerate() {
            match c {
                '#' => active.push((x as i32, y as i32)),
                '.' => {}
                other => bail!("unexpected cube '{other}' on line {}", y + 1),
            }
        }
    }
    Ok(active)
}

fn neighbour_offsets<const N: usize>() -> Vec<[i32; N]> {
    (0..N)
        .map(|_| -1..=1)
        .multi_cartesian_product()
        .filter(|d| d.iter().any(|&v| v != 0))
        .map(|d| {
            let mut offset = [0; N];
            offset.copy_from_slice(&d);
            offset
        })
        .collect()
}

/// Run the cycles in `N` dimensions and count the active cubes
pub fn simulate<const N: usize>(slice: &[(i32, i32)], cycles: usize) -> usize {
    let offsets = neighbour_offsets::<N>();
    let mut active: HashSet<[i32; N]> = slice
        .iter()
        .map(|&(x, y)| {
            let mut cube = [0; N];
            cube[0] = x;
            cube[1] = y;
            cube
        })
        .collect();

    for _ in 0..cycles {
        let mut counts: HashMap<[i32; N], u8> = HashMap::new();
        for cube in &active {
            for offset in &offsets {
                let mut n = *cube;
                n.iter_mut().zip(offset).for_each(|(c, d)| *c += d);
                *counts.entry(n).or_default() += 1;
            }
        }
        active = counts
            .into_iter()
            .filter(|(cube, n)| *n == 3 || (*n == 2 && active.contains(cube)))
            .map(|(cube, _)| cube)
            .collect();
    }
    active.len()
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(simulate::<3>(&parse(lines)?, CYCLES))
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(simulate::<4>(&parse(lines)?, CYCLES))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(i32, i32)>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(simulate::<3>(shared, CYCLES).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(simulate::<4>(shared, CYCLES).to_string())
    }
}
