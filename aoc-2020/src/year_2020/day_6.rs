//! Day 6: Custom Customs

use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{blank_line_groups, into_parse_error};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 6, tags = ["2020", "sets"])]
pub struct Solver;

/// One bit per question `a..=z`, one mask per person, grouped
type Groups = Vec<Vec<u32>>;

fn answers(person: &str) -> anyhow::Result<u32> {
    person.bytes().try_fold(0u32, |mask, b| {
        if !b.is_ascii_lowercase() {
            bail!("unexpected answer '{}' in '{person}'", b as char);
        }
        Ok(mask | 1 << (b - b'a'))
    })
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Groups> {
    blank_line_groups(lines)
        .into_iter()
        .map(|group| group.into_iter().map(answers).collect::<anyhow::Result<Vec<_>>>())
        .collect()
}

fn anyone(groups: &Groups) -> u32 {
    groups
        .iter()
        .map(|g| g.iter().fold(0u32, |acc, m| acc | m).count_ones())
        .sum()
}

fn everyone(groups: &Groups) -> u32 {
    groups
        .iter()
        .map(|g| g.iter().fold(u32::MAX, |acc, m| acc & m).count_ones())
        .sum()
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u32> {
    Ok(anyone(&parse(lines)?))
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u32> {
    Ok(everyone(&parse(lines)?))
}

impl AocParser for Solver {
    type SharedData<'a> = Groups;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(anyone(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(everyone(shared).to_string())
    }
}
