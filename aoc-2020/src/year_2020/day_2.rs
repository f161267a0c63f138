//! Day 2: Password Philosophy

use std::sync::LazyLock;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::input::{into_parse_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 2, tags = ["2020", "parsing", "regex"])]
pub struct Solver;

static POLICY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+) (\w): (\S*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub first_value: usize,
    pub second_value: usize,
    pub letter: char,
}

impl PasswordPolicy {
    /// Letter count lies within `first_value..=second_value`
    pub fn allows_by_count(&self, password: &str) -> bool {
        let count = password.chars().filter(|&c| c == self.letter).count();
        (self.first_value..=self.second_value).contains(&count)
    }

    /// Exactly one of the 1-based positions holds the letter
    pub fn allows_by_position(&self, password: &str) -> bool {
        let at = |pos: usize| {
            pos.checked_sub(1)
                .and_then(|i| password.chars().nth(i))
                .is_some_and(|c| c == self.letter)
        };
        at(self.first_value) != at(self.second_value)
    }
}

fn parse_entry(line: &str) -> anyhow::Result<(PasswordPolicy, &str)> {
    let caps = POLICY_LINE
        .captures(line)
        .ok_or_else(|| anyhow!("unable to parse line '{line}'"))?;
    let policy = PasswordPolicy {
        first_value: caps[1].parse().context("first value")?,
        second_value: caps[2].parse().context("second value")?,
        letter: caps[3].chars().next().context("letter")?,
    };
    let password = caps.get(4).map_or("", |m| m.as_str());
    Ok((policy, password))
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<(PasswordPolicy, &'a str)>> {
    non_empty_lines(lines).map(parse_entry).collect()
}

fn count_valid(entries: &[(PasswordPolicy, &str)], valid: impl Fn(&PasswordPolicy, &str) -> bool) -> usize {
    entries.iter().filter(|(policy, pw)| valid(policy, *pw)).count()
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(count_valid(&parse(lines)?, PasswordPolicy::allows_by_count))
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(count_valid(&parse(lines)?, PasswordPolicy::allows_by_position))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(PasswordPolicy, &'a str)>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_valid(shared, PasswordPolicy::allows_by_count).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_valid(shared, PasswordPolicy::allows_by_position).to_string())
    }
}
