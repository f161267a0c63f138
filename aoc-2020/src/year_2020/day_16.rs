//! Day 16: Ticket Translation

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::input::{blank_line_groups, into_parse_error, into_solve_error, parse_csv};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 16, tags = ["2020", "constraints"])]
pub struct Solver;

static RULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]+): (\d+)-(\d+) or (\d+)-(\d+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<'a> {
    pub name: &'a str,
    ranges: [RangeInclusive<u64>; 2],
}

impl Rule<'_> {
    pub fn accepts(&self, value: u64) -> bool {
        self.ranges.iter().any(|r| r.contains(&value))
    }
}

#[derive(Debug, Clone)]
pub struct Notes<'a> {
    pub rules: Vec<Rule<'a>>,
    pub own: Vec<u64>,
    pub nearby: Vec<Vec<u64>>,
}

fn parse_rule(line: &str) -> anyhow::Result<Rule<'_>> {
    let caps = RULE_LINE
        .captures(line)
        .ok_or_else(|| anyhow!("unable to parse rule '{line}'"))?;
    let bound = |i: usize| -> anyhow::Result<u64> { Ok(caps[i].parse()?) };
    Ok(Rule {
        name: caps.get(1).map_or("", |m| m.as_str()),
        ranges: [bound(2)?..=bound(3)?, bound(4)?..=bound(5)?],
    })
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Notes<'a>> {
    let groups = blank_line_groups(lines);
    let [rules, own, nearby] = groups.as_slice() else {
        bail!("expected rules, your ticket and nearby tickets sections");
    };
    if own.first() != Some(&"your ticket:") || nearby.first() != Some(&"nearby tickets:") {
        bail!("ticket sections are missing their headers");
    }
    Ok(Notes {
        rules: rules.iter().map(|&l| parse_rule(l)).collect::<anyhow::Result<_>>()?,
        own: parse_csv(own.get(1).context("missing your ticket")?)?,
        nearby: nearby[1..]
            .iter()
            .map(|&l| parse_csv(l))
            .collect::<anyhow::Result<_>>()?,
    })
}

fn error_rate(notes: &Notes) -> u64 {
    notes
        .nearby
        .iter()
        .flatten()
        .filter(|&&v| !notes.rules.iter().any(|r| r.accepts(v)))
        .sum()
}

/// Field position for every rule name, by eliminating rules that some valid
/// ticket rejects and propagating positions with a single candidate
pub fn resolve_fields<'a>(notes: &Notes<'a>) -> anyhow::Result<HashMap<&'a str, usize>> {
    let valid: Vec<&Vec<u64>> = notes
        .nearby
        .iter()
        .filter(|t| t.iter().all(|&v| notes.rules.iter().any(|r| r.accepts(v))))
        .collect();
    let positions = notes.own.len();
    if valid.iter().any(|t| t.len() != positions) {
        bail!("tickets have different numbers of fields");
    }

    // candidates[pos] = indices of rules that accept every value at pos
    let mut candidates: Vec<Vec<usize>> = (0..positions)
        .map(|pos| {
            (0..notes.rules.len())
                .filter(|&r| {
                    notes.rules[r].accepts(notes.own[pos])
                        && valid.iter().all(|t| notes.rules[r].accepts(t[pos]))
                })
                .collect()
        })
        .collect();

    let mut resolved = HashMap::new();
    while resolved.len() < positions {
        let (pos, rule) = candidates
            .iter()
            .enumerate()
            .find_map(|(pos, c)| (c.len() == 1).then(|| (pos, c[0])))
            .ok_or_else(|| anyhow!("unable to resolve field positions"))?;
        resolved.insert(notes.rules[rule].name, pos);
        for c in &mut candidates {
            c.retain(|&r| r != rule);
        }
    }
    Ok(resolved)
}

fn departure_product(notes: &Notes) -> anyhow::Result<u64> {
    Ok(resolve_fields(notes)?
        .into_iter()
        .filter(|(name, _)| name.starts_with("departure"))
        .map(|(_, pos)| notes.own[pos])
        .product())
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    Ok(error_rate(&parse(lines)?))
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    departure_product(&parse(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = Notes<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(error_rate(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        departure_product(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
class: 1-3 or 5-7
row: 6-11 or 33-44
seat: 13-40 or 45-50

your ticket:
7,1,14

nearby tickets:
7,3,47
40,4,50
55,2,20
38,6,12";

    const FIELDS: &str = "\
class: 0-1 or 4-19
row: 0-5 or 8-19
seat: 0-13 or 16-19

your ticket:
11,12,13

nearby tickets:
3,9,18
15,1,5
5,14,9";

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE.lines()).unwrap(), 71);
    }

    #[test]
    fn test_resolve_fields() {
        let notes = parse(FIELDS.lines()).unwrap();
        let fields = resolve_fields(&notes).unwrap();
        assert_eq!(fields["row"], 0);
        assert_eq!(fields["class"], 1);
        assert_eq!(fields["seat"], 2);
    }

    #[test]
    fn test_second_without_departure_fields() {
        assert_eq!(second(FIELDS.lines()).unwrap(), 1);
    }

    #[test]
    fn test_second_with_departure_fields() {
        let input = FIELDS
            .replace("class:", "departure class:")
            .replace("seat:", "departure seat:");
        assert_eq!(second(input.lines()).unwrap(), 12 * 13);
    }

    #[test]
    fn test_missing_sections() {
        assert!(first(["class: 1-3 or 5-7"]).is_err());
    }
}
