//! Day 19: Monster Messages

use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use regex::Regex;

use crate::utils::input::{blank_line_groups, into_parse_error, into_solve_error};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 19, tags = ["2020", "grammar"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Char(char),
    Alternatives(Vec<Vec<usize>>),
}

impl Rule {
    fn parse(body: &str) -> anyhow::Result<Self> {
        let body = body.trim();
        if let Some(quoted) = body.strip_prefix('"').and_then(|b| b.strip_suffix('"')) {
            let mut chars = quoted.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Self::Char(c)),
                _ => Err(anyhow!("literal rule must be one character: {body}")),
            };
        }
        let alternatives = body
            .split('|')
            .map(|seq| {
                seq.split_whitespace()
                    .map(|id| id.parse::<usize>().with_context(|| format!("bad rule id '{id}'")))
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        if alternatives.iter().any(Vec::is_empty) {
            bail!("empty alternative in '{body}'");
        }
        Ok(Self::Alternatives(alternatives))
    }
}

pub type Rules = HashMap<usize, Rule>;

#[derive(Debug, Clone)]
pub struct Puzzle<'a> {
    pub rules: Rules,
    pub messages: Vec<&'a str>,
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Puzzle<'a>> {
    let groups = blank_line_groups(lines);
    let [rules, messages] = groups.as_slice() else {
        bail!("expected a rules section and a messages section");
    };
    let rules = rules
        .iter()
        .map(|&line| -> anyhow::Result<(usize, Rule)> {
            let (id, body) = line
                .split_once(':')
                .with_context(|| format!("unable to parse rule '{line}'"))?;
            let id = id.trim().parse::<usize>().with_context(|| format!("bad rule id in '{line}'"))?;
            Ok((id, Rule::parse(body)?))
        })
        .collect::<anyhow::Result<Rules>>()?;
    Ok(Puzzle {
        rules,
        messages: messages.clone(),
    })
}

fn lookup(rules: &Rules, id: usize) -> anyhow::Result<&Rule> {
    rules.get(&id).ok_or_else(|| anyhow!("rule {id} is not defined"))
}

/// Expand rule `id` into a regular expression fragment
///
/// Fails on recursive rules, which have no finite expansion.
fn expand(rules: &Rules, id: usize, visiting: &mut Vec<usize>) -> anyhow::Result<String> {
    if visiting.contains(&id) {
        bail!("rule {id} is recursive");
    }
    let pattern = match lookup(rules, id)? {
        Rule::Char(c) => regex::escape(&c.to_string()),
        Rule::Alternatives(alternatives) => {
            visiting.push(id);
            let branches = alternatives
                .iter()
                .map(|seq| {
                    seq.iter()
                        .map(|&r| expand(rules, r, visiting))
                        .collect::<anyhow::Result<String>>()
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            visiting.pop();
            format!("(?:{})", branches.join("|"))
        }
    };
    Ok(pattern)
}

pub fn rule_regex(rules: &Rules, id: usize) -> anyhow::Result<Regex> {
    let pattern = expand(rules, id, &mut Vec::new())?;
    Ok(Regex::new(&format!("^{pattern}$"))?)
}

/// Every position in `message` where a match of rule `id` starting at
/// `start` can end
fn match_ends(rules: &Rules, id: usize, message: &[char], start: usize) -> anyhow::Result<Vec<usize>> {
    match lookup(rules, id)? {
        Rule::Char(c) => Ok(if message.get(start) == Some(c) {
            vec![start + 1]
        } else {
            Vec::new()
        }),
        Rule::Alternatives(alternatives) => {
            let mut ends = Vec::new();
            for seq in alternatives {
                let mut positions = vec![start];
                for &r in seq {
                    let mut next = Vec::new();
                    for p in positions {
                        // every rule consumes at least one character
                        if p < message.len() {
                            next.extend(match_ends(rules, r, message, p)?);
                        }
                    }
                    positions = next.into_iter().unique().collect();
                    if positions.is_empty() {
                        break;
                    }
                }
                ends.extend(positions);
            }
            Ok(ends.into_iter().unique().collect())
        }
    }
}

pub fn matches(rules: &Rules, id: usize, message: &str) -> anyhow::Result<bool> {
    let message: Vec<char> = message.chars().collect();
    Ok(match_ends(rules, id, &message, 0)?.contains(&message.len()))
}

fn count_regex_matches(puzzle: &Puzzle) -> anyhow::Result<usize> {
    let regex = rule_regex(&puzzle.rules, 0)?;
    Ok(puzzle.messages.iter().filter(|m| regex.is_match(m)).count())
}

/// Count matches after replacing rules 8 and 11 with their looping forms
fn count_looping_matches(puzzle: &Puzzle) -> anyhow::Result<usize> {
    let mut rules = puzzle.rules.clone();
    rules.insert(8, Rule::Alternatives(vec![vec![42], vec![42, 8]]));
    rules.insert(11, Rule::Alternatives(vec![vec![42, 31], vec![42, 11, 31]]));
    let mut count = 0;
    for message in &puzzle.messages {
        if matches(&rules, 0, message)? {
            count += 1;
        }
    }
    Ok(count)
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    count_regex_matches(&parse(lines)?)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    count_looping_matches(&parse(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = Puzzle<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_regex_matches(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        count_looping_matches(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}
