//! Day 7: Handy Haversacks

use std::collections::{HashMap, HashSet, VecDeque};

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, HashMapBackend};
use crate::utils::input::{into_parse_error, into_solve_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 7, tags = ["2020", "graph", "dp"])]
pub struct Solver;

const SHINY_GOLD: &str = "shiny gold";

/// Bag rules as a graph in both directions
#[derive(Debug, Default)]
pub struct BagGraph<'a> {
    contains: HashMap<&'a str, Vec<(u64, &'a str)>>,
    contained_by: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> BagGraph<'a> {
    pub fn parse(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Self> {
        let mut graph = Self::default();
        for line in non_empty_lines(lines) {
            let (outer, inner) =
                parse_rule(line).with_context(|| format!("unable to parse line '{line}'"))?;
            for &(_, color) in &inner {
                graph.contained_by.entry(color).or_default().push(outer);
            }
            graph.contains.insert(outer, inner);
        }
        Ok(graph)
    }

    fn children(&self, color: &str) -> &[(u64, &'a str)] {
        self.contains.get(color).map(Vec::as_slice).unwrap_or_default()
    }

    /// Colors that can eventually hold `color`
    pub fn containers_of(&self, color: &str) -> HashSet<&'a str> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([color]);
        while let Some(current) = queue.pop_front() {
            for &parent in self.contained_by.get(current).into_iter().flatten() {
                if seen.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        seen
    }

    /// A bag reachable from `color` that ends up inside itself
    fn cycle_from(&self, color: &'a str) -> Option<&'a str> {
        fn visit<'a>(
            graph: &BagGraph<'a>,
            bag: &'a str,
            visiting: &mut HashSet<&'a str>,
            done: &mut HashSet<&'a str>,
        ) -> Option<&'a str> {
            if done.contains(bag) {
                return None;
            }
            if !visiting.insert(bag) {
                return Some(bag);
            }
            let cycle = graph
                .children(bag)
                .iter()
                .find_map(|&(_, child)| visit(graph, child, visiting, done));
            visiting.remove(bag);
            done.insert(bag);
            cycle
        }
        visit(self, color, &mut HashSet::new(), &mut HashSet::new())
    }

    /// Number of bags inside one `color` bag
    pub fn bags_inside(&self, color: &'a str) -> anyhow::Result<u64> {
        if !self.contains.contains_key(color) {
            return Err(anyhow!("no rule for '{color}' bags"));
        }
        if let Some(bag) = self.cycle_from(color) {
            bail!("'{bag}' bags end up inside themselves");
        }
        let cache = DpCache::new(
            HashMapBackend::new(),
            |bag: &&'a str| self.children(bag).iter().map(|&(_, c)| c).collect(),
            |bag: &&'a str, inside: Vec<u64>| {
                self.children(bag)
                    .iter()
                    .zip(inside)
                    .map(|(&(n, _), total)| n * (1 + total))
                    .sum()
            },
        );
        Ok(cache.get(&color))
    }
}

/// `light red bags contain 1 bright white bag, 2 muted yellow bags.`
fn parse_rule(line: &str) -> anyhow::Result<(&str, Vec<(u64, &str)>)> {
    let (outer, rest) = line
        .split_once(" bags contain ")
        .context("missing 'bags contain'")?;
    let rest = rest.trim_end_matches('.');
    if rest == "no other bags" {
        return Ok((outer, Vec::new()));
    }
    let inner = rest
        .split(", ")
        .map(|item| -> anyhow::Result<(u64, &str)> {
            let item = item
                .strip_suffix(" bags")
                .or_else(|| item.strip_suffix(" bag"))
                .with_context(|| format!("'{item}' does not end in bag(s)"))?;
            let (count, color) = item
                .split_once(' ')
                .with_context(|| format!("'{item}' has no count"))?;
            Ok((count.parse()?, color))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok((outer, inner))
}

fn part_one(graph: &BagGraph) -> usize {
    graph.containers_of(SHINY_GOLD).len()
}

fn part_two(graph: &BagGraph) -> anyhow::Result<u64> {
    graph.bags_inside(SHINY_GOLD)
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(part_one(&BagGraph::parse(lines)?))
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    part_two(&BagGraph::parse(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = BagGraph<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        BagGraph::parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(part_one(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        part_two(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}
