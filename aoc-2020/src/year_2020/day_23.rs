//! Day 23: Crab Cups

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::input::{into_parse_error, into_solve_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 23, tags = ["2020", "simulation"])]
pub struct Solver;

const FIRST_MOVES: usize = 100;
const MANY_CUPS: usize = 1_000_000;
const MANY_MOVES: usize = 10_000_000;

/// Circle of cups labelled 1..=n where `next[label]` is the label of the
/// cup clockwise of it; index 0 is unused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cups {
    next: Vec<u32>,
    current: u32,
}

impl Cups {
    /// Build the circle from the given labels, padded with increasing
    /// labels up to `total` cups
    pub fn new(labels: &[u32], total: usize) -> anyhow::Result<Self> {
        let total = total.max(labels.len());
        let mut seen = vec![false; labels.len() + 1];
        for &l in labels {
            let slot = seen
                .get_mut(l as usize)
                .filter(|_| l > 0)
                .with_context(|| format!("cup label {l} is outside 1..={}", labels.len()))?;
            if std::mem::replace(slot, true) {
                bail!("cup label {l} appears twice");
            }
        }

        let order = labels
            .iter()
            .copied()
            .chain((labels.len() as u32 + 1)..=(total as u32));
        let mut next = vec![0; total + 1];
        let mut first = None;
        let mut prev: Option<u32> = None;
        for label in order {
            match prev {
                Some(p) => next[p as usize] = label,
                None => first = Some(label),
            }
            prev = Some(label);
        }
        let (Some(first), Some(last)) = (first, prev) else {
            bail!("no cups");
        };
        next[last as usize] = first;
        Ok(Self {
            next,
            current: first,
        })
    }

    fn max_label(&self) -> u32 {
        self.next.len() as u32 - 1
    }

    pub fn play_move(&mut self) {
        let a = self.next[self.current as usize];
        let b = self.next[a as usize];
        let c = self.next[b as usize];

        let mut destination = self.current;
        loop {
            destination = if destination == 1 {
                self.max_label()
            } else {
                destination - 1
            };
            if destination != a && destination != b && destination != c {
                break;
            }
        }

        self.next[self.current as usize] = self.next[c as usize];
        self.next[c as usize] = self.next[destination as usize];
        self.next[destination as usize] = a;
        self.current = self.next[self.current as usize];
    }

    pub fn play(&mut self, moves: usize) {
        for _ in 0..moves {
            self.play_move();
        }
    }

    /// Labels clockwise after cup 1
    pub fn after_one(&self) -> impl Iterator<Item = u32> + '_ {
        let mut label = 1;
        std::iter::from_fn(move || {
            label = self.next[label as usize];
            (label != 1).then_some(label)
        })
    }
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<u32>> {
    let line = non_empty_lines(lines).next().context("missing cup labels")?;
    line.chars()
        .map(|c| c.to_digit(10).with_context(|| format!("'{c}' is not a cup label")))
        .collect()
}

pub fn labels_after(labels: &[u32], moves: usize) -> anyhow::Result<String> {
    if labels.len() < 5 {
        bail!("need at least 5 cups to pick up 3");
    }
    let mut cups = Cups::new(labels, labels.len())?;
    cups.play(moves);
    Ok(cups.after_one().join(""))
}

fn star_product(labels: &[u32]) -> anyhow::Result<u64> {
    let mut cups = Cups::new(labels, MANY_CUPS)?;
    cups.play(MANY_MOVES);
    Ok(cups.after_one().take(2).map(u64::from).product())
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<String> {
    labels_after(&parse(lines)?, FIRST_MOVES)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    star_product(&parse(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        labels_after(shared, FIRST_MOVES).map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        star_product(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [u32; 9] = [3, 8, 9, 1, 2, 5, 4, 6, 7];

    #[test]
    fn test_labels_after() {
        assert_eq!(labels_after(&EXAMPLE, 10).unwrap(), "92658374");
        assert_eq!(labels_after(&EXAMPLE, 100).unwrap(), "67384529");
    }

    #[test]
    fn test_first_move() {
        let mut cups = Cups::new(&EXAMPLE, 9).unwrap();
        cups.play_move();
        // 3 (8 9 1) 2 5 4 6 7 -> 3 2 8 9 1 5 4 6 7, current 2
        assert_eq!(cups.current, 2);
        assert_eq!(cups.after_one().collect::<Vec<_>>(), vec![5, 4, 6, 7, 3, 2, 8, 9]);
    }

    #[test]
    fn test_first() {
        assert_eq!(first(["389125467"]).unwrap(), "67384529");
    }

    #[test]
    fn test_second() {
        assert_eq!(second(["389125467"]).unwrap(), 149245887792);
    }

    #[test]
    fn test_padding() {
        let cups = Cups::new(&[2, 1], 5).unwrap();
        assert_eq!(cups.after_one().collect::<Vec<_>>(), vec![3, 4, 5, 2]);
    }

    #[test]
    fn test_invalid_labels() {
        assert!(first(["3891x5467"]).is_err());
        assert!(Cups::new(&[1, 1, 2], 3).is_err());
        assert!(Cups::new(&[0, 1, 2], 3).is_err());
        assert!(Cups::new(&[1, 2, 7], 3).is_err());
    }
}
