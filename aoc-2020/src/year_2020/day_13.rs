//! Day 13: Shuttle Search

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::input::{into_parse_error, into_solve_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 13, tags = ["2020", "number-theory"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notes {
    pub earliest: u64,
    /// (offset in the list, bus id) for every bus that is in service
    pub buses: Vec<(u64, u64)>,
}

/// Parse the comma separated bus list, skipping `x` entries
pub fn parse_buses(line: &str) -> anyhow::Result<Vec<(u64, u64)>> {
    line.trim()
        .split(',')
        .enumerate()
        .filter(|(_, id)| *id != "x")
        .map(|(offset, id)| -> anyhow::Result<(u64, u64)> {
            let id: u64 = id
                .parse()
                .with_context(|| format!("bad bus id '{id}'"))?;
            if id == 0 {
                return Err(anyhow!("bus id must be positive"));
            }
            Ok((offset as u64, id))
        })
        .collect()
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Notes> {
    let mut lines = non_empty_lines(lines);
    let earliest = lines
        .next()
        .context("missing earliest timestamp")?
        .parse::<u64>()
        .context("bad earliest timestamp")?;
    let buses = parse_buses(lines.next().context("missing bus list")?)?;
    Ok(Notes { earliest, buses })
}

/// Wait multiplied by the id of the first bus to leave; on equal waits the
/// bus listed first wins
fn earliest_bus(notes: &Notes) -> anyhow::Result<u64> {
    notes
        .buses
        .iter()
        .map(|&(_, id)| ((id - notes.earliest % id) % id, id))
        .min_by_key(|&(wait, _)| wait)
        .map(|(wait, id)| wait * id)
        .ok_or_else(|| anyhow!("no bus in service"))
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Earliest t where every bus departs at t + offset, by sieving one bus at
/// a time, largest id first
pub fn earliest_sequence(buses: &[(u64, u64)]) -> anyhow::Result<u64> {
    let mut buses = buses.to_vec();
    buses.sort_unstable_by(|a, b| b.1.cmp(&a.1));

    let (mut t, mut step) = (0u64, 1u64);
    for &(offset, id) in &buses {
        let wanted = (id - offset % id) % id;
        let mut tries = 0;
        while t % id != wanted {
            t += step;
            tries += 1;
            if tries > id {
                return Err(anyhow!("bus {id} can never depart at offset {offset}"));
            }
        }
        step = (step / gcd(step, id))
            .checked_mul(id)
            .ok_or_else(|| anyhow!("period overflows"))?;
        debug!(id, t, step, "bus aligned");
    }
    Ok(t)
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    earliest_bus(&parse(lines)?)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    earliest_sequence(&parse(lines)?.buses)
}

impl AocParser for Solver {
    type SharedData<'a> = Notes;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        earliest_bus(shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        earliest_sequence(&shared.buses)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [&str; 2] = ["939", "7,13,x,x,59,x,31,19"];

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE).unwrap(), 295);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE).unwrap(), 1068781);
    }

    #[test]
    fn test_sequences() {
        let cases = [
            ("17,x,13,19", 3417),
            ("67,7,59,61", 754018),
            ("67,x,7,59,61", 779210),
            ("67,7,x,59,61", 1261476),
            ("1789,37,47,1889", 1202161486),
        ];
        for (line, expected) in cases {
            let buses = parse_buses(line).unwrap();
            assert_eq!(earliest_sequence(&buses).unwrap(), expected, "{line}");
        }
    }

    #[test]
    fn test_equal_waits_pick_first_listed() {
        assert_eq!(first(["8", "10,5"]).unwrap(), 20);
        assert_eq!(first(["8", "5,10"]).unwrap(), 10);
    }

    #[test]
    fn test_shared_factors_step_by_lcm() {
        assert_eq!(earliest_sequence(&[(0, 4), (0, 6), (3, 9)]).unwrap(), 24);
        assert_eq!(gcd(12, 18), 6);
    }

    #[test]
    fn test_unsatisfiable() {
        // same bus needed at two different offsets
        assert!(earliest_sequence(&[(0, 4), (1, 4)]).is_err());
    }
}
