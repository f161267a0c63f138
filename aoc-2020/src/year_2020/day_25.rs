//! Day 25: Combo Breaker

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{into_parse_error, into_solve_error, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 25, tags = ["2020", "number-theory"])]
pub struct Solver;

const MODULUS: u64 = 20201227;
const SUBJECT: u64 = 7;

/// Day 25 has no second puzzle; the star is given for finishing the others
pub const SECOND_ANSWER: &str = "Merry Christmas!";

/// `subject` raised to `loop_size`, modulo 20201227
pub fn transform(subject: u64, loop_size: u64) -> u64 {
    let (mut base, mut exp, mut value) = (subject % MODULUS, loop_size, 1);
    while exp > 0 {
        if exp & 1 == 1 {
            value = value * base % MODULUS;
        }
        base = base * base % MODULUS;
        exp >>= 1;
    }
    value
}

/// Smallest loop size that turns 7 into `public_key`
pub fn loop_size(public_key: u64) -> anyhow::Result<u64> {
    if public_key == 0 || public_key >= MODULUS {
        bail!("public key {public_key} is not in 1..{MODULUS}");
    }
    let mut value = 1;
    for size in 0..MODULUS {
        if value == public_key {
            return Ok(size);
        }
        value = value * SUBJECT % MODULUS;
    }
    bail!("no loop size produces {public_key}")
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<(u64, u64)> {
    let keys: Vec<u64> = parse_lines(lines)?;
    match keys.as_slice() {
        &[card, door] => Ok((card, door)),
        _ => bail!("expected 2 public keys, found {}", keys.len()),
    }
}

/// Encryption key shared by the card and the door
pub fn encryption_key((card, door): (u64, u64)) -> anyhow::Result<u64> {
    let card_loop = loop_size(card).context("card")?;
    Ok(transform(door, card_loop))
}

/// Both sides of the handshake must derive the same key
pub fn handshake((card, door): (u64, u64)) -> anyhow::Result<&'static str> {
    let from_card = encryption_key((card, door))?;
    let from_door = transform(card, loop_size(door).context("door")?);
    if from_card != from_door {
        bail!("card key {from_card} and door key {from_door} disagree");
    }
    Ok(SECOND_ANSWER)
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    encryption_key(parse(lines)?)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<&'static str> {
    handshake(parse(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = (u64, u64);

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        encryption_key(*shared)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        handshake(*shared)
            .map(str::to_string)
            .map_err(into_solve_error)
    }
}
