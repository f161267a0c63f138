//! Day 14: Docking Data

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::input::{into_parse_error, into_solve_error, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 14, tags = ["2020", "bits"])]
pub struct Solver;

const MASK_WIDTH: usize = 36;

static MEM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^mem\[(\d+)\] = (\d+)$").unwrap());

/// Set or clear bit `bit` of `value`
pub fn overwrite_bit(value: u64, bit: usize, set: bool) -> u64 {
    if set {
        value | (1 << bit)
    } else {
        value & !(1 << bit)
    }
}

/// Value of a string of binary digits, where `one` marks the set bits
pub fn binstr_to_int(s: &str, one: char) -> u64 {
    s.chars()
        .fold(0, |acc, c| (acc << 1) | u64::from(c == one))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    ones: u64,
    zeros: u64,
    floating: Vec<usize>,
}

impl Mask {
    fn apply_to_value(&self, value: u64) -> u64 {
        (value | self.ones) & !self.zeros
    }

    /// Every address the decoder writes to
    fn addresses(&self, address: u64) -> Vec<u64> {
        let base = address | self.ones;
        let mut addresses = vec![base];
        for &bit in &self.floating {
            addresses = addresses
                .into_iter()
                .flat_map(|a| [overwrite_bit(a, bit, false), overwrite_bit(a, bit, true)])
                .collect();
        }
        addresses
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    SetMask(Mask),
    Write { address: u64, value: u64 },
}

impl FromStr for Instruction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(mask) = s.strip_prefix("mask = ") {
            if mask.len() != MASK_WIDTH || !mask.chars().all(|c| matches!(c, 'X' | '0' | '1')) {
                bail!("mask '{mask}' must be {MASK_WIDTH} of X, 0 or 1");
            }
            let floating = mask
                .chars()
                .rev()
                .enumerate()
                .filter(|&(_, c)| c == 'X')
                .map(|(bit, _)| bit)
                .collect();
            return Ok(Self::SetMask(Mask {
                ones: binstr_to_int(mask, '1'),
                zeros: binstr_to_int(mask, '0'),
                floating,
            }));
        }
        let caps = MEM_LINE.captures(s).context("expected mask or mem write")?;
        Ok(Self::Write {
            address: caps[1].parse()?,
            value: caps[2].parse()?,
        })
    }
}

fn run(program: &[Instruction], floating_addresses: bool) -> anyhow::Result<u64> {
    let mut memory = HashMap::new();
    let mut mask: Option<&Mask> = None;
    for instruction in program {
        match instruction {
            Instruction::SetMask(m) => mask = Some(m),
            Instruction::Write { address, value } => {
                let mask = mask.context("memory write before any mask")?;
                if floating_addresses {
                    for a in mask.addresses(*address) {
                        memory.insert(a, *value);
                    }
                } else {
                    memory.insert(*address, mask.apply_to_value(*value));
                }
            }
        }
    }
    Ok(memory.values().sum())
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    run(&parse_lines(lines)?, false)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    run(&parse_lines(lines)?, true)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let program: Vec<Instruction> = parse_lines(input.lines()).map_err(into_parse_error)?;
        if matches!(program.first(), Some(Instruction::Write { .. })) {
            return Err(ParseError::MissingData("program must start with a mask".into()));
        }
        Ok(program)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        run(shared, false)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        run(shared, true)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first() {
        let program = [
            "mask = XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX0X",
            "mem[8] = 11",
            "mem[7] = 101",
            "mem[8] = 0",
        ];
        assert_eq!(first(program).unwrap(), 165);
    }

    #[test]
    fn test_second() {
        let program = [
            "mask = 000000000000000000000000000000X1001X",
            "mem[42] = 100",
            "mask = 00000000000000000000000000000000X0XX",
            "mem[26] = 1",
        ];
        assert_eq!(second(program).unwrap(), 208);
    }

    #[test]
    fn test_bit_helpers() {
        assert_eq!(overwrite_bit(0b1011, 2, true), 0b1111);
        assert_eq!(overwrite_bit(0b1011, 1, false), 0b1001);
        assert_eq!(binstr_to_int("X1X0", '1'), 0b0100);
        assert_eq!(binstr_to_int("X1X0", 'X'), 0b1010);
    }

    #[test]
    fn test_floating_addresses() {
        let Instruction::SetMask(mask) = "mask = 000000000000000000000000000000X1001X"
            .parse::<Instruction>()
            .unwrap()
        else {
            panic!("expected a mask");
        };
        let mut addresses = mask.addresses(42);
        addresses.sort_unstable();
        assert_eq!(addresses, vec![26, 27, 58, 59]);
    }

    #[test]
    fn test_write_before_mask() {
        assert!(first(["mem[1] = 2"]).is_err());
        assert!(<Solver as AocParser>::parse("mem[1] = 2").is_err());
    }
}
