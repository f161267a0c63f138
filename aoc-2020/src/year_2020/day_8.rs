//! Day 8: Handheld Halting

use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::input::{into_parse_error, into_solve_error, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 8, tags = ["2020", "vm"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop(i64),
    Acc(i64),
    Jmp(i64),
}

impl FromStr for Instruction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, arg) = s
            .split_once(' ')
            .with_context(|| format!("missing argument in '{s}'"))?;
        let arg: i64 = arg.trim().parse()?;
        match op {
            "nop" => Ok(Self::Nop(arg)),
            "acc" => Ok(Self::Acc(arg)),
            "jmp" => Ok(Self::Jmp(arg)),
            other => bail!("unknown operation '{other}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The pointer ran past the last instruction
    Terminated(i64),
    /// An instruction was about to run a second time
    Looped(i64),
}

pub fn run(program: &[Instruction]) -> anyhow::Result<Outcome> {
    let mut visited = vec![false; program.len()];
    let (mut pointer, mut acc) = (0i64, 0i64);
    loop {
        let Ok(index) = usize::try_from(pointer) else {
            bail!("jumped to negative address {pointer}");
        };
        if index == program.len() {
            return Ok(Outcome::Terminated(acc));
        }
        let seen = visited
            .get_mut(index)
            .ok_or_else(|| anyhow!("jumped past the end to {index}"))?;
        if *seen {
            return Ok(Outcome::Looped(acc));
        }
        *seen = true;

        match program[index] {
            Instruction::Nop(_) => pointer += 1,
            Instruction::Acc(v) => {
                acc += v;
                pointer += 1;
            }
            Instruction::Jmp(offset) => pointer += offset,
        }
    }
}

fn acc_before_loop(program: &[Instruction]) -> anyhow::Result<i64> {
    match run(program)? {
        Outcome::Looped(acc) => Ok(acc),
        Outcome::Terminated(_) => bail!("program terminated without looping"),
    }
}

/// Swap one jmp/nop so the program terminates
fn repair(program: &[Instruction]) -> anyhow::Result<i64> {
    let mut patched = program.to_vec();
    for i in 0..program.len() {
        let swapped = match program[i] {
            Instruction::Nop(v) => Instruction::Jmp(v),
            Instruction::Jmp(v) => Instruction::Nop(v),
            Instruction::Acc(_) => continue,
        };
        patched[i] = swapped;
        if let Ok(Outcome::Terminated(acc)) = run(&patched) {
            debug!(index = i, acc, "program repaired");
            return Ok(acc);
        }
        patched[i] = program[i];
    }
    bail!("unable to find a successful program")
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<i64> {
    acc_before_loop(&parse_lines(lines)?)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<i64> {
    repair(&parse_lines(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        acc_before_loop(shared)
            .map(|acc| acc.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        repair(shared)
            .map(|acc| acc.to_string())
            .map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6";

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE.lines()).unwrap(), 5);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE.lines()).unwrap(), 8);
    }

    #[test]
    fn test_parse_instruction() {
        assert_eq!("jmp -3".parse::<Instruction>().unwrap(), Instruction::Jmp(-3));
        assert_eq!("acc +1".parse::<Instruction>().unwrap(), Instruction::Acc(1));
        assert!("mul +2".parse::<Instruction>().is_err());
    }

    #[test]
    fn test_unrepairable() {
        let err = second(["acc +1", "jmp +0", "acc +1", "jmp -2"]).unwrap_err();
        assert_eq!(err.to_string(), "unable to find a successful program");
    }
}
