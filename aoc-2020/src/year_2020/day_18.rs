//! Day 18: Operation Order

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{into_parse_error, into_solve_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 18, tags = ["2020", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Mul,
}

impl Operator {
    fn apply(self, lhs: u64, rhs: u64) -> anyhow::Result<u64> {
        let value = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Mul => lhs.checked_mul(rhs),
        };
        value.ok_or_else(|| anyhow!("{lhs} {self:?} {rhs} overflows"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(u64),
    Operator(Operator),
    Open,
    Close,
}

pub fn tokenize(line: &str) -> anyhow::Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let token = match c {
            ' ' => continue,
            '+' => Token::Operator(Operator::Add),
            '*' => Token::Operator(Operator::Mul),
            '(' => Token::Open,
            ')' => Token::Close,
            '0'..='9' => {
                let mut end = i + 1;
                while let Some(&(j, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = j + 1;
                    chars.next();
                }
                Token::Literal(line[i..end].parse()?)
            }
            other => bail!("unexpected '{other}' at column {}", i + 1),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

/// Operator precedence table; higher binds tighter
pub type Precedence = fn(Operator) -> u8;

fn equal_precedence(_: Operator) -> u8 {
    0
}

fn addition_first(op: Operator) -> u8 {
    match op {
        Operator::Add => 1,
        Operator::Mul => 0,
    }
}

fn reduce(values: &mut Vec<u64>, op: Operator) -> anyhow::Result<()> {
    let (Some(rhs), Some(lhs)) = (values.pop(), values.pop()) else {
        bail!("operator '{op:?}' is missing an operand");
    };
    values.push(op.apply(lhs, rhs)?);
    Ok(())
}

/// Evaluate left to right with the given precedence, shunting-yard style
pub fn evaluate(tokens: &[Token], precedence: Precedence) -> anyhow::Result<u64> {
    let mut values: Vec<u64> = Vec::new();
    // None marks an open parenthesis
    let mut ops: Vec<Option<Operator>> = Vec::new();

    for &token in tokens {
        match token {
            Token::Literal(n) => values.push(n),
            Token::Open => ops.push(None),
            Token::Close => loop {
                match ops.pop() {
                    Some(Some(op)) => reduce(&mut values, op)?,
                    Some(None) => break,
                    None => bail!("unbalanced ')'"),
                }
            },
            Token::Operator(op) => {
                while let Some(&Some(top)) = ops.last() {
                    if precedence(top) < precedence(op) {
                        break;
                    }
                    ops.pop();
                    reduce(&mut values, top)?;
                }
                ops.push(Some(op));
            }
        }
    }
    while let Some(op) = ops.pop() {
        reduce(&mut values, op.ok_or_else(|| anyhow!("unbalanced '('"))?)?;
    }
    match values.as_slice() {
        [value] => Ok(*value),
        _ => bail!("expression does not reduce to a single value"),
    }
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<Vec<Token>>> {
    non_empty_lines(lines).map(tokenize).collect()
}

fn homework_sum(expressions: &[Vec<Token>], precedence: Precedence) -> anyhow::Result<u64> {
    expressions.iter().try_fold(0u64, |total, e| {
        total
            .checked_add(evaluate(e, precedence)?)
            .ok_or_else(|| anyhow!("homework sum overflows"))
    })
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    homework_sum(&parse(lines)?, equal_precedence)
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<u64> {
    homework_sum(&parse(lines)?, addition_first)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<Token>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        homework_sum(shared, equal_precedence)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        homework_sum(shared, addition_first)
            .map(|n| n.to_string())
            .map_err(into_solve_error)
    }
}
