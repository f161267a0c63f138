//! Line-oriented input helpers and error bridges to the solver framework

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use aoc_solver::{ParseError, SolveError};

/// Trimmed lines with blank lines dropped
pub fn non_empty_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    lines.into_iter().map(str::trim).filter(|l| !l.is_empty())
}

/// Split a line stream into groups separated by one or more blank lines
///
/// Lines are trimmed; empty groups are never produced.
pub fn blank_line_groups<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Vec<&'a str>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for line in lines.into_iter().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Parse every non-empty line as `T`, naming the offending line on failure
pub fn parse_lines<'a, T>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| (idx, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| {
            line.parse::<T>()
                .map_err(|e| anyhow!("{e}"))
                .with_context(|| format!("unable to parse line {} '{line}'", idx + 1))
        })
        .collect()
}

/// Parse a single comma separated line of values
pub fn parse_csv<T>(line: &str) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    line.trim()
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| anyhow!("unable to parse value '{v}': {e}"))
        })
        .collect()
}

pub fn into_parse_error(err: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(format!("{err:#}"))
}

pub fn into_solve_error(err: anyhow::Error) -> SolveError {
    SolveError::SolveFailed(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_groups() {
        let lines = ["abc", "", "a", "b", "", "", "  ac ", ""];
        assert_eq!(
            blank_line_groups(lines),
            vec![vec!["abc"], vec!["a", "b"], vec!["ac"]]
        );
        assert!(blank_line_groups(["", " "]).is_empty());
    }

    #[test]
    fn test_parse_lines_reports_line() {
        let err = parse_lines::<u32>(["1", "", "x2"]).unwrap_err();
        assert!(format!("{err:#}").contains("line 3 'x2'"));
        assert_eq!(parse_lines::<u32>(["1", " 2 ", ""]).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_error_bridges() {
        let parse = into_parse_error(anyhow!("bad input"));
        assert!(matches!(parse, ParseError::InvalidFormat(ref m) if m == "bad input"));

        let solve = into_solve_error(anyhow!("boarding pass not found"));
        assert_eq!(solve.to_string(), "no answer: boarding pass not found");
    }

    proptest::proptest! {
        #[test]
        fn groups_keep_every_non_empty_line(lines in proptest::collection::vec("[a-c ]{0,4}", 0..20)) {
            let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
            let groups = blank_line_groups(lines.iter().copied());
            proptest::prop_assert!(groups.iter().all(|g| !g.is_empty()));
            let flattened: Vec<&str> = groups.into_iter().flatten().collect();
            let expected: Vec<&str> = non_empty_lines(lines.iter().copied()).collect();
            proptest::prop_assert_eq!(flattened, expected);
        }
    }
}
