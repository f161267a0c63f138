//! Day 4: Passport Processing

use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::input::{blank_line_groups, into_parse_error};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 4, tags = ["2020", "parsing", "validation"])]
pub struct Solver;

const REQUIRED_FIELDS: [&str; 7] = ["byr", "iyr", "eyr", "hgt", "hcl", "ecl", "pid"];
const EYE_COLORS: [&str; 7] = ["amb", "blu", "brn", "gry", "grn", "hzl", "oth"];

pub type Passport<'a> = HashMap<&'a str, &'a str>;

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<Passport<'a>>> {
    blank_line_groups(lines)
        .into_iter()
        .map(|group| {
            group
                .into_iter()
                .flat_map(str::split_whitespace)
                .map(|field| {
                    field
                        .split_once(':')
                        .ok_or_else(|| anyhow!("field '{field}' is not key:value"))
                })
                .collect::<anyhow::Result<Passport>>()
        })
        .collect()
}

fn has_required_fields(passport: &Passport) -> bool {
    REQUIRED_FIELDS.iter().all(|f| passport.contains_key(f))
}

fn year_in(value: &str, min: u32, max: u32) -> bool {
    value.len() == 4 && value.parse().is_ok_and(|y: u32| (min..=max).contains(&y))
}

fn valid_height(value: &str) -> bool {
    let in_range = |number: &str, min: u32, max: u32| {
        number.parse().is_ok_and(|h: u32| (min..=max).contains(&h))
    };
    if let Some(cm) = value.strip_suffix("cm") {
        in_range(cm, 150, 193)
    } else if let Some(inches) = value.strip_suffix("in") {
        in_range(inches, 59, 76)
    } else {
        false
    }
}

fn valid_hair_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        hex.len() == 6 && hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    })
}

fn valid_field(key: &str, value: &str) -> bool {
    match key {
        "byr" => year_in(value, 1920, 2002),
        "iyr" => year_in(value, 2010, 2020),
        "eyr" => year_in(value, 2020, 2030),
        "hgt" => valid_height(value),
        "hcl" => valid_hair_color(value),
        "ecl" => EYE_COLORS.contains(&value),
        "pid" => value.len() == 9 && value.chars().all(|c| c.is_ascii_digit()),
        _ => true,
    }
}

fn is_valid(passport: &Passport) -> bool {
    has_required_fields(passport) && passport.iter().all(|(k, v)| valid_field(k, v))
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(parse(lines)?.iter().filter(|p| has_required_fields(p)).count())
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(parse(lines)?.iter().filter(|p| is_valid(p)).count())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Passport<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|p| has_required_fields(p))
            .count()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|p| is_valid(p)).count().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
ecl:gry pid:860033327 eyr:2020 hcl:#fffffd
byr:1937 iyr:2017 cid:147 hgt:183cm

iyr:2013 ecl:amb cid:350 eyr:2023 pid:028048884
hcl:#cfa07d byr:1929

hcl:#ae17e1 iyr:2013
eyr:2024
ecl:brn pid:760753108 byr:1931
hgt:179cm

hcl:#cfa07d eyr:2025 pid:166559648
iyr:2011 ecl:brn hgt:59in
";

    const INVALID: &str = "\
eyr:1972 cid:100
hcl:#18171d ecl:amb hgt:170 pid:186cm iyr:2018 byr:1926

iyr:2019
hcl:#602927 eyr:1967 hgt:170cm
ecl:grn pid:012533040 byr:1946

hcl:dab227 iyr:2012
ecl:brn hgt:182cm pid:021572410 eyr:2020 byr:1992 cid:277

hgt:59cm ecl:zzz
eyr:2038 hcl:74454a iyr:2023
pid:3556412378 byr:2007
";

    const VALID: &str = "\
pid:087499704 hgt:74in ecl:grn iyr:2012 eyr:2030 byr:1980
hcl:#623a2f

eyr:2029 ecl:blu cid:129 byr:1989
iyr:2014 pid:896056539 hcl:#a97842 hgt:165cm

hcl:#888785
hgt:164cm byr:2001 iyr:2015 cid:88
pid:545766238 ecl:hzl
eyr:2022

iyr:2010 hgt:158cm hcl:#b6652a ecl:blu byr:1944 eyr:2021 pid:093154719
";

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE.lines()).unwrap(), 2);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE.lines()).unwrap(), 2);
        assert_eq!(second(INVALID.lines()).unwrap(), 0);
        assert_eq!(second(VALID.lines()).unwrap(), 4);
    }

    #[test]
    fn test_field_rules() {
        assert!(valid_field("byr", "2002"));
        assert!(!valid_field("byr", "2003"));
        assert!(valid_field("hgt", "60in"));
        assert!(valid_field("hgt", "190cm"));
        assert!(!valid_field("hgt", "190in"));
        assert!(!valid_field("hgt", "190"));
        assert!(valid_field("hcl", "#123abc"));
        assert!(!valid_field("hcl", "#123abz"));
        assert!(!valid_field("hcl", "123abc"));
        assert!(valid_field("ecl", "brn"));
        assert!(!valid_field("ecl", "wat"));
        assert!(valid_field("pid", "000000001"));
        assert!(!valid_field("pid", "0123456789"));
        assert!(valid_field("xyz", "anything"));
    }
}
