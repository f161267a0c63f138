//! Day 21: Allergen Assessment

use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::input::{into_parse_error, into_solve_error, non_empty_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 21, tags = ["2020", "constraints"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food<'a> {
    pub ingredients: Vec<&'a str>,
    pub allergens: Vec<&'a str>,
}

impl<'a> Food<'a> {
    fn parse(line: &'a str) -> anyhow::Result<Self> {
        let (ingredients, allergens) = match line.split_once(" (contains ") {
            Some((ingredients, rest)) => {
                let allergens = rest
                    .strip_suffix(')')
                    .with_context(|| format!("unclosed allergen list in '{line}'"))?;
                (ingredients, allergens.split(", ").collect())
            }
            None => (line, Vec::new()),
        };
        Ok(Self {
            ingredients: ingredients.split_whitespace().collect(),
            allergens,
        })
    }
}

fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Vec<Food<'a>>> {
    non_empty_lines(lines).map(Food::parse).collect()
}

/// Ingredients that may contain each allergen: the intersection of the
/// ingredient lists of every food that declares it
fn candidates<'a>(foods: &[Food<'a>]) -> BTreeMap<&'a str, HashSet<&'a str>> {
    let mut candidates: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
    for food in foods {
        let ingredients: HashSet<&str> = food.ingredients.iter().copied().collect();
        for &allergen in &food.allergens {
            candidates
                .entry(allergen)
                .and_modify(|c| c.retain(|i| ingredients.contains(i)))
                .or_insert_with(|| ingredients.clone());
        }
    }
    candidates
}

fn safe_occurrences(foods: &[Food]) -> usize {
    let unsafe_ingredients: HashSet<&str> = candidates(foods).into_values().flatten().collect();
    foods
        .iter()
        .flat_map(|f| &f.ingredients)
        .filter(|i| !unsafe_ingredients.contains(*i))
        .count()
}

/// Allergen to ingredient, by repeatedly fixing allergens with a single
/// candidate
pub fn resolve_allergens<'a>(foods: &[Food<'a>]) -> anyhow::Result<BTreeMap<&'a str, &'a str>> {
    let mut candidates = candidates(foods);
    let mut resolved = BTreeMap::new();
    while !candidates.is_empty() {
        let (allergen, ingredient) = candidates
            .iter()
            .find(|(_, c)| c.len() == 1)
            .and_then(|(&a, c)| c.iter().next().map(|&i| (a, i)))
            .ok_or_else(|| anyhow!("unable to pin {} allergens to one ingredient", candidates.len()))?;
        candidates.remove(allergen);
        for c in candidates.values_mut() {
            c.remove(ingredient);
        }
        resolved.insert(allergen, ingredient);
    }
    Ok(resolved)
}

fn canonical_dangerous_list(foods: &[Food]) -> anyhow::Result<String> {
    Ok(resolve_allergens(foods)?.into_values().join(","))
}

pub fn first<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<usize> {
    Ok(safe_occurrences(&parse(lines)?))
}

pub fn second<'a>(lines: impl IntoIterator<Item = &'a str>) -> anyhow::Result<String> {
    canonical_dangerous_list(&parse(lines)?)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Food<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse(input.lines()).map_err(into_parse_error)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(safe_occurrences(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        canonical_dangerous_list(shared).map_err(into_solve_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: [&str; 4] = [
        "mxmxvkd kfcds sqjhc nhms (contains dairy, fish)",
        "trh fvjkl sbzzf mxmxvkd (contains dairy)",
        "sqjhc fvjkl (contains soy)",
        "sqjhc mxmxvkd sbzzf (contains fish)",
    ];

    #[test]
    fn test_first() {
        assert_eq!(first(EXAMPLE).unwrap(), 5);
    }

    #[test]
    fn test_second() {
        assert_eq!(second(EXAMPLE).unwrap(), "mxmxvkd,sqjhc,fvjkl");
    }

    #[test]
    fn test_resolve_allergens() {
        let foods = parse(EXAMPLE).unwrap();
        let resolved = resolve_allergens(&foods).unwrap();
        assert_eq!(resolved["dairy"], "mxmxvkd");
        assert_eq!(resolved["fish"], "sqjhc");
        assert_eq!(resolved["soy"], "fvjkl");
    }

    #[test]
    fn test_ambiguous_allergens() {
        assert!(second(["a b (contains x)"]).is_err());
        assert_eq!(first(["a b (contains x)", "c"]).unwrap(), 1);
    }

    #[test]
    fn test_unclosed_list() {
        assert!(first(["a b (contains x"]).is_err());
    }
}
