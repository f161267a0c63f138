//! Registry behaviour: registration bounds, duplicates, lookup and creation

use aoc_solver::{
    AocParser, DynSolver, ParseError, RegistrationError, SolveError, Solver, SolverError,
    SolverRegistryBuilder, register_solver,
};
use proptest::prelude::*;

/// Counts the passports (blank-line separated groups) in the input
struct Passports;

impl AocParser for Passports {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        if !input.contains(':') {
            return Err(ParseError::MissingData("no passport fields".into()));
        }
        Ok(input.split("\n\n").collect())
    }
}

impl Solver for Passports {
    const PARTS: u8 = 2;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        match part {
            1 => Ok(shared.len().to_string()),
            2 => Ok(shared
                .iter()
                .map(|p| p.split_whitespace().count())
                .sum::<usize>()
                .to_string()),
            _ => Err(SolveError::PartNotImplemented(part)),
        }
    }
}

fn factory(input: &str) -> Result<Box<dyn DynSolver + '_>, ParseError> {
    Ok(Box::new(aoc_solver::SolverInstance::<Passports>::new(2020, 4, input)?))
}

#[test]
fn test_create_and_solve() {
    let registry = register_solver!(SolverRegistryBuilder::new(), Passports, 2020, 4)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2020, 4, "a:1 b:2\n\nc:3").unwrap();
    assert_eq!(solver.year(), 2020);
    assert_eq!(solver.day(), 4);
    assert_eq!(solver.parts(), 2);
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());

    let first = solver.solve(1).unwrap();
    assert_eq!(first.answer, "2");
    assert_eq!(first.part, 1);
    assert!(first.duration >= chrono::TimeDelta::zero());
    assert_eq!(solver.solve(2).unwrap().answer, "3");
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn test_storage_info() {
    let registry = SolverRegistryBuilder::new()
        .register_factory(2020, 4, 2, factory)
        .unwrap()
        .register_factory(2016, 25, 1, factory)
        .unwrap()
        .build();

    let storage = registry.storage();
    assert_eq!(storage.len(), 2);
    assert!(!storage.is_empty());
    assert!(storage.contains(2020, 4));
    assert!(!storage.contains(2020, 5));
    assert_eq!(storage.get_info(2016, 25).map(|i| i.parts), Some(1));

    let order: Vec<_> = storage.iter_info().map(|i| (i.year, i.day)).collect();
    assert_eq!(order, vec![(2016, 25), (2020, 4)]);
}

#[test]
fn test_duplicate_registration_rejected() {
    let result = SolverRegistryBuilder::new()
        .register_factory(2020, 4, 2, factory)
        .unwrap()
        .register_factory(2020, 4, 2, factory);

    assert!(matches!(result, Err(RegistrationError::DuplicateSolver(2020, 4))));
}

#[test]
fn test_missing_solver_and_parse_failure() {
    let registry = register_solver!(SolverRegistryBuilder::new(), Passports, 2020, 4)
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2020, 5, ""),
        Err(SolverError::NotFound(2020, 5))
    ));
    assert!(matches!(
        registry.create_solver(2020, 4, "  \n"),
        Err(SolverError::ParseError(ParseError::EmptyInput))
    ));
    assert!(matches!(
        registry.create_solver(2020, 4, "no fields here"),
        Err(SolverError::ParseError(ParseError::MissingData(_)))
    ));
    assert!(matches!(
        registry.create_solver(1999, 4, ""),
        Err(SolverError::InvalidYearDay(1999, 4))
    ));
}

#[test]
fn test_empty_registry() {
    let registry = SolverRegistryBuilder::default().build();
    assert!(registry.storage().is_empty());
    assert_eq!(registry.storage().iter_info().count(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every in-range (year, day) can be registered and found again.
    #[test]
    fn prop_in_range_registration(year in 2015u16..2035, day in 1u8..=25) {
        let registry = SolverRegistryBuilder::new()
            .register_factory(year, day, 2, factory)
            .unwrap()
            .build();

        prop_assert!(registry.storage().contains(year, day));
        let info = registry.storage().iter_info().next().unwrap();
        prop_assert_eq!((info.year, info.day, info.parts), (year, day, 2));
    }

    /// Days outside 1..=25 are rejected at registration.
    #[test]
    fn prop_out_of_range_day_rejected(year in 2015u16..2035, day in prop_oneof![Just(0u8), 26u8..=255]) {
        let result = SolverRegistryBuilder::new().register_factory(year, day, 2, factory);
        prop_assert!(matches!(result, Err(RegistrationError::InvalidYearDay(y, d)) if y == year && d == day));
    }
}
