//! Advent of Code Solver Library
//!
//! A small, type-safe framework for Advent of Code puzzles. Each day is a
//! solver type that parses its input once and answers one or more parts from
//! the parsed data.
//!
//! # Overview
//!
//! This library provides:
//! - [`AocParser`] for turning raw input into shared data
//! - [`PartSolver`] for answering one part, keyed by a const generic
//! - [`Solver`] for dispatching part numbers (usually derived)
//! - A registry mapping (year, day) to solver factories
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder, register_solver};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depth;
//!
//! impl AocParser for Depth {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depth {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depth {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<i64>().to_string())
//!     }
//! }
//!
//! let registry = register_solver!(SolverRegistryBuilder::new(), Depth, 2020, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2020, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "6");
//! ```
//!
//! # Plugin System
//!
//! `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] through
//! `inventory`, so a binary can collect every linked solver at startup:
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2020, day = 1, tags = ["2020", "search"])]
//! pub struct Solver;
//!
//! let registry = SolverRegistryBuilder::new().register_all_plugins()?.build();
//! ```

mod error;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    BASE_YEAR, CAPACITY, DAYS_PER_YEAR, FactoryInfo, MAX_YEARS, RegisterableSolver,
    SolverFactory, SolverFactoryStorage, SolverPlugin, SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
