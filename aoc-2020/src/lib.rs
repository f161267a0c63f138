//! Advent of Code 2020 puzzle solutions with automatic registration
//!
//! Each day lives in [`year_2020`] as a module exposing `first` / `second`
//! over the puzzle's input lines, plus a `Solver` type that registers itself
//! with the solver framework through `#[derive(AutoRegisterSolver)]`.
//!
//! ```
//! let report = ["1721", "979", "366", "299", "675", "1456"];
//! assert_eq!(aoc_2020::year_2020::day_1::first(report).unwrap(), 514579);
//! ```

pub mod utils;
pub mod year_2020;
