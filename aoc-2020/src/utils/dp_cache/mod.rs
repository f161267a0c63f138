//! Dynamic Programming Cache with Lazy Evaluation
//!
//! Memoization for problems where a value depends on other values of the
//! same problem, as long as the dependencies form a DAG.
//!
//! - [`DpCache`]: single-threaded cache with `RefCell` interior mutability
//! - [`VecBackend`]: dense `usize` indices (auto-growing)
//! - [`HashMapBackend`]: any hashable index
//!
//! Problems are defined either with the [`DpProblem`] trait or with a pair of
//! closures through [`DpCache::new`].

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};
