//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::{ClosureProblem, DpProblem};

/// A memoizing cache that resolves dependencies lazily.
///
/// Each index is computed at most once; its dependencies are resolved
/// recursively on first access.
///
/// # Warning: No Cycle Detection
///
/// A cyclic dependency graph recurses until the stack overflows. Callers
/// must make sure dependencies form a DAG.
///
/// # Example (closure-based)
///
/// ```rust
/// use aoc_2020::utils::dp_cache::{DpCache, HashMapBackend};
///
/// // bags inside a bag: "outer" holds 2 "inner", "inner" holds nothing
/// let cache = DpCache::new(
///     HashMapBackend::new(),
///     |bag: &&str| if *bag == "outer" { vec!["inner"] } else { vec![] },
///     |bag: &&str, inside: Vec<u64>| if *bag == "outer" { 2 * (1 + inside[0]) } else { 0 },
/// );
///
/// assert_eq!(cache.get(&"outer"), 2);
/// ```
pub struct DpCache<I, K, B, P>
where
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    /// Creates a cache over `backend` for the given problem definition.
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Returns the value for `index`, computing it and its dependencies if
    /// they are not cached yet.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow is held while dependencies recurse into the cache.
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .into_iter()
            .map(|dep| self.get(&dep))
            .collect();

        self.backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
            .clone()
    }
}

impl<I, K, B, D, C> DpCache<I, K, B, ClosureProblem<I, K, D, C>>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    /// Creates a cache from a dependency closure and a compute closure.
    pub fn new(backend: B, dep_fn: D, compute_fn: C) -> Self {
        Self::with_problem(backend, ClosureProblem::new(dep_fn, compute_fn))
    }
}
