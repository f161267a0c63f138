//! Trait-based DP problem definition.

use std::marker::PhantomData;

/// A dynamic programming problem: which indices an index depends on, and how
/// to combine their values.
///
/// # Example
///
/// ```rust
/// use aoc_2020::utils::dp_cache::{DpCache, DpProblem, VecBackend};
///
/// /// Ways to climb `n` joltage steps of size 1..=3
/// struct Steps;
///
/// impl DpProblem<usize, u64> for Steps {
///     fn deps(&self, n: &usize) -> Vec<usize> {
///         (1..=3).filter_map(|s| n.checked_sub(s)).collect()
///     }
///
///     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
///         if *n == 0 { 1 } else { deps.iter().sum() }
///     }
/// }
///
/// let cache = DpCache::with_problem(VecBackend::new(), Steps);
/// assert_eq!(cache.get(&4), 7);
/// ```
pub trait DpProblem<I, K> {
    /// Returns the indices that this index depends on.
    ///
    /// For base cases, return an empty vector.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Computes the value for the given index from its resolved dependencies,
    /// given in the order `deps()` returned them.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// Adapts a pair of closures to [`DpProblem`].
pub struct ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    dep_fn: D,
    compute_fn: C,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, D, C> ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    pub fn new(dep_fn: D, compute_fn: C) -> Self {
        Self {
            dep_fn,
            compute_fn,
            _phantom: PhantomData,
        }
    }
}

impl<I, K, D, C> DpProblem<I, K> for ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    fn deps(&self, index: &I) -> Vec<I> {
        (self.dep_fn)(index)
    }

    fn compute(&self, index: &I, deps: Vec<K>) -> K {
        (self.compute_fn)(index, deps)
    }
}
