//! Reorders results arriving from worker threads
//!
//! Workers finish in any order; output is streamed in (year, day, part)
//! order. A min-heap holds the keys still owed and a sorted map buffers
//! results that arrived ahead of their turn.

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// Key for ordering results, ascending by year, then day, then part
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Buffer a result and return every result now ready, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(Reverse(next)) = self.expected.peek()
            && let Some(result) = self.pending.remove(next)
        {
            self.expected.pop();
            ready.push(result);
        }
        ready
    }

    /// Take whatever is still buffered, in order
    ///
    /// Only non-empty when some expected result never arrived.
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Expected keys that have not been emitted yet, in order
    pub fn outstanding(&self) -> Vec<ResultKey> {
        let mut keys: Vec<ResultKey> = self.expected.iter().map(|Reverse(k)| *k).collect();
        keys.sort();
        keys
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(day: u8, part: u8) -> ResultKey {
        ResultKey {
            year: 2020,
            day,
            part,
        }
    }

    fn result(key: ResultKey) -> SolverResult {
        SolverResult {
            year: key.year,
            day: key.day,
            part: key.part,
            answer: Ok(format!("{}-{}", key.day, key.part)),
            parse_duration: None,
            solve_duration: TimeDelta::microseconds(25),
        }
    }

    fn keys_of(results: &[SolverResult]) -> Vec<ResultKey> {
        results.iter().map(ResultKey::from).collect()
    }

    #[test]
    fn test_in_order_results_stream_immediately() {
        let mut agg = ResultAggregator::new([key(1, 1), key(1, 2)]);
        assert_eq!(keys_of(&agg.add(result(key(1, 1)))), vec![key(1, 1)]);
        assert_eq!(keys_of(&agg.add(result(key(1, 2)))), vec![key(1, 2)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_early_results_wait_for_their_turn() {
        let mut agg = ResultAggregator::new([key(25, 1), key(1, 2), key(1, 1)]);

        assert!(agg.add(result(key(25, 1))).is_empty());
        assert!(agg.add(result(key(1, 2))).is_empty());
        assert_eq!(agg.outstanding(), vec![key(1, 1), key(1, 2), key(25, 1)]);

        let ready = agg.add(result(key(1, 1)));
        assert_eq!(keys_of(&ready), vec![key(1, 1), key(1, 2), key(25, 1)]);
        assert!(agg.is_complete());
        assert!(agg.drain().is_empty());
    }

    #[test]
    fn test_drain_after_missing_result() {
        let mut agg = ResultAggregator::new([key(3, 1), key(3, 2), key(4, 1)]);
        agg.add(result(key(4, 1)));
        agg.add(result(key(3, 2)));

        assert!(!agg.is_complete());
        assert_eq!(agg.outstanding(), vec![key(3, 1), key(3, 2), key(4, 1)]);
        assert_eq!(keys_of(&agg.drain()), vec![key(3, 2), key(4, 1)]);
    }

    proptest! {
        #[test]
        fn any_arrival_order_is_emitted_sorted(
            order in Just((1u8..=25).flat_map(|d| [key(d, 1), key(d, 2)]).collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let mut agg = ResultAggregator::new(order.clone());
            let emitted: Vec<ResultKey> = order
                .into_iter()
                .flat_map(|k| keys_of(&agg.add(result(k))))
                .collect();

            let mut sorted = emitted.clone();
            sorted.sort();
            prop_assert_eq!(emitted.len(), 50);
            prop_assert_eq!(emitted, sorted);
            prop_assert!(agg.is_complete());
        }
    }
}
