//! How much driving between two stop points costs. This is the only thing,
//! besides the goal, that separates the relaxed problem from the strict one.

use crate::deliveries::{junction::unordered_pair, Junction, RoadCostOracle};
use std::collections::HashMap;
use std::fmt::Debug;
use tracing::debug;

pub trait TransitionCost: Debug {
    /// The cost of driving from `from` to `to`, or `None` when `to` cannot be
    /// reached from `from`.
    fn cost(&mut self, from: &Junction, to: &Junction) -> Option<f64>;

    /// Report whatever the cost function has been counting.
    fn log_statistics(&self) {}
}

/// Straight-line distance, as used by the relaxed problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct AirDistanceCost;

impl TransitionCost for AirDistanceCost {
    fn cost(&mut self, from: &Junction, to: &Junction) -> Option<f64> {
        Some(from.air_distance_to(to))
    }
}

/// A memoised oracle answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CachedCost {
    Reachable(f64),
    Unreachable,
}

impl From<Option<f64>> for CachedCost {
    fn from(cost: Option<f64>) -> Self {
        match cost {
            Some(cost) => CachedCost::Reachable(cost),
            None => CachedCost::Unreachable,
        }
    }
}

impl From<CachedCost> for Option<f64> {
    fn from(cost: CachedCost) -> Self {
        match cost {
            CachedCost::Reachable(cost) => Some(cost),
            CachedCost::Unreachable => None,
        }
    }
}

/// Shortest road distance, as used by the strict problem. Oracle answers are
/// cached per unordered pair of junctions for the lifetime of the cost
/// function, unreachable pairs included.
#[derive(Debug)]
pub struct RoadDistanceCost<O> {
    oracle: O,
    use_cache: bool,
    cache: HashMap<(usize, usize), CachedCost>,
    cache_hits: u64,
    cache_misses: u64,
}

impl<O: RoadCostOracle> RoadDistanceCost<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            use_cache: true,
            cache: HashMap::new(),
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    /// Turn caching on or off. Without the cache every query goes to the
    /// oracle and the hit and miss counters stay untouched.
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn uses_cache(&self) -> bool {
        self.use_cache
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

impl<O: RoadCostOracle> TransitionCost for RoadDistanceCost<O> {
    fn cost(&mut self, from: &Junction, to: &Junction) -> Option<f64> {
        if !self.use_cache {
            return self.oracle.path_cost(from.index, to.index);
        }

        let key = unordered_pair(from.index, to.index);
        if let Some(&cached) = self.cache.get(&key) {
            self.cache_hits += 1;
            return cached.into();
        }
        self.cache_misses += 1;
        let cost = self.oracle.path_cost(from.index, to.index);
        self.cache.insert(key, cost.into());
        cost
    }

    fn log_statistics(&self) {
        debug!(
            use_cache = self.use_cache,
            cache_hits = self.cache_hits,
            cache_misses = self.cache_misses,
            cached_pairs = self.cache.len(),
            "road distance cache"
        );
    }
}
