//! Greedy stochastic search. Nodes are ordered by their heuristic value
//! alone, and instead of always expanding the best open node the search draws
//! one out of the `N` best, favouring lower heuristic values more strongly as
//! the temperature cools.

use crate::search::{
    search_engines::SearchStrategy, search_node::Candidate, Frontier, Heuristic, HeuristicValue,
    NodeId, SearchState, SearchStatistics,
};
use ordered_float::Float;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Parameters of [`GreedyStochastic`].
///
/// # Examples
///
/// ```
/// use deliveries_planner::search::GreedyStochasticConfig;
///
/// let config = GreedyStochasticConfig::default()
///     .with_pool_size(3)
///     .with_seed(7);
/// assert_eq!(config.initial_temperature, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreedyStochasticConfig {
    /// Temperature used for the first extraction.
    pub initial_temperature: f64,
    /// Number of best open nodes the next node is drawn from.
    pub pool_size: usize,
    /// The temperature is multiplied by this after every extraction.
    pub temperature_scale_factor: f64,
    /// Seed of the random source. A fixed seed makes runs reproducible.
    pub seed: Option<u64>,
}

impl Default for GreedyStochasticConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            pool_size: 5,
            temperature_scale_factor: 0.95,
            seed: None,
        }
    }
}

impl GreedyStochasticConfig {
    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_temperature_scale_factor(mut self, factor: f64) -> Self {
        self.temperature_scale_factor = factor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0. && self.initial_temperature.is_finite()) {
            return Err(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            ));
        }
        if self.pool_size == 0 {
            return Err("pool_size must be at least 1".into());
        }
        if !(self.temperature_scale_factor > 0. && self.temperature_scale_factor <= 1.) {
            return Err(format!(
                "temperature_scale_factor must be in (0, 1], got {}",
                self.temperature_scale_factor
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct GreedyStochastic<H> {
    heuristic: H,
    config: GreedyStochasticConfig,
    temperature: f64,
    seed: u64,
    rng: StdRng,
}

impl<H> GreedyStochastic<H> {
    pub fn new(heuristic: H) -> Self {
        Self::with_config(heuristic, GreedyStochasticConfig::default())
    }

    /// # Panics
    ///
    /// Panics if `config` does not pass [`GreedyStochasticConfig::validate`].
    pub fn with_config(heuristic: H, config: GreedyStochasticConfig) -> Self {
        config.validate().expect("invalid GreedyStochasticConfig");
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            heuristic,
            temperature: config.initial_temperature,
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn config(&self) -> &GreedyStochasticConfig {
        &self.config
    }

    /// The probability of drawing each pool member, given the heuristic
    /// values of the pool and the current temperature. Each member gets a
    /// weight of `(h / h_min) ^ (-1 / T)`, normalised over the pool.
    ///
    /// A pool whose best value is zero puts all mass on its first zero
    /// member; a pool of infinite values is drawn from uniformly.
    pub fn selection_probabilities(values: &[HeuristicValue], temperature: f64) -> Vec<f64> {
        let Some(&best) = values.iter().min() else {
            return vec![];
        };

        if best == HeuristicValue::from(0.) {
            let first_zero = values.iter().position(|&h| h == best);
            return (0..values.len())
                .map(|i| if Some(i) == first_zero { 1. } else { 0. })
                .collect();
        }

        if best.is_infinite() {
            let uniform = 1. / values.len() as f64;
            return vec![uniform; values.len()];
        }

        let exponent = -1. / temperature;
        let weights: Vec<f64> = values
            .iter()
            .map(|h| (h.into_inner() / best.into_inner()).powf(exponent))
            .collect();
        let total: f64 = weights.iter().sum();
        weights.into_iter().map(|w| w / total).collect()
    }

    /// Roulette wheel draw over `probabilities`.
    fn draw(&mut self, probabilities: &[f64]) -> usize {
        let threshold: f64 = self.rng.random_range(0.0..1.0);
        let mut cumulative = 0.;
        for (i, &p) in probabilities.iter().enumerate() {
            cumulative += p;
            if cumulative > threshold {
                return i;
            }
        }

        // floating-point fallback
        probabilities
            .iter()
            .rposition(|&p| p > 0.)
            .unwrap_or(probabilities.len() - 1)
    }
}

impl<S, H> SearchStrategy<S> for GreedyStochastic<H>
where
    S: SearchState,
    H: Heuristic<S>,
{
    fn name(&self) -> String {
        format!("GreedyStochastic (h={})", self.heuristic.name())
    }

    fn init(&mut self) {
        self.temperature = self.config.initial_temperature;
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    fn evaluate(&mut self, state: &S) -> HeuristicValue {
        self.heuristic.evaluate(state)
    }

    fn priority(&self, _g: HeuristicValue, h: HeuristicValue) -> HeuristicValue {
        h
    }

    /// First discovery wins: a state already open or closed is never
    /// replaced.
    fn open_successor(
        &mut self,
        frontier: &mut Frontier<S>,
        candidate: Candidate<S>,
        statistics: &mut SearchStatistics,
    ) {
        if frontier.is_open(&candidate.state) || frontier.is_closed(&candidate.state) {
            statistics.increment_discarded_duplicates();
            return;
        }

        let h = self.heuristic.evaluate(&candidate.state);
        frontier.open_candidate(candidate, h, h);
        statistics.increment_opened_nodes();
    }

    fn extract_next(&mut self, frontier: &mut Frontier<S>) -> Option<NodeId> {
        let pool_size = self.config.pool_size.min(frontier.open_len());
        let pool: Vec<NodeId> = (0..pool_size).filter_map(|_| frontier.pop()).collect();
        if pool.is_empty() {
            return None;
        }
        let values: Vec<HeuristicValue> = pool
            .iter()
            .map(|&node_id| frontier.get_node(node_id).get_h())
            .collect();

        // The pool comes out of the open list best first.
        let chosen = if values[0] == HeuristicValue::from(0.) {
            0
        } else {
            let probabilities = Self::selection_probabilities(&values, self.temperature);
            self.draw(&probabilities)
        };
        trace!(
            pool_size = pool.len(),
            chosen,
            temperature = self.temperature,
            "drew node from pool"
        );

        for (i, (&node_id, &h)) in pool.iter().zip(values.iter()).enumerate() {
            if i != chosen {
                frontier.reopen(node_id, h);
            }
        }

        self.temperature *= self.config.temperature_scale_factor;
        Some(pool[chosen])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{BestFirstSearch, SearchStep, ZeroHeuristic};
    use crate::test_utils::{GraphProblem, IndexDistanceHeuristic, TableHeuristic};
    use assert_approx_eq::assert_approx_eq;

    fn values(raw: &[f64]) -> Vec<HeuristicValue> {
        raw.iter().map(|&h| h.into()).collect()
    }

    #[test]
    fn probabilities_favour_low_values() {
        let p = GreedyStochastic::<TableHeuristic>::selection_probabilities(
            &values(&[400., 450., 900., 390., 550.]),
            1.,
        );
        assert_approx_eq!(p.iter().sum::<f64>(), 1.);
        // weights are (h / 390)^-1, so p is inversely proportional to h
        assert_approx_eq!(p[3] / p[0], 400. / 390.);
        assert!(p[3] > p[0] && p[0] > p[1] && p[1] > p[4] && p[4] > p[2]);
    }

    #[test]
    fn probabilities_sharpen_as_temperature_cools() {
        let pool = values(&[1., 2.]);
        let hot = GreedyStochastic::<TableHeuristic>::selection_probabilities(&pool, 5.);
        let cold = GreedyStochastic::<TableHeuristic>::selection_probabilities(&pool, 0.05);
        assert!(cold[0] > hot[0]);
        assert!(cold[0] > 0.999);
    }

    #[test]
    fn probabilities_with_zero_or_infinite_best() {
        let zero = GreedyStochastic::<TableHeuristic>::selection_probabilities(
            &values(&[3., 0., 0.]),
            1.,
        );
        assert_eq!(zero, vec![0., 1., 0.]);

        let inf = GreedyStochastic::<TableHeuristic>::selection_probabilities(
            &values(&[f64::INFINITY, f64::INFINITY]),
            1.,
        );
        assert_eq!(inf, vec![0.5, 0.5]);

        let mixed = GreedyStochastic::<TableHeuristic>::selection_probabilities(
            &values(&[2., f64::INFINITY]),
            1.,
        );
        assert_eq!(mixed, vec![1., 0.]);
    }

    #[test]
    fn temperature_cools_once_per_extraction() {
        let config = GreedyStochasticConfig::default()
            .with_initial_temperature(2.)
            .with_temperature_scale_factor(0.5)
            .with_seed(1);
        let mut greedy = GreedyStochastic::with_config(IndexDistanceHeuristic::new(6), config);
        let mut problem = GraphProblem::line(6);
        let mut search = BestFirstSearch::new(&mut problem, &mut greedy);
        // root has h = 6, so its extraction goes through the weighted draw
        search.step().unwrap();
        search.step().unwrap();
        drop(search);
        assert_approx_eq!(greedy.temperature(), 0.5);
    }

    #[test]
    fn zero_heuristic_pool_member_is_chosen_deterministically() {
        // every node but the goal has a large heuristic value
        let heuristic = TableHeuristic::new(&[(0, 10.), (1, 10.), (2, 10.), (3, 0.)], 10.);
        let config = GreedyStochasticConfig::default()
            .with_initial_temperature(1000.)
            .with_seed(3);
        let mut greedy = GreedyStochastic::with_config(heuristic, config);
        let (result, statistics) = greedy.solve(&mut GraphProblem::star(3)).unwrap();
        assert_eq!(result.path().unwrap().final_state(), Some(&3));
        assert_eq!(statistics.expanded_nodes(), 1);
    }

    #[test]
    fn same_seed_gives_same_expansion_sequence() {
        fn expansion_sequence(seed: u64) -> Vec<u32> {
            let config = GreedyStochasticConfig::default()
                .with_initial_temperature(10.)
                .with_seed(seed);
            let mut greedy = GreedyStochastic::with_config(IndexDistanceHeuristic::new(24), config);
            let mut problem = GraphProblem::grid(5);
            let mut search = BestFirstSearch::new(&mut problem, &mut greedy);
            let mut sequence = vec![];
            loop {
                match search.step().unwrap() {
                    SearchStep::Expanded { state, .. } => sequence.push(state),
                    SearchStep::Discarded => {}
                    SearchStep::GoalFound(_) | SearchStep::Exhausted => break,
                }
            }
            sequence
        }

        assert_eq!(expansion_sequence(42), expansion_sequence(42));
        assert_eq!(expansion_sequence(7), expansion_sequence(7));
    }

    #[test]
    fn repeated_solves_with_fixed_seed_agree() {
        let config = GreedyStochasticConfig::default().with_seed(11);
        let mut greedy = GreedyStochastic::with_config(IndexDistanceHeuristic::new(24), config);
        let (first, first_statistics) = greedy.solve(&mut GraphProblem::grid(5)).unwrap();
        let (second, second_statistics) = greedy.solve(&mut GraphProblem::grid(5)).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first_statistics.expanded_nodes(),
            second_statistics.expanded_nodes()
        );
    }

    #[test]
    fn already_open_successor_is_not_replaced() {
        let config = GreedyStochasticConfig::default()
            .with_pool_size(1)
            .with_seed(0);
        let mut greedy = GreedyStochastic::with_config(TableHeuristic::new(&[], 1.), config);
        let (result, statistics) = greedy.solve(&mut GraphProblem::diamond()).unwrap();
        // with pool size one the search is plain greedy best-first, and node
        // 4 keeps the expensive parent it was first found through
        assert_eq!(result.cost(), Some(10.));
        assert_eq!(statistics.reopened_nodes(), 0);
    }

    #[test]
    fn validate_ok() {
        assert!(GreedyStochasticConfig::default().validate().is_ok());
        let config = GreedyStochasticConfig::default()
            .with_pool_size(1)
            .with_temperature_scale_factor(1.);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let default = GreedyStochasticConfig::default();
        assert!(default.clone().with_pool_size(0).validate().is_err());
        for temperature in [0., -1., f64::NAN, f64::INFINITY] {
            let config = default.clone().with_initial_temperature(temperature);
            assert!(config.validate().is_err());
        }
        for factor in [0., -0.5, 1.5, f64::NAN] {
            let config = default.clone().with_temperature_scale_factor(factor);
            assert!(config.validate().is_err());
        }
    }

    #[test]
    #[should_panic(expected = "invalid GreedyStochasticConfig")]
    fn empty_pool_is_rejected() {
        let config = GreedyStochasticConfig::default().with_pool_size(0);
        GreedyStochastic::with_config(ZeroHeuristic::new(), config);
    }
}
