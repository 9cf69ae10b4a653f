//! Cost-to-go estimates for deliveries problems, from cheapest and loosest
//! to most expensive and tightest.

use crate::deliveries::{
    junction::unordered_pair, DeliveriesState, Junction, RelaxedDeliveriesProblem, StopPoints,
};
use crate::search::{AStar, Heuristic, HeuristicValue, SearchResult, SearchStrategy};
use ordered_float::Float;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

/// Available deliveries heuristics, e.g. for selecting one from a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveriesHeuristicName {
    #[serde(alias = "max-air-dist")]
    MaxAirDist,
    #[serde(alias = "mst-air-dist")]
    MstAirDist,
    #[serde(alias = "relaxed-prob")]
    RelaxedProb,
}

impl DeliveriesHeuristicName {
    pub fn create(&self, stop_points: &Rc<StopPoints>) -> Box<dyn Heuristic<DeliveriesState>> {
        match self {
            DeliveriesHeuristicName::MaxAirDist => {
                Box::new(MaxAirDistHeuristic::new(stop_points.clone()))
            }
            DeliveriesHeuristicName::MstAirDist => {
                Box::new(MstAirDistHeuristic::new(stop_points.clone()))
            }
            DeliveriesHeuristicName::RelaxedProb => {
                Box::new(RelaxedDeliveriesHeuristic::new(stop_points.clone()))
            }
        }
    }
}

/// Air distance to the farthest drop point not served yet.
#[derive(Debug)]
pub struct MaxAirDistHeuristic {
    stop_points: Rc<StopPoints>,
}

impl MaxAirDistHeuristic {
    pub fn new(stop_points: Rc<StopPoints>) -> Self {
        Self { stop_points }
    }
}

impl Heuristic<DeliveriesState> for MaxAirDistHeuristic {
    fn name(&self) -> &'static str {
        "MaxAirDist"
    }

    fn evaluate(&mut self, state: &DeliveriesState) -> HeuristicValue {
        let location = state.current_location();
        self.stop_points
            .remaining_drop_points(state)
            .map(|junction| location.air_distance_to(junction))
            .map(HeuristicValue::from)
            .max()
            .unwrap_or((0.).into())
    }
}

/// Weight of the minimum spanning tree over the current location and the
/// drop points not served yet, with air distances as edge weights.
#[derive(Debug)]
pub struct MstAirDistHeuristic {
    stop_points: Rc<StopPoints>,
    distance_cache: HashMap<(usize, usize), f64>,
}

impl MstAirDistHeuristic {
    pub fn new(stop_points: Rc<StopPoints>) -> Self {
        Self {
            stop_points,
            distance_cache: HashMap::new(),
        }
    }

    fn air_distance(&mut self, a: &Junction, b: &Junction) -> f64 {
        *self
            .distance_cache
            .entry(unordered_pair(a.index, b.index))
            .or_insert_with(|| a.air_distance_to(b))
    }

    /// Prim's algorithm on the complete graph over `junctions`.
    fn spanning_tree_weight(&mut self, junctions: &[Junction]) -> f64 {
        if junctions.len() < 2 {
            return 0.;
        }

        let mut in_tree = vec![false; junctions.len()];
        let mut best_edge = vec![f64::INFINITY; junctions.len()];
        best_edge[0] = 0.;
        let mut total = 0.;

        for _ in 0..junctions.len() {
            let next = (0..junctions.len())
                .filter(|&i| !in_tree[i])
                .min_by(|&i, &j| best_edge[i].total_cmp(&best_edge[j]))
                .expect("A junction is left outside the tree");
            in_tree[next] = true;
            total += best_edge[next];

            for other in 0..junctions.len() {
                if in_tree[other] {
                    continue;
                }
                let distance = self.air_distance(&junctions[next], &junctions[other]);
                if distance < best_edge[other] {
                    best_edge[other] = distance;
                }
            }
        }
        total
    }
}

impl Heuristic<DeliveriesState> for MstAirDistHeuristic {
    fn name(&self) -> &'static str {
        "MstAirDist"
    }

    fn evaluate(&mut self, state: &DeliveriesState) -> HeuristicValue {
        let junctions: Vec<Junction> = std::iter::once(*state.current_location())
            .chain(self.stop_points.remaining_drop_points(state).copied())
            .collect();
        self.spanning_tree_weight(&junctions).into()
    }
}

/// Optimal cost of the relaxed problem posed from the evaluated state,
/// found with a nested A* search guided by [`MstAirDistHeuristic`]. Each
/// evaluation runs its own search, nothing is shared between them.
#[derive(Debug)]
pub struct RelaxedDeliveriesHeuristic {
    stop_points: Rc<StopPoints>,
}

impl RelaxedDeliveriesHeuristic {
    pub fn new(stop_points: Rc<StopPoints>) -> Self {
        Self { stop_points }
    }
}

impl Heuristic<DeliveriesState> for RelaxedDeliveriesHeuristic {
    fn name(&self) -> &'static str {
        "RelaxedProb"
    }

    fn evaluate(&mut self, state: &DeliveriesState) -> HeuristicValue {
        let mut remaining = self.stop_points.remaining_drop_points(state);
        if remaining.next().is_none() {
            return (0.).into();
        }

        let mut problem = RelaxedDeliveriesProblem::from_state(&self.stop_points, state);
        let heuristic = MstAirDistHeuristic::new(problem.stop_points().clone());
        let (result, statistics) = AStar::new(heuristic)
            .solve(&mut problem)
            .expect("Air distances are never negative");
        trace!(
            state = %state,
            expanded_nodes = statistics.expanded_nodes(),
            solved = result.is_solved(),
            "solved relaxed problem"
        );
        match result {
            SearchResult::Success(path) => path.cost().into(),
            SearchResult::NoSolution => HeuristicValue::infinity(),
        }
    }
}
