//! Shortest road paths between two junctions, used as the cost oracle of the
//! strict deliveries problem.

use crate::deliveries::{Junction, Roads};
use crate::search::{
    AStar, Heuristic, HeuristicValue, SearchProblem, SearchResult, SearchStrategy, Successors,
    Transition,
};
use std::fmt::Debug;
use std::rc::Rc;
use tracing::trace;

/// Answers "how long is the shortest road path from `source` to `target`",
/// or `None` if there is none.
pub trait RoadCostOracle: Debug {
    fn path_cost(&mut self, source: usize, target: usize) -> Option<f64>;
}

/// Driving from one junction to another over the road network. States are
/// junction indices.
#[derive(Debug)]
pub struct MapProblem {
    roads: Rc<Roads>,
    source: usize,
    target: usize,
}

impl MapProblem {
    pub fn new(roads: Rc<Roads>, source: usize, target: usize) -> Self {
        Self {
            roads,
            source,
            target,
        }
    }
}

impl SearchProblem for MapProblem {
    type State = usize;

    fn name(&self) -> String {
        format!("Map(src: {} dst: {})", self.source, self.target)
    }

    fn initial_state(&self) -> &usize {
        &self.source
    }

    fn is_goal(&self, state: &usize) -> bool {
        *state == self.target
    }

    fn expand<'a>(&'a mut self, state: &'a usize) -> Successors<'a, usize> {
        Box::new(
            self.roads
                .links_from(*state)
                .map(|(target, distance)| Transition::new(target, distance)),
        )
    }
}

/// Air distance from a junction to a fixed target junction.
#[derive(Debug)]
pub struct AirDistanceHeuristic {
    roads: Rc<Roads>,
    target: Junction,
}

impl AirDistanceHeuristic {
    pub fn new(roads: Rc<Roads>, target: Junction) -> Self {
        Self { roads, target }
    }
}

impl Heuristic<usize> for AirDistanceHeuristic {
    fn name(&self) -> &'static str {
        "AirDist"
    }

    fn evaluate(&mut self, state: &usize) -> HeuristicValue {
        match self.roads.junction(*state) {
            Some(junction) => junction.air_distance_to(&self.target).into(),
            None => (0.).into(),
        }
    }
}

/// Solves a fresh [`MapProblem`] with A* and the air distance heuristic for
/// every query.
#[derive(Debug)]
pub struct AStarRoadOracle {
    roads: Rc<Roads>,
}

impl AStarRoadOracle {
    pub fn new(roads: Rc<Roads>) -> Self {
        Self { roads }
    }
}

impl RoadCostOracle for AStarRoadOracle {
    fn path_cost(&mut self, source: usize, target: usize) -> Option<f64> {
        let target_junction = *self.roads.junction(target)?;
        self.roads.junction(source)?;

        let mut problem = MapProblem::new(self.roads.clone(), source, target);
        let heuristic = AirDistanceHeuristic::new(self.roads.clone(), target_junction);
        let (result, statistics) = AStar::new(heuristic)
            .solve(&mut problem)
            .expect("Road links are never negative");
        trace!(
            source,
            target,
            expanded_nodes = statistics.expanded_nodes(),
            "solved map problem"
        );
        match result {
            SearchResult::Success(path) => Some(path.cost()),
            SearchResult::NoSolution => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::square_roads;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn map_problem_finds_shortest_road_path() {
        let roads = Rc::new(square_roads());
        let mut problem = MapProblem::new(roads.clone(), 0, 2);
        let target = *roads.junction(2).unwrap();
        let (result, _) = AStar::new(AirDistanceHeuristic::new(roads, target))
            .solve(&mut problem)
            .unwrap();
        let path = result.path().unwrap();
        assert_approx_eq!(path.cost(), 2.);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn oracle_reports_costs_and_unreachability() {
        let roads = Rc::new(square_roads());
        let mut oracle = AStarRoadOracle::new(roads);
        assert_approx_eq!(oracle.path_cost(0, 3).unwrap(), 1.);
        assert_approx_eq!(oracle.path_cost(1, 3).unwrap(), 2.);
        assert_eq!(oracle.path_cost(0, 0), Some(0.));
        // no road leads to junction 4
        assert_eq!(oracle.path_cost(0, 4), None);
        assert_eq!(oracle.path_cost(0, 99), None);
    }
}
