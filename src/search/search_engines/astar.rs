//! A* search: nodes are ordered by `g + h`, and an open node is replaced when
//! a cheaper path to its state turns up.

use crate::search::{
    search_engines::SearchStrategy, search_node::Candidate, Frontier, Heuristic, HeuristicValue,
    SearchState, SearchStatistics,
};

#[derive(Debug)]
pub struct AStar<H> {
    heuristic: H,
    use_closed: bool,
}

impl<H> AStar<H> {
    /// Graph search A*, keeping a closed list.
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            use_closed: true,
        }
    }

    /// Tree search A*, without a closed list.
    pub fn tree_search(heuristic: H) -> Self {
        Self {
            heuristic,
            use_closed: false,
        }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }
}

impl<S, H> SearchStrategy<S> for AStar<H>
where
    S: SearchState,
    H: Heuristic<S>,
{
    fn name(&self) -> String {
        format!("A* (h={})", self.heuristic.name())
    }

    fn uses_closed(&self) -> bool {
        self.use_closed
    }

    fn evaluate(&mut self, state: &S) -> HeuristicValue {
        self.heuristic.evaluate(state)
    }

    fn priority(&self, g: HeuristicValue, h: HeuristicValue) -> HeuristicValue {
        g + h
    }

    fn open_successor(
        &mut self,
        frontier: &mut Frontier<S>,
        candidate: Candidate<S>,
        statistics: &mut SearchStatistics,
    ) {
        if frontier.is_closed(&candidate.state) {
            statistics.increment_discarded_duplicates();
            return;
        }

        if let Some(open_node) = frontier.get_open_node(&candidate.state) {
            if open_node.get_g() <= candidate.g {
                statistics.increment_discarded_duplicates();
                return;
            }
            // Same state, so the heuristic value carries over.
            let h = open_node.get_h();
            let priority = candidate.g + h;
            frontier.open_candidate(candidate, h, priority);
            statistics.increment_reopened_nodes();
            return;
        }

        let h = self.heuristic.evaluate(&candidate.state);
        let priority = candidate.g + h;
        frontier.open_candidate(candidate, h, priority);
        statistics.increment_opened_nodes();
    }
}
