//! The generic best-first expansion loop. Concrete strategies only decide how
//! nodes are prioritised, which successors enter the open list and which open
//! node is expanded next.

use crate::search::{
    search_node::Candidate, Frontier, HeuristicValue, NodeId, SearchPath, SearchProblem,
    SearchState, SearchStatistics,
};
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("transition costs must be non-negative, got {cost}")]
    NegativeTransitionCost { cost: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult<S> {
    /// A goal state was reached, with the path leading to it
    Success(SearchPath<S>),
    /// The open list ran empty before a goal state was expanded
    NoSolution,
}

impl<S> SearchResult<S> {
    pub fn path(&self) -> Option<&SearchPath<S>> {
        match self {
            SearchResult::Success(path) => Some(path),
            SearchResult::NoSolution => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        self.path().map(SearchPath::cost)
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SearchResult::Success(_))
    }
}

/// The lifecycle of a [`BestFirstSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Ready,
    Running,
    GoalFound,
    Exhausted,
}

/// The outcome of a single [`BestFirstSearch::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStep<S> {
    /// The state was expanded and this many transitions were generated
    Expanded { state: S, successors: usize },
    /// The extracted node's state was already closed
    Discarded,
    GoalFound(NodeId),
    Exhausted,
}

/// A node selection and insertion policy plugged into [`BestFirstSearch`].
pub trait SearchStrategy<S: SearchState>: Debug {
    fn name(&self) -> String;

    /// Whether to keep a closed list (graph search) or not (tree search).
    fn uses_closed(&self) -> bool {
        true
    }

    /// Called once before a search starts.
    fn init(&mut self) {}

    /// Heuristic estimate of the cost from `state` to a goal.
    fn evaluate(&mut self, state: &S) -> HeuristicValue;

    /// The open list priority of a node with the given g- and h-values; lower
    /// is expanded first.
    fn priority(&self, g: HeuristicValue, h: HeuristicValue) -> HeuristicValue;

    /// Decide whether and how a freshly generated node enters the open list.
    fn open_successor(
        &mut self,
        frontier: &mut Frontier<S>,
        candidate: Candidate<S>,
        statistics: &mut SearchStatistics,
    );

    /// Pick the next node to expand. Called only while the open list is not
    /// empty.
    fn extract_next(&mut self, frontier: &mut Frontier<S>) -> Option<NodeId> {
        frontier.pop()
    }

    /// Run a complete search on `problem`.
    fn solve<P>(
        &mut self,
        problem: &mut P,
    ) -> Result<(SearchResult<S>, SearchStatistics), SearchError>
    where
        Self: Sized,
        P: SearchProblem<State = S>,
    {
        BestFirstSearch::new(problem, self).run()
    }
}

/// One run of best-first search of a problem with a strategy. Each search owns
/// its frontier, so searches may be nested (a heuristic may run a search of
/// its own) without sharing any state.
#[derive(Debug)]
pub struct BestFirstSearch<'a, P, St>
where
    P: SearchProblem,
    St: SearchStrategy<P::State>,
{
    problem: &'a mut P,
    strategy: &'a mut St,
    frontier: Frontier<P::State>,
    statistics: SearchStatistics,
    phase: SearchPhase,
    goal: Option<NodeId>,
}

impl<'a, P, St> BestFirstSearch<'a, P, St>
where
    P: SearchProblem,
    St: SearchStrategy<P::State>,
{
    /// Prepare a search. The root node is opened immediately.
    pub fn new(problem: &'a mut P, strategy: &'a mut St) -> Self {
        debug!(solver = %strategy.name(), problem = %problem.name());
        strategy.init();
        let mut frontier = Frontier::new(strategy.uses_closed());
        let initial_state = problem.initial_state().clone();
        let h = strategy.evaluate(&initial_state);
        let priority = strategy.priority((0.).into(), h);
        frontier.open_root(initial_state, h, priority);

        let mut statistics = SearchStatistics::new();
        statistics.increment_opened_nodes();

        Self {
            problem,
            strategy,
            frontier,
            statistics,
            phase: SearchPhase::Ready,
            goal: None,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn frontier(&self) -> &Frontier<P::State> {
        &self.frontier
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Extract one node and either discard it, report it as a goal or expand
    /// it. Once the search has terminated every further call reports the same
    /// outcome again.
    pub fn step(&mut self) -> Result<SearchStep<P::State>, SearchError> {
        match self.phase {
            SearchPhase::GoalFound => {
                return Ok(SearchStep::GoalFound(
                    self.goal.expect("Goal phase without a goal node"),
                ))
            }
            SearchPhase::Exhausted => return Ok(SearchStep::Exhausted),
            SearchPhase::Ready | SearchPhase::Running => {}
        }
        self.phase = SearchPhase::Running;

        let node_id = if self.frontier.open_len() == 0 {
            None
        } else {
            self.strategy.extract_next(&mut self.frontier)
        };
        let Some(node_id) = node_id else {
            self.phase = SearchPhase::Exhausted;
            return Ok(SearchStep::Exhausted);
        };

        let node = self.frontier.get_node(node_id);
        let state = node.get_state().clone();
        let g_value = node.get_g();
        let h_value = node.get_h();
        let depth = node.get_depth();

        if self.frontier.is_closed(&state) {
            self.statistics.increment_discarded_duplicates();
            return Ok(SearchStep::Discarded);
        }

        if self.problem.is_goal(&state) {
            trace!(?state, g = g_value.into_inner(), "goal found");
            self.phase = SearchPhase::GoalFound;
            self.goal = Some(node_id);
            return Ok(SearchStep::GoalFound(node_id));
        }

        self.frontier.close(state.clone());
        self.statistics.increment_expanded_nodes();
        self.statistics.register_heuristic_value(h_value);
        trace!(?state, g = g_value.into_inner(), h = h_value.into_inner(), "expanding");

        let mut successors = 0;
        for transition in self.problem.expand(&state) {
            if !(transition.cost >= 0.) {
                return Err(SearchError::NegativeTransitionCost {
                    cost: transition.cost,
                });
            }
            successors += 1;
            self.statistics.increment_generated_nodes();
            let candidate = Candidate {
                state: transition.state,
                parent_id: node_id,
                g: g_value + transition.cost,
                depth: depth + 1,
            };
            self.strategy
                .open_successor(&mut self.frontier, candidate, &mut self.statistics);
        }

        Ok(SearchStep::Expanded { state, successors })
    }

    /// Step until the search terminates.
    pub fn run(mut self) -> Result<(SearchResult<P::State>, SearchStatistics), SearchError> {
        loop {
            match self.step()? {
                SearchStep::GoalFound(goal_id) => {
                    self.statistics.finalise_search();
                    self.problem.finalise_search();
                    let path = self.frontier.space().extract_path(goal_id);
                    return Ok((SearchResult::Success(path), self.statistics));
                }
                SearchStep::Exhausted => {
                    self.statistics.finalise_search();
                    self.problem.finalise_search();
                    return Ok((SearchResult::NoSolution, self.statistics));
                }
                SearchStep::Expanded { .. } | SearchStep::Discarded => {}
            }
        }
    }
}
