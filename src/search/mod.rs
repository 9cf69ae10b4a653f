//! The problem-independent search machinery: problems, nodes, open and closed
//! lists, heuristics and the best-first engines built on them.

mod frontier;
pub mod heuristics;
pub mod search_engines;
mod search_node;
mod search_problem;
mod search_space;
mod search_statistics;

pub use frontier::{ClosedList, Frontier, OpenList};
pub use heuristics::{Heuristic, HeuristicValue, ZeroHeuristic};
pub use search_engines::{
    AStar, BestFirstSearch, GreedyStochastic, GreedyStochasticConfig, SearchError, SearchPhase,
    SearchResult, SearchStep, SearchStrategy,
};
pub use search_node::{Candidate, NodeId, SearchNode, NO_NODE};
pub use search_problem::{SearchProblem, SearchState, Successors, Transition};
pub use search_space::{PathStep, SearchPath, SearchSpace};
pub use search_statistics::SearchStatistics;
