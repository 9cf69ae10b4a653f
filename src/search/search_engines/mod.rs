mod astar;
mod best_first_search;
mod greedy_stochastic;

pub use astar::AStar;
pub use best_first_search::{
    BestFirstSearch, SearchError, SearchPhase, SearchResult, SearchStep, SearchStrategy,
};
pub use greedy_stochastic::{GreedyStochastic, GreedyStochasticConfig};
