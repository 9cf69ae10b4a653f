use crate::search::{
    search_node::Candidate, HeuristicValue, NodeId, SearchNode, SearchState, NO_NODE,
};
use itertools::Itertools;
use segvec::{Linear, SegVec};
use std::fmt;

/// A [`SearchSpace`] owns every node admitted during one search. Nodes refer
/// to their parents by [`NodeId`], so a node's ancestors stay available for
/// path extraction even after they have left the open list.
#[derive(Debug)]
pub struct SearchSpace<S> {
    nodes: SegVec<SearchNode<S>, Linear>,
}

impl<S: SearchState> Default for SearchSpace<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SearchState> SearchSpace<S> {
    pub fn new() -> Self {
        Self {
            nodes: SegVec::new(),
        }
    }

    pub fn insert_root(&mut self, state: S, h: HeuristicValue) -> NodeId {
        let candidate = Candidate {
            state,
            parent_id: NO_NODE,
            g: (0.).into(),
            depth: 0,
        };
        self.insert(candidate, h)
    }

    /// Admit a candidate with its heuristic value. Returns the id of the new
    /// node.
    pub fn insert(&mut self, candidate: Candidate<S>, h: HeuristicValue) -> NodeId {
        let node_id = NodeId::new(self.nodes.len());
        self.nodes.push(SearchNode::new(
            node_id,
            candidate.state,
            candidate.parent_id,
            candidate.g,
            h,
            candidate.depth,
        ));
        node_id
    }

    #[inline(always)]
    pub fn get_node(&self, node_id: NodeId) -> &SearchNode<S> {
        self.nodes.get(node_id.id()).expect("Invalid node id")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Follow parent links from `goal_id` back to the root and return the
    /// visited nodes in forward order.
    pub fn extract_path(&self, goal_id: NodeId) -> SearchPath<S> {
        let mut steps = vec![];
        let mut current_node = self.get_node(goal_id);
        loop {
            steps.push(PathStep {
                state: current_node.get_state().clone(),
                cost: current_node.get_g().into_inner(),
            });
            if current_node.is_root() {
                break;
            }
            current_node = self.get_node(current_node.get_parent_id());
        }
        steps.reverse();
        SearchPath { steps }
    }
}

/// A state on a solution path together with the cumulative cost of reaching
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep<S> {
    pub state: S,
    pub cost: f64,
}

/// A solution path, from the initial state to a goal state.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPath<S> {
    steps: Vec<PathStep<S>>,
}

impl<S> SearchPath<S> {
    pub fn steps(&self) -> &[PathStep<S>] {
        &self.steps
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.steps.iter().map(|step| &step.state)
    }

    /// Total cost of the path.
    pub fn cost(&self) -> f64 {
        self.steps.last().map_or(0., |step| step.cost)
    }

    /// Number of transitions on the path.
    pub fn len(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn final_state(&self) -> Option<&S> {
        self.steps.last().map(|step| &step.state)
    }
}

impl<S: fmt::Display> fmt::Display for SearchPath<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] (cost {:.4})",
            self.steps.iter().map(|step| &step.state).join(" -> "),
            self.cost()
        )
    }
}
