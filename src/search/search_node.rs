use crate::search::HeuristicValue;

/// Index of a [`SearchNode`] inside the [`crate::search::SearchSpace`] that
/// owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub fn id(&self) -> usize {
        self.0
    }
}

/// Parent id of the root node.
pub const NO_NODE: NodeId = NodeId(usize::MAX);

/// A [`SearchNode`] wraps a state with the path information the search needs:
/// its parent, the cost of reaching it and the heuristic estimate of the cost
/// still to go. Nodes are immutable once created. A cheaper path to the same
/// state produces a new node that supersedes the old one in the open list.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    /// Position of the node in its search space
    node_id: NodeId,
    state: S,
    /// Parent node, [`NO_NODE`] for the root
    parent_id: NodeId,
    /// G-value of the node, i.e. the cumulative cost of the path from the
    /// initial state.
    g: HeuristicValue,
    /// H-value of the node, i.e. the heuristic estimate of the cost to reach
    /// the goal.
    h: HeuristicValue,
    /// Number of transitions from the root
    depth: usize,
}

impl<S> SearchNode<S> {
    pub(crate) fn new(
        node_id: NodeId,
        state: S,
        parent_id: NodeId,
        g: HeuristicValue,
        h: HeuristicValue,
        depth: usize,
    ) -> Self {
        Self {
            node_id,
            state,
            parent_id,
            g,
            h,
            depth,
        }
    }

    pub fn get_node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn get_state(&self) -> &S {
        &self.state
    }

    pub fn get_parent_id(&self) -> NodeId {
        self.parent_id
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == NO_NODE
    }

    pub fn get_g(&self) -> HeuristicValue {
        self.g
    }

    pub fn get_h(&self) -> HeuristicValue {
        self.h
    }

    pub fn get_depth(&self) -> usize {
        self.depth
    }
}

/// A node that has been generated by an expansion but not yet admitted to the
/// search space. Strategies decide whether it becomes a [`SearchNode`].
#[derive(Debug, Clone)]
pub struct Candidate<S> {
    pub state: S,
    pub parent_id: NodeId,
    pub g: HeuristicValue,
    pub depth: usize,
}
