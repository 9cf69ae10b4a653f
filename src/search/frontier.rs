//! Open and closed list management shared by every best-first strategy.

use crate::search::{
    search_node::Candidate, HeuristicValue, NodeId, SearchNode, SearchSpace, SearchState,
};
use priority_queue::PriorityQueue;
use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
};

/// The open list. Entries are keyed by state, so a state is open at most once,
/// and ordered by priority with ties broken by insertion order.
#[derive(Debug)]
pub struct OpenList<S: SearchState> {
    queue: PriorityQueue<S, Reverse<(HeuristicValue, u64)>>,
    nodes: HashMap<S, NodeId>,
    next_sequence: u64,
}

impl<S: SearchState> Default for OpenList<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SearchState> OpenList<S> {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
            nodes: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Push a node for `state`. If the state is already open its node and
    /// priority are replaced.
    pub fn push(&mut self, state: S, node_id: NodeId, priority: HeuristicValue) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.nodes.insert(state.clone(), node_id);
        self.queue.push(state, Reverse((priority, sequence)));
    }

    /// Remove the node with the lowest priority.
    pub fn pop(&mut self) -> Option<(NodeId, HeuristicValue)> {
        let (state, Reverse((priority, _))) = self.queue.pop()?;
        let node_id = self
            .nodes
            .remove(&state)
            .expect("Open list queue and node index out of sync");
        Some((node_id, priority))
    }

    pub fn has_state(&self, state: &S) -> bool {
        self.nodes.contains_key(state)
    }

    pub fn get_node_id(&self, state: &S) -> Option<NodeId> {
        self.nodes.get(state).copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// States that have already been expanded.
#[derive(Debug)]
pub struct ClosedList<S: SearchState> {
    states: HashSet<S>,
}

impl<S: SearchState> Default for ClosedList<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SearchState> ClosedList<S> {
    pub fn new() -> Self {
        Self {
            states: HashSet::new(),
        }
    }

    /// Returns `false` if the state was already closed.
    pub fn add_state(&mut self, state: S) -> bool {
        self.states.insert(state)
    }

    pub fn has_state(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Everything one search owns: the node arena, the open list and, for graph
/// search, the closed list. Strategies manipulate the search only through
/// this type.
#[derive(Debug)]
pub struct Frontier<S: SearchState> {
    space: SearchSpace<S>,
    open: OpenList<S>,
    closed: Option<ClosedList<S>>,
}

impl<S: SearchState> Frontier<S> {
    /// Create an empty frontier. Without a closed list the search runs in
    /// tree-search mode and states may be expanded more than once.
    pub fn new(use_closed: bool) -> Self {
        Self {
            space: SearchSpace::new(),
            open: OpenList::new(),
            closed: use_closed.then(ClosedList::new),
        }
    }

    pub fn open_root(&mut self, state: S, h: HeuristicValue, priority: HeuristicValue) -> NodeId {
        let node_id = self.space.insert_root(state.clone(), h);
        self.open.push(state, node_id, priority);
        node_id
    }

    /// Turn a candidate into a node and push it on the open list, replacing
    /// any node already open for the same state.
    pub fn open_candidate(
        &mut self,
        candidate: Candidate<S>,
        h: HeuristicValue,
        priority: HeuristicValue,
    ) -> NodeId {
        let state = candidate.state.clone();
        let node_id = self.space.insert(candidate, h);
        self.open.push(state, node_id, priority);
        node_id
    }

    /// Push an existing node back on the open list.
    pub fn reopen(&mut self, node_id: NodeId, priority: HeuristicValue) {
        let state = self.space.get_node(node_id).get_state().clone();
        self.open.push(state, node_id, priority);
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        self.open.pop().map(|(node_id, _)| node_id)
    }

    /// Mark a state as expanded. Returns `false` if it already was, or if the
    /// frontier has no closed list.
    pub fn close(&mut self, state: S) -> bool {
        match self.closed.as_mut() {
            Some(closed) => closed.add_state(state),
            None => false,
        }
    }

    pub fn uses_closed(&self) -> bool {
        self.closed.is_some()
    }

    pub fn is_closed(&self, state: &S) -> bool {
        self.closed
            .as_ref()
            .is_some_and(|closed| closed.has_state(state))
    }

    pub fn is_open(&self, state: &S) -> bool {
        self.open.has_state(state)
    }

    /// The node currently open for `state`, if any.
    pub fn get_open_node(&self, state: &S) -> Option<&SearchNode<S>> {
        self.open
            .get_node_id(state)
            .map(|node_id| self.space.get_node(node_id))
    }

    pub fn get_node(&self, node_id: NodeId) -> &SearchNode<S> {
        self.space.get_node(node_id)
    }

    pub fn space(&self) -> &SearchSpace<S> {
        &self.space
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    pub fn closed_len(&self) -> usize {
        self.closed.as_ref().map_or(0, ClosedList::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_list_pops_lowest_priority_first() {
        let mut open = OpenList::new();
        open.push("c", NodeId::new(0), (3.).into());
        open.push("a", NodeId::new(1), (1.).into());
        open.push("b", NodeId::new(2), (2.).into());

        assert_eq!(open.pop(), Some((NodeId::new(1), (1.).into())));
        assert_eq!(open.pop(), Some((NodeId::new(2), (2.).into())));
        assert_eq!(open.pop(), Some((NodeId::new(0), (3.).into())));
        assert_eq!(open.pop(), None);
    }

    #[test]
    fn open_list_breaks_ties_by_insertion_order() {
        let mut open = OpenList::new();
        for (i, state) in ["x", "y", "z", "w"].into_iter().enumerate() {
            open.push(state, NodeId::new(i), (5.).into());
        }
        let order: Vec<usize> = std::iter::from_fn(|| open.pop())
            .map(|(node_id, _)| node_id.id())
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn pushing_open_state_replaces_its_node() {
        let mut open = OpenList::new();
        open.push("a", NodeId::new(0), (4.).into());
        open.push("b", NodeId::new(1), (3.).into());
        open.push("a", NodeId::new(2), (1.).into());

        assert_eq!(open.len(), 2);
        assert_eq!(open.get_node_id(&"a"), Some(NodeId::new(2)));
        assert_eq!(open.pop(), Some((NodeId::new(2), (1.).into())));
        assert!(!open.has_state(&"a"));
    }

    #[test]
    fn frontier_without_closed_list_never_closes() {
        let mut frontier = Frontier::new(false);
        frontier.open_root(1u8, (0.).into(), (0.).into());
        assert!(!frontier.close(1));
        assert!(!frontier.is_closed(&1));
        assert_eq!(frontier.closed_len(), 0);
    }

    #[test]
    fn frontier_tracks_open_and_closed_states() {
        let mut frontier = Frontier::new(true);
        let root = frontier.open_root(1u8, (2.).into(), (2.).into());
        assert!(frontier.is_open(&1));
        assert_eq!(
            frontier.get_open_node(&1).map(|n| n.get_node_id()),
            Some(root)
        );

        assert_eq!(frontier.pop(), Some(root));
        assert!(frontier.close(1));
        assert!(!frontier.close(1));
        assert!(frontier.is_closed(&1));
        assert!(!frontier.is_open(&1));
    }
}
