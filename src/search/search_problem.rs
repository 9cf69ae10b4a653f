//! The abstraction every search engine in this crate works against: a
//! [`SearchProblem`] owns an initial state, a goal test and a lazy successor
//! function.

use std::fmt::Debug;
use std::hash::Hash;

/// A state of a search problem. States are compared and hashed structurally,
/// so any continuous field must be quantized by the implementation before it
/// takes part in [`Eq`] or [`Hash`].
pub trait SearchState: Clone + Eq + Hash + Debug {}

impl<S> SearchState for S where S: Clone + Eq + Hash + Debug {}

/// A successor state together with the cost of the operator that yields it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub state: S,
    pub cost: f64,
}

impl<S> Transition<S> {
    pub fn new(state: S, cost: f64) -> Self {
        Self { state, cost }
    }
}

/// An iterator over the successors of a state. Engines consume it one
/// transition at a time, so implementations are free to compute successors
/// lazily.
pub type Successors<'a, S> = Box<dyn Iterator<Item = Transition<S>> + 'a>;

pub trait SearchProblem: Debug {
    type State: SearchState;

    /// A short human readable name, used in logs and solver reports.
    fn name(&self) -> String;

    fn initial_state(&self) -> &Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// The successor function. Every yielded cost must be non-negative; the
    /// engines treat anything else as a malformed problem and abort. An empty
    /// iterator marks a dead end.
    fn expand<'a>(&'a mut self, state: &'a Self::State) -> Successors<'a, Self::State>;

    /// Called once by the engine when a search of this problem terminates,
    /// whether or not a goal was found.
    fn finalise_search(&mut self) {}
}
