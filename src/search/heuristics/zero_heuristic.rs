use crate::search::{Heuristic, HeuristicValue};

/// Estimates zero everywhere. Turns A* into uniform cost search.
#[derive(Clone, Debug, Default)]
pub struct ZeroHeuristic {}

impl ZeroHeuristic {
    pub fn new() -> Self {
        ZeroHeuristic {}
    }
}

impl<S> Heuristic<S> for ZeroHeuristic {
    fn name(&self) -> &'static str {
        "Zero"
    }

    fn evaluate(&mut self, _state: &S) -> HeuristicValue {
        (0.).into()
    }
}
