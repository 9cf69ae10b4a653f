use ordered_float::OrderedFloat;
use std::fmt::Debug;

pub type HeuristicValue = OrderedFloat<f64>;

/// An estimate of the cost still needed to reach a goal from a state.
///
/// The engines never check admissibility. A* only returns optimal solutions
/// when the heuristic never overestimates the true remaining cost, and that
/// is the responsibility of whoever pairs a heuristic with a problem.
pub trait Heuristic<S>: Debug {
    /// Short name used in solver names and logs.
    fn name(&self) -> &'static str;

    /// Evaluate the given state. The value must be non-negative and may be
    /// infinite when the goal is known to be unreachable.
    fn evaluate(&mut self, state: &S) -> HeuristicValue;
}

impl<S, H> Heuristic<S> for Box<H>
where
    H: Heuristic<S> + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn evaluate(&mut self, state: &S) -> HeuristicValue {
        (**self).evaluate(state)
    }
}
