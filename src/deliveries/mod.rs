//! The deliveries domain: a truck with a limited tank serving drop points on
//! a road network, refuelling at gas stations on the way.

mod deliveries_problem;
mod error;
mod heuristics;
mod junction;
mod map_problem;
mod problem_input;
mod roads;
mod state;
mod transition_cost;

pub use deliveries_problem::{
    DeliveriesGoal, DeliveriesProblem, RelaxedDeliveriesProblem, Stop, StopKind, StopPoints,
    StrictDeliveriesProblem,
};
pub use error::DeliveriesError;
pub use heuristics::{
    DeliveriesHeuristicName, MaxAirDistHeuristic, MstAirDistHeuristic, RelaxedDeliveriesHeuristic,
};
pub use junction::Junction;
pub use map_problem::{AStarRoadOracle, AirDistanceHeuristic, MapProblem, RoadCostOracle};
pub use problem_input::DeliveriesProblemInput;
pub use roads::{JunctionDescription, LinkDescription, Roads, RoadsDescription};
pub use state::{quantize_fuel, DeliveriesState, FUEL_RESOLUTION};
pub use transition_cost::{AirDistanceCost, CachedCost, RoadDistanceCost, TransitionCost};
