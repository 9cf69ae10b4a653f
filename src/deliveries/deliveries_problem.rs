use crate::deliveries::{
    quantize_fuel, AirDistanceCost, DeliveriesError, DeliveriesProblemInput, DeliveriesState,
    Junction, RoadCostOracle, RoadDistanceCost, TransitionCost,
};
use crate::search::{SearchPath, SearchProblem, Successors, Transition};
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopKind {
    DropPoint,
    GasStation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop {
    pub junction: Junction,
    pub kind: StopKind,
}

/// The stop points of a problem together with the truck's tank capacity.
/// Shared between a problem and the heuristics built for it.
#[derive(Debug, Clone)]
pub struct StopPoints {
    drop_points: Vec<Junction>,
    gas_stations: Vec<Junction>,
    gas_tank_capacity: f64,
}

impl StopPoints {
    pub fn new(
        drop_points: Vec<Junction>,
        gas_stations: Vec<Junction>,
        gas_tank_capacity: f64,
    ) -> Self {
        Self {
            drop_points,
            gas_stations,
            gas_tank_capacity,
        }
    }

    pub fn drop_points(&self) -> &[Junction] {
        &self.drop_points
    }

    pub fn gas_stations(&self) -> &[Junction] {
        &self.gas_stations
    }

    pub fn gas_tank_capacity(&self) -> f64 {
        self.gas_tank_capacity
    }

    pub fn is_drop_point(&self, junction: &Junction) -> bool {
        self.drop_points.contains(junction)
    }

    pub fn is_gas_station(&self, junction: &Junction) -> bool {
        self.gas_stations.contains(junction)
    }

    /// Drop points `state` has not served yet.
    pub fn remaining_drop_points<'a>(
        &'a self,
        state: &'a DeliveriesState,
    ) -> impl Iterator<Item = &'a Junction> + 'a {
        self.drop_points
            .iter()
            .filter(move |junction| !state.has_dropped(junction))
    }

    pub fn len(&self) -> usize {
        self.drop_points.len() + self.gas_stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stops are numbered drop points first, then gas stations.
    pub fn stop(&self, i: usize) -> Stop {
        if i < self.drop_points.len() {
            Stop {
                junction: self.drop_points[i],
                kind: StopKind::DropPoint,
            }
        } else {
            Stop {
                junction: self.gas_stations[i - self.drop_points.len()],
                kind: StopKind::GasStation,
            }
        }
    }
}

/// When a deliveries problem is solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveriesGoal {
    /// Standing on any drop point.
    AnyDropPoint,
    /// Every drop point served.
    AllDropPoints,
}

/// A truck starts somewhere with some fuel and drives between stop points.
/// Reaching a drop point serves it and burns fuel equal to the driving cost,
/// reaching a gas station fills the tank. A stop is only reachable when the
/// fuel left covers the cost of getting there.
///
/// The cost function and the goal are what distinguish the
/// [`RelaxedDeliveriesProblem`] from the [`StrictDeliveriesProblem`].
#[derive(Debug)]
pub struct DeliveriesProblem<C> {
    name: String,
    stop_points: Rc<StopPoints>,
    initial_state: DeliveriesState,
    goal: DeliveriesGoal,
    cost_function: C,
}

/// Straight-line moves, solved once any drop point is reached.
pub type RelaxedDeliveriesProblem = DeliveriesProblem<AirDistanceCost>;

/// Road moves, solved once every drop point is served.
pub type StrictDeliveriesProblem<O> = DeliveriesProblem<RoadDistanceCost<O>>;

impl RelaxedDeliveriesProblem {
    pub fn new(input: &DeliveriesProblemInput) -> Result<Self, DeliveriesError> {
        input.validate()?;
        Ok(Self::from_parts(
            format!("RelaxedDeliveries({})", input.input_name),
            Rc::new(stop_points_of(input)),
            DeliveriesState::new(input.start_point, BTreeSet::new(), input.gas_tank_init_fuel),
            DeliveriesGoal::AnyDropPoint,
            AirDistanceCost,
        ))
    }

    /// The relaxed problem of a strict problem's state: start where the state
    /// is, with its fuel, and reach any drop point it has not served yet.
    pub fn from_state(stop_points: &StopPoints, state: &DeliveriesState) -> Self {
        let remaining = stop_points.remaining_drop_points(state).copied().collect();
        let relaxed_stop_points = StopPoints::new(
            remaining,
            stop_points.gas_stations().to_vec(),
            stop_points.gas_tank_capacity(),
        );
        Self::from_parts(
            "RelaxedDeliveries(new_relaxed_inputs)".to_string(),
            Rc::new(relaxed_stop_points),
            DeliveriesState::new(*state.current_location(), BTreeSet::new(), state.fuel()),
            DeliveriesGoal::AnyDropPoint,
            AirDistanceCost,
        )
    }
}

impl<O: RoadCostOracle> StrictDeliveriesProblem<O> {
    pub fn new(input: &DeliveriesProblemInput, oracle: O) -> Result<Self, DeliveriesError> {
        Self::with_cost_function(input, RoadDistanceCost::new(oracle))
    }

    pub fn with_cost_function(
        input: &DeliveriesProblemInput,
        cost_function: RoadDistanceCost<O>,
    ) -> Result<Self, DeliveriesError> {
        input.validate()?;
        Ok(Self::from_parts(
            format!("StrictDeliveries({})", input.input_name),
            Rc::new(stop_points_of(input)),
            DeliveriesState::new(input.start_point, BTreeSet::new(), input.gas_tank_init_fuel),
            DeliveriesGoal::AllDropPoints,
            cost_function,
        ))
    }
}

impl<C> DeliveriesProblem<C> {
    fn from_parts(
        name: String,
        stop_points: Rc<StopPoints>,
        initial_state: DeliveriesState,
        goal: DeliveriesGoal,
        cost_function: C,
    ) -> Self {
        trace!(name = %name, stops = stop_points.len(), "created deliveries problem");
        Self {
            name,
            stop_points,
            initial_state,
            goal,
            cost_function,
        }
    }

    pub fn stop_points(&self) -> &Rc<StopPoints> {
        &self.stop_points
    }

    pub fn goal(&self) -> DeliveriesGoal {
        self.goal
    }

    pub fn cost_function(&self) -> &C {
        &self.cost_function
    }

    /// Gas stations visited along a solution path, in order.
    pub fn gas_stations_on_path(&self, path: &SearchPath<DeliveriesState>) -> Vec<usize> {
        path.states()
            .map(DeliveriesState::current_location)
            .filter(|junction| self.stop_points.is_gas_station(junction))
            .map(|junction| junction.index)
            .collect()
    }
}

fn stop_points_of(input: &DeliveriesProblemInput) -> StopPoints {
    StopPoints::new(
        input.drop_points.clone(),
        input.gas_stations.clone(),
        input.gas_tank_capacity,
    )
}

impl<C: TransitionCost> SearchProblem for DeliveriesProblem<C> {
    type State = DeliveriesState;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn initial_state(&self) -> &DeliveriesState {
        &self.initial_state
    }

    fn is_goal(&self, state: &DeliveriesState) -> bool {
        match self.goal {
            DeliveriesGoal::AnyDropPoint => {
                self.stop_points.is_drop_point(state.current_location())
            }
            DeliveriesGoal::AllDropPoints => self
                .stop_points
                .drop_points()
                .iter()
                .all(|junction| state.has_dropped(junction)),
        }
    }

    fn expand<'a>(&'a mut self, state: &'a DeliveriesState) -> Successors<'a, DeliveriesState> {
        let stop_points = Rc::clone(&self.stop_points);
        let cost_function = &mut self.cost_function;
        let current = *state.current_location();

        Box::new((0..stop_points.len()).filter_map(move |i| {
            let stop = stop_points.stop(i);
            if stop.junction == current || state.has_dropped(&stop.junction) {
                return None;
            }

            let cost = cost_function.cost(&current, &stop.junction)?;
            if quantize_fuel(cost) > state.fuel_as_int() {
                return None;
            }

            let successor = match stop.kind {
                StopKind::GasStation => DeliveriesState::new(
                    stop.junction,
                    state.dropped_so_far().clone(),
                    stop_points.gas_tank_capacity(),
                ),
                StopKind::DropPoint => {
                    let mut dropped_so_far = state.dropped_so_far().clone();
                    dropped_so_far.insert(stop.junction.index);
                    let fuel = (state.fuel() - cost).max(0.);
                    DeliveriesState::new(stop.junction, dropped_so_far, fuel)
                }
            };
            Some(Transition::new(successor, cost))
        }))
    }

    fn finalise_search(&mut self) {
        self.cost_function.log_statistics();
    }
}
