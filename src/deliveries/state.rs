use crate::deliveries::Junction;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Fuel is compared at this many units per liter, i.e. in microliters.
pub const FUEL_RESOLUTION: f64 = 1_000_000.;

/// The fixed-precision surrogate used wherever fuel amounts are compared.
pub fn quantize_fuel(fuel: f64) -> i64 {
    (fuel * FUEL_RESOLUTION) as i64
}

/// A state of a deliveries problem: where the truck is, which drop points it
/// has served and how much fuel is left.
///
/// Fuel is continuous, so two states are equal when their fuel levels agree
/// up to [`FUEL_RESOLUTION`], not bit for bit.
#[derive(Debug, Clone)]
pub struct DeliveriesState {
    current_location: Junction,
    dropped_so_far: BTreeSet<usize>,
    fuel: f64,
}

impl DeliveriesState {
    pub fn new(current_location: Junction, dropped_so_far: BTreeSet<usize>, fuel: f64) -> Self {
        debug_assert!(fuel >= 0., "fuel must not be negative");
        Self {
            current_location,
            dropped_so_far,
            fuel,
        }
    }

    pub fn current_location(&self) -> &Junction {
        &self.current_location
    }

    /// Indices of the drop points served so far.
    pub fn dropped_so_far(&self) -> &BTreeSet<usize> {
        &self.dropped_so_far
    }

    pub fn has_dropped(&self, junction: &Junction) -> bool {
        self.dropped_so_far.contains(&junction.index)
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn fuel_as_int(&self) -> i64 {
        quantize_fuel(self.fuel)
    }
}

impl PartialEq for DeliveriesState {
    fn eq(&self, other: &Self) -> bool {
        self.current_location == other.current_location
            && self.dropped_so_far == other.dropped_so_far
            && self.fuel_as_int() == other.fuel_as_int()
    }
}

impl Eq for DeliveriesState {}

impl Hash for DeliveriesState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.current_location.hash(state);
        self.dropped_so_far.hash(state);
        self.fuel_as_int().hash(state);
    }
}

impl fmt::Display for DeliveriesState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_location)
    }
}
