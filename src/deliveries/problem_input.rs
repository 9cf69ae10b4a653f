use crate::deliveries::{DeliveriesError, Junction, Roads};
use serde::{Deserialize, Serialize};

/// Everything needed to pose a deliveries problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveriesProblemInput {
    pub input_name: String,
    pub start_point: Junction,
    pub drop_points: Vec<Junction>,
    pub gas_stations: Vec<Junction>,
    pub gas_tank_capacity: f64,
    pub gas_tank_init_fuel: f64,
}

impl DeliveriesProblemInput {
    /// Build an input whose stops are given as junction indices of `roads`.
    pub fn from_roads(
        input_name: impl Into<String>,
        roads: &Roads,
        start_point: usize,
        drop_points: &[usize],
        gas_stations: &[usize],
        gas_tank_capacity: f64,
        gas_tank_init_fuel: f64,
    ) -> Result<Self, DeliveriesError> {
        let lookup = |index: usize| {
            roads
                .junction(index)
                .copied()
                .ok_or(DeliveriesError::UnknownJunction(index))
        };
        Ok(Self {
            input_name: input_name.into(),
            start_point: lookup(start_point)?,
            drop_points: drop_points
                .iter()
                .map(|&index| lookup(index))
                .collect::<Result<_, _>>()?,
            gas_stations: gas_stations
                .iter()
                .map(|&index| lookup(index))
                .collect::<Result<_, _>>()?,
            gas_tank_capacity,
            gas_tank_init_fuel,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, DeliveriesError> {
        let input: Self = serde_json::from_str(text)?;
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), DeliveriesError> {
        if !(self.gas_tank_init_fuel > 0.) {
            return Err(DeliveriesError::NonPositiveInitialFuel(
                self.gas_tank_init_fuel,
            ));
        }
        if !(self.gas_tank_capacity > 0.) {
            return Err(DeliveriesError::NonPositiveTankCapacity(
                self.gas_tank_capacity,
            ));
        }
        if self.drop_points.contains(&self.start_point) {
            return Err(DeliveriesError::StartIsDropPoint(self.start_point.index));
        }
        if let Some(station) = self
            .gas_stations
            .iter()
            .find(|station| self.drop_points.contains(station))
        {
            return Err(DeliveriesError::GasStationIsDropPoint(station.index));
        }
        Ok(())
    }
}
