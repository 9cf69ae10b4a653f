use thiserror::Error;

/// Reasons a deliveries problem or road network cannot be built.
#[derive(Debug, Error)]
pub enum DeliveriesError {
    #[error("initial fuel must be positive, got {0}")]
    NonPositiveInitialFuel(f64),
    #[error("gas tank capacity must be positive, got {0}")]
    NonPositiveTankCapacity(f64),
    #[error("start junction {0} is also a drop point")]
    StartIsDropPoint(usize),
    #[error("junction {0} is both a gas station and a drop point")]
    GasStationIsDropPoint(usize),
    #[error("unknown junction {0}")]
    UnknownJunction(usize),
    #[error("link between {from} and {to} has negative distance {distance}")]
    NegativeLinkDistance {
        from: usize,
        to: usize,
        distance: f64,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
