use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A point of the road network. Junctions are identified by their index
/// alone; the coordinates only feed the straight-line distance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Junction {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

impl Junction {
    pub fn new(index: usize, x: f64, y: f64) -> Self {
        Self { index, x, y }
    }

    /// Straight-line ("as the crow flies") distance to `other`. No road path
    /// between the two junctions is shorter.
    pub fn air_distance_to(&self, other: &Junction) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl PartialEq for Junction {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Junction {}

impl Hash for Junction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// Key for a symmetric quantity between two junctions.
pub(crate) fn unordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
