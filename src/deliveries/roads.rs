//! The road network the strict deliveries problem drives on.

use crate::deliveries::{DeliveriesError, Junction};
use petgraph::{graph::{NodeIndex, UnGraph}, visit::EdgeRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunctionDescription {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDescription {
    pub source: usize,
    pub target: usize,
    /// Length of the link. Defaults to the air distance of its endpoints.
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Serialisable form of a [`Roads`] network. Junction indices are positions
/// in `junctions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadsDescription {
    pub junctions: Vec<JunctionDescription>,
    pub links: Vec<LinkDescription>,
}

/// A road network. Junction `i` is node `i` of the underlying graph, links
/// are weighted by their length and can be driven in both directions, so the
/// shortest distance between two junctions is symmetric.
#[derive(Debug, Clone, Default)]
pub struct Roads {
    graph: UnGraph<Junction, f64>,
}

impl Roads {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
        }
    }

    pub fn from_description(description: &RoadsDescription) -> Result<Self, DeliveriesError> {
        let mut roads = Self::new();
        for junction in &description.junctions {
            roads.add_junction(junction.x, junction.y);
        }
        for link in &description.links {
            let distance = match link.distance {
                Some(distance) => distance,
                None => roads.air_distance(link.source, link.target)?,
            };
            roads.add_link(link.source, link.target, distance)?;
        }
        Ok(roads)
    }

    pub fn from_json_str(text: &str) -> Result<Self, DeliveriesError> {
        let description: RoadsDescription = serde_json::from_str(text)?;
        Self::from_description(&description)
    }

    /// Add a junction and return its index.
    pub fn add_junction(&mut self, x: f64, y: f64) -> usize {
        let index = self.graph.node_count();
        self.graph.add_node(Junction::new(index, x, y));
        index
    }

    /// Add a link between `a` and `b`.
    pub fn add_link(&mut self, a: usize, b: usize, distance: f64) -> Result<(), DeliveriesError> {
        self.check_junction(a)?;
        self.check_junction(b)?;
        if !(distance >= 0.) {
            return Err(DeliveriesError::NegativeLinkDistance {
                from: a,
                to: b,
                distance,
            });
        }
        self.graph
            .add_edge(NodeIndex::new(a), NodeIndex::new(b), distance);
        Ok(())
    }

    pub fn junction(&self, index: usize) -> Option<&Junction> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    pub fn junction_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Links at a junction as `(neighbour, distance)` pairs.
    pub fn links_from(&self, index: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.junction(index)
            .map(|_| self.graph.edges(NodeIndex::new(index)))
            .into_iter()
            .flatten()
            .map(|edge| (edge.target().index(), *edge.weight()))
    }

    fn check_junction(&self, index: usize) -> Result<&Junction, DeliveriesError> {
        self.junction(index)
            .ok_or(DeliveriesError::UnknownJunction(index))
    }

    fn air_distance(&self, a: usize, b: usize) -> Result<f64, DeliveriesError> {
        let a = self.check_junction(a)?;
        let b = self.check_junction(b)?;
        Ok(a.air_distance_to(b))
    }
}
