pub mod multigraph;

pub use multigraph::MultiDiGraph;

use crate::errors::{PathFinderError, node_label};

use std::{hash::Hash, fmt::Debug};


/// Read-only adjacency and weight queries used by the path finder
///
/// Implementations must have no side effects on lookup, so one graph can be
/// shared by any number of concurrent searches.
pub trait Graph {
    /// Node identifier - opaque to the search
    type Node: Eq + Hash + Clone + Debug;

    /// Successors of a node, each distinct successor once
    type Neighbors<'a>: Iterator<Item = &'a Self::Node>
    where
        Self: 'a;

    fn contains_node(&self, node: &Self::Node) -> bool;

    /// Nodes reachable from `node` over one outgoing edge
    /// Calling it again restarts the enumeration
    fn neighbors(&self, node: &Self::Node) -> Result<Self::Neighbors<'_>, PathFinderError>;

    /// Traversal cost of the edge `from -> to`
    /// With parallel edges the minimum weight is returned
    fn weight(&self, from: &Self::Node, to: &Self::Node) -> Result<f64, PathFinderError>;

    /// Total weight of consecutive edges along `path`
    /// An empty or single node path costs nothing
    fn path_weight(&self, path: &[Self::Node]) -> Result<f64, PathFinderError> {
        let mut total = 0.0;
        for pair in path.windows(2) {
            total += self.weight(&pair[0], &pair[1])?;
        }
        Ok(total)
    }
}


/// Edge weights must be finite and non-negative
pub(crate) fn check_weight<N: Debug>(from: &N, to: &N, weight: f64) -> Result<f64, PathFinderError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(PathFinderError::InvalidWeight {
            from: node_label(from),
            to: node_label(to),
            weight,
        })
    }
}
