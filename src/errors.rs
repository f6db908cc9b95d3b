use std::time::Duration;
use thiserror::Error;


/// Failures of graph construction and of a single path search
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathFinderError {
    /// Node is not part of the graph - raised before any search starts
    #[error("unknown node {0}")]
    UnknownNode(String),

    #[error("no edge from {from} to {to}")]
    NoSuchEdge { from: String, to: String },

    /// Negative, NaN or infinite edge weight
    #[error("invalid weight {weight} on edge from {from} to {to}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    /// Frontier exhausted before the target was finalized
    #[error("target {target} is unreachable from {start}")]
    UnreachableTarget { start: String, target: String },

    /// extract_min on an empty queue - the search loop never does this
    #[error("priority queue is empty")]
    EmptyQueue,

    #[error("search cancelled after finalizing {expanded} nodes")]
    Cancelled { expanded: usize },

    #[error("search exceeded the expansion limit of {0} nodes")]
    ExpansionLimit(usize),

    #[error("search exceeded its timeout of {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Failures of coordinates and of the road network's spatial index
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid coordinate (lat {lat}, lon {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Same node registered twice with different coordinates
    #[error("node {0} already has a different coordinate")]
    DuplicateNode(String),

    #[error("road network has no intersections")]
    EmptyNetwork,

    #[error("spatial index error: {0}")]
    SpatialIndex(String),
}


impl From<kdtree::ErrorKind> for GeometryError {
    fn from(error: kdtree::ErrorKind) -> Self {
        GeometryError::SpatialIndex(error.to_string())
    }
}


/// Render a node id for error messages
pub(crate) fn node_label<N: std::fmt::Debug>(node: &N) -> String {
    format!("{node:?}")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_nodes() {
        let err = PathFinderError::UnreachableTarget {
            start: node_label(&"A"),
            target: node_label(&7u64),
        };
        assert_eq!(err.to_string(), "target 7 is unreachable from \"A\"");

        let err = PathFinderError::NoSuchEdge { from: node_label(&1), to: node_label(&2) };
        assert_eq!(err.to_string(), "no edge from 1 to 2");
    }

    #[test]
    fn test_geometry_error_converts() {
        let err: PathFinderError = GeometryError::EmptyNetwork.into();
        assert_eq!(err, PathFinderError::Geometry(GeometryError::EmptyNetwork));
        assert_eq!(err.to_string(), "road network has no intersections");
    }
}
