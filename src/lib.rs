//! Least-cost routing over road networks.
//!
//! A road network is a directed multigraph with non-negative edge weights
//! (road lengths). [`PathFinder`] runs a uniform-cost search (Dijkstra's
//! algorithm) between two nodes of any [`Graph`] and returns the cheapest
//! path, stopping as soon as the target is finalized.
//!
//! ```
//! use roadpath::{MultiDiGraph, find_path};
//!
//! let graph = MultiDiGraph::from_edges([
//!     ("A", "B", 1.0),
//!     ("A", "C", 4.0),
//!     ("B", "C", 1.0),
//!     ("B", "D", 5.0),
//!     ("C", "D", 1.0),
//! ]).unwrap();
//!
//! assert_eq!(find_path(&graph, &"A", &"D").unwrap(), vec!["A", "B", "C", "D"]);
//! ```
//!
//! The crate logs through the `log` facade and never installs a logger.

pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod network;
pub mod queue;

mod collections;

pub use collections::FxIndexMap;
pub use errors::{GeometryError, PathFinderError};
pub use geometry::Coordinate;
pub use graph::{Graph, MultiDiGraph};
pub use graph_algos::{PathFinder, Route, SearchOptions, SearchProgress, find_path};
pub use network::RoadNetwork;
pub use queue::MinPriorityQueue;
