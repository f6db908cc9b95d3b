pub mod uniform_cost;
mod options;
mod shortest_path;

pub use options::{SearchOptions, SearchProgress};
pub use uniform_cost::{PathFinder, Route, find_path};

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;

/// Type alias for the node map used in path planning algorithms
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the best known total cost to reach this node from the start
/// Together these are the path-cost and predecessor tables of one search
pub type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;
