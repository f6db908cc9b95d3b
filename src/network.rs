//! Road network: a directed multigraph whose nodes are located intersections.
//!
//! Roads carry their physical length in metres as edge weight. A spatial
//! index over the intersections snaps arbitrary coordinates to the nearest
//! node, so a route can be asked for between two positions on the map.

use crate::errors::{PathFinderError, GeometryError, node_label};
use crate::collections::FxIndexMap;
use crate::geometry::Coordinate;
use crate::graph::{Graph, MultiDiGraph};
use crate::graph_algos::{PathFinder, Route};

use std::{hash::Hash, fmt::Debug};
use indexmap::map::{Entry::{Occupied, Vacant}, Keys};
use kdtree::KdTree;
use kdtree::distance::squared_euclidean;
use log::{debug, trace};


pub struct RoadNetwork<N> {
    graph: MultiDiGraph<N>,
    coordinates: FxIndexMap<N, Coordinate>,
    // unit sphere position -> index in coordinates
    index: KdTree<f64, usize, [f64; 3]>,
}

impl<N> RoadNetwork<N>
where
    N: Eq + Hash + Clone + Debug,
{

    pub fn new() -> Self {
        Self {
            graph: MultiDiGraph::new(),
            coordinates: FxIndexMap::default(),
            index: KdTree::new(3),
        }
    }

    /// Register an intersection at `coordinate`
    /// Returns false if the node was already registered at the same place
    pub fn add_intersection(&mut self, node: N, coordinate: Coordinate) -> Result<bool, GeometryError> {
        // fields are public, so re-validate
        let coordinate = Coordinate::new(coordinate.lat, coordinate.lon)?;

        match self.coordinates.entry(node) {
            Occupied(e) => {
                if *e.get() == coordinate {
                    Ok(false)
                } else {
                    Err(GeometryError::DuplicateNode(node_label(e.key())))
                }
            }
            Vacant(e) => {
                self.index.add(coordinate.to_unit_vector(), e.index())?;
                trace!("intersection {:?} at ({}, {})", e.key(), coordinate.lat, coordinate.lon);
                self.graph.add_node(e.key().clone());
                e.insert(coordinate);
                Ok(true)
            }
        }
    }

    /// One-way road of the given length in metres
    pub fn add_road(&mut self, from: N, to: N, length: f64) -> Result<(), PathFinderError> {
        self.graph.add_edge(from, to, length)
    }

    pub fn add_two_way_road(&mut self, a: N, b: N, length: f64) -> Result<(), PathFinderError> {
        self.graph.add_two_way_edge(a, b, length)
    }

    /// One-way road whose length is the great-circle distance between its ends
    /// Returns the length used
    pub fn add_straight_road(&mut self, from: N, to: N) -> Result<f64, PathFinderError> {
        let start = self.located(&from)?;
        let end = self.located(&to)?;
        let length = start.distance_to(&end);
        self.graph.add_edge(from, to, length)?;
        Ok(length)
    }

    pub fn coordinate(&self, node: &N) -> Option<Coordinate> {
        self.coordinates.get(node).copied()
    }

    /// Intersection closest to `coordinate` by great-circle distance
    pub fn nearest_node(&self, coordinate: &Coordinate) -> Result<&N, GeometryError> {
        if self.coordinates.is_empty() {
            return Err(GeometryError::EmptyNetwork);
        }

        let nearest = self.index.nearest(&coordinate.to_unit_vector(), 1, &squared_euclidean)?;
        nearest.first()
            .and_then(|&(_, &index)| self.coordinates.get_index(index))
            .map(|(node, _)| node)
            .ok_or(GeometryError::EmptyNetwork)
    }

    /// Snap both positions to their nearest intersections, then search
    pub fn route_between(&self, from: &Coordinate, to: &Coordinate) -> Result<Route<N>, PathFinderError> {
        let source = self.nearest_node(from)?;
        let target = self.nearest_node(to)?;
        debug!("snapped ({}, {}) to {source:?} and ({}, {}) to {target:?}", from.lat, from.lon, to.lat, to.lon);

        PathFinder::new(self).find_route(source, target)
    }

    /// Coordinates along a path, for drawing it
    pub fn polyline(&self, path: &[N]) -> Result<Vec<Coordinate>, PathFinderError> {
        path.iter()
            .map(|node| self.located(node))
            .collect()
    }

    pub fn graph(&self) -> &MultiDiGraph<N> {
        &self.graph
    }

    pub fn intersection_count(&self) -> usize {
        self.coordinates.len()
    }

    pub fn road_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn located(&self, node: &N) -> Result<Coordinate, PathFinderError> {
        self.coordinate(node)
            .ok_or_else(|| PathFinderError::UnknownNode(node_label(node)))
    }
}

impl<N> Default for RoadNetwork<N>
where
    N: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}


impl<N> Graph for RoadNetwork<N>
where
    N: Eq + Hash + Clone + Debug,
{
    type Node = N;
    type Neighbors<'a> = Keys<'a, N, Vec<f64>> where Self: 'a;

    fn contains_node(&self, node: &N) -> bool {
        self.graph.contains_node(node)
    }

    fn neighbors(&self, node: &N) -> Result<Self::Neighbors<'_>, PathFinderError> {
        self.graph.neighbors(node)
    }

    fn weight(&self, from: &N, to: &N) -> Result<f64, PathFinderError> {
        self.graph.weight(from, to)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    // Small street grid, ids as a mapping provider would hand them out
    //
    //   101 ---- 102 ---- 103
    //    |                 |
    //   104 ------------- 105      104 -> 105 is one-way
    fn create_test_network() -> RoadNetwork<u64> {
        let mut network = RoadNetwork::new();
        network.add_intersection(101, coord(36.7500, 5.0500)).unwrap();
        network.add_intersection(102, coord(36.7500, 5.0550)).unwrap();
        network.add_intersection(103, coord(36.7500, 5.0600)).unwrap();
        network.add_intersection(104, coord(36.7460, 5.0500)).unwrap();
        network.add_intersection(105, coord(36.7460, 5.0600)).unwrap();

        network.add_two_way_road(101, 102, 450.0).unwrap();
        network.add_two_way_road(102, 103, 450.0).unwrap();
        network.add_two_way_road(101, 104, 445.0).unwrap();
        network.add_two_way_road(103, 105, 445.0).unwrap();
        network.add_road(104, 105, 890.0).unwrap();
        network
    }

    #[test]
    fn test_counts() {
        let network = create_test_network();
        assert_eq!(network.intersection_count(), 5);
        assert_eq!(network.road_count(), 9);
        assert_eq!(network.graph().node_count(), 5);
    }

    #[test]
    fn test_add_intersection_rules() {
        let mut network = create_test_network();
        assert_eq!(network.add_intersection(101, coord(36.7500, 5.0500)), Ok(false));
        assert_eq!(
            network.add_intersection(101, coord(36.0, 5.0)),
            Err(GeometryError::DuplicateNode("101".to_string()))
        );

        let bad = Coordinate { lat: 120.0, lon: 0.0 };
        assert!(matches!(network.add_intersection(200, bad), Err(GeometryError::InvalidCoordinate { .. })));
        assert_eq!(network.intersection_count(), 5);
    }

    #[test]
    fn test_nearest_node() {
        let network = create_test_network();
        assert_eq!(network.nearest_node(&coord(36.7501, 5.0551)), Ok(&102));
        assert_eq!(network.nearest_node(&coord(36.7400, 5.0650)), Ok(&105));

        let empty: RoadNetwork<u64> = RoadNetwork::default();
        assert_eq!(empty.nearest_node(&coord(0.0, 0.0)), Err(GeometryError::EmptyNetwork));
    }

    #[test]
    fn test_straight_road_length() {
        let mut network = create_test_network();
        let length = network.add_straight_road(101, 105).unwrap();

        let expected = coord(36.7500, 5.0500).distance_to(&coord(36.7460, 5.0600));
        assert_eq!(length, expected);
        assert_eq!(network.weight(&101, &105).unwrap(), expected);

        assert!(matches!(network.add_straight_road(101, 999), Err(PathFinderError::UnknownNode(_))));
    }

    #[test]
    fn test_route_between_positions() {
        let network = create_test_network();

        // near 104 to near 103: 104 -> 105 -> 103 (1335) beats 104 -> 101 -> 102 -> 103 (1345)
        let route = network.route_between(&coord(36.7459, 5.0499), &coord(36.7501, 5.0601)).unwrap();
        assert_eq!(route.nodes, vec![104, 105, 103]);
        assert_eq!(route.cost, 1335.0);

        // 105 -> 104 is not allowed, the way back goes around
        let back = network.route_between(&coord(36.7460, 5.0600), &coord(36.7460, 5.0500)).unwrap();
        assert_eq!(back.nodes, vec![105, 103, 102, 101, 104]);
        assert_eq!(back.cost, 1790.0);
    }

    #[test]
    fn test_route_between_empty_network() {
        let network: RoadNetwork<u64> = RoadNetwork::new();
        let result = network.route_between(&coord(0.0, 0.0), &coord(1.0, 1.0));
        assert_eq!(result, Err(PathFinderError::Geometry(GeometryError::EmptyNetwork)));
    }

    #[test]
    fn test_polyline() {
        let network = create_test_network();
        let route = PathFinder::new(&network).find_route(&101, &103).unwrap();
        let line = network.polyline(&route.nodes).unwrap();

        assert_eq!(line, vec![
            coord(36.7500, 5.0500),
            coord(36.7500, 5.0550),
            coord(36.7500, 5.0600),
        ]);
        assert!(matches!(network.polyline(&[101, 7]), Err(PathFinderError::UnknownNode(_))));
    }
}
