use crate::errors::{PathFinderError, node_label};
use crate::collections::FxIndexMap;
use super::{Graph, check_weight};

use std::{hash::Hash, fmt::Debug};
use indexmap::map::{Entry::{Occupied, Vacant}, Keys};


/// Directed multigraph held in memory
/// - adjacency is keyed by source node, then by target node
/// - each target keeps every parallel edge weight in insertion order
/// - maps preserve insertion order, so neighbor enumeration is deterministic
#[derive(Debug, Clone)]
pub struct MultiDiGraph<N> {
    adjacency: FxIndexMap<N, FxIndexMap<N, Vec<f64>>>,
    edge_count: usize,
}

impl<N> MultiDiGraph<N>
where
    N: Eq + Hash + Clone + Debug,
{

    pub fn new() -> Self {
        Self {
            adjacency: FxIndexMap::default(),
            edge_count: 0,
        }
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            adjacency: FxIndexMap::with_capacity_and_hasher(nodes, Default::default()),
            edge_count: 0,
        }
    }

    /// Build a graph from (from, to, weight) triples
    /// Endpoints are added as they are seen
    pub fn from_edges<I>(edges: I) -> Result<Self, PathFinderError>
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.add_node(from.clone());
            graph.add_node(to.clone());
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Returns true if the node was not already present
    pub fn add_node(&mut self, node: N) -> bool {
        match self.adjacency.entry(node) {
            Vacant(e) => {
                e.insert(FxIndexMap::default());
                true
            }
            Occupied(_) => false,
        }
    }

    /// Add a directed edge between two existing nodes
    /// An edge already present between the pair gets a parallel sibling
    pub fn add_edge(&mut self, from: N, to: N, weight: f64) -> Result<(), PathFinderError> {
        if !self.adjacency.contains_key(&to) {
            return Err(PathFinderError::UnknownNode(node_label(&to)));
        }
        check_weight(&from, &to, weight)?;

        let outgoing = self.adjacency.get_mut(&from)
            .ok_or_else(|| PathFinderError::UnknownNode(node_label(&from)))?;
        outgoing.entry(to).or_default().push(weight);
        self.edge_count += 1;
        Ok(())
    }

    /// Add the edge in both directions with the same weight
    pub fn add_two_way_edge(&mut self, a: N, b: N, weight: f64) -> Result<(), PathFinderError> {
        // validate up front so a failure leaves the graph untouched
        for node in [&a, &b] {
            if !self.adjacency.contains_key(node) {
                return Err(PathFinderError::UnknownNode(node_label(node)));
            }
        }
        check_weight(&a, &b, weight)?;

        self.add_edge(a.clone(), b.clone(), weight)?;
        self.add_edge(b, a, weight)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Parallel edges are counted individually
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    /// Every weight recorded between the pair, in insertion order
    pub fn parallel_weights(&self, from: &N, to: &N) -> Option<&[f64]> {
        self.adjacency.get(from)?
            .get(to)
            .map(Vec::as_slice)
    }
}

impl<N> Default for MultiDiGraph<N>
where
    N: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}


impl<N> Graph for MultiDiGraph<N>
where
    N: Eq + Hash + Clone + Debug,
{
    type Node = N;
    type Neighbors<'a> = Keys<'a, N, Vec<f64>> where Self: 'a;

    fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    fn neighbors(&self, node: &N) -> Result<Self::Neighbors<'_>, PathFinderError> {
        self.adjacency.get(node)
            .map(|outgoing| outgoing.keys())
            .ok_or_else(|| PathFinderError::UnknownNode(node_label(node)))
    }

    fn weight(&self, from: &N, to: &N) -> Result<f64, PathFinderError> {
        let outgoing = self.adjacency.get(from)
            .ok_or_else(|| PathFinderError::UnknownNode(node_label(from)))?;

        // minimum over parallel edges keeps the search optimal
        outgoing.get(to)
            .and_then(|weights| weights.iter().copied().reduce(f64::min))
            .ok_or_else(|| PathFinderError::NoSuchEdge {
                from: node_label(from),
                to: node_label(to),
            })
    }
}
