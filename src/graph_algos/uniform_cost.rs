use crate::errors::{PathFinderError, node_label};
use crate::collections::{FxIndexMap, FxHashSet};
use crate::graph::{Graph, check_weight};
use crate::queue::MinPriorityQueue;
use super::{GraphNodeMap, SearchOptions, SearchProgress, shortest_path};
use super::shortest_path::NO_PARENT;

use std::{ops::ControlFlow, time::Instant};
use indexmap::map::Entry::{Occupied, Vacant};
use log::{debug, trace, warn};
use ordered_float::OrderedFloat;


/// Path found by a search together with its total cost
#[derive(Debug, Clone, PartialEq)]
pub struct Route<N> {
    /// Nodes from source to target, both included
    pub nodes: Vec<N>,
    /// Sum of edge weights along the path
    pub cost: f64,
}

impl<N> Route<N> {

    pub fn source(&self) -> Option<&N> {
        self.nodes.first()
    }

    pub fn target(&self) -> Option<&N> {
        self.nodes.last()
    }

    /// Number of edges traversed
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}


/// Find the least-cost path from `source` to `target`
/// Shorthand for `PathFinder::new(graph).find_path(source, target)`
pub fn find_path<G: Graph>(graph: &G, source: &G::Node, target: &G::Node) -> Result<Vec<G::Node>, PathFinderError> {
    PathFinder::new(graph).find_path(source, target)
}


/// Uniform-cost search (Dijkstra's algorithm) over a borrowed graph
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// Every call owns its own frontier and tables, so one graph can serve any
/// number of finders on different threads. Stale frontier entries are not
/// removed when a cheaper one is queued; they are skipped once their node
/// has been finalized.
#[derive(Debug)]
pub struct PathFinder<'g, G> {
    graph: &'g G,
    options: SearchOptions,
}

/// Result of exploring the graph from one source
struct Exploration<N> {
    node_map: GraphNodeMap<N, OrderedFloat<f64>>,
    goal_index: Option<usize>,
    expanded: usize,
    discarded: usize,
}

impl<'g, G: Graph> PathFinder<'g, G> {

    pub fn new(graph: &'g G) -> Self {
        Self::with_options(graph, SearchOptions::default())
    }

    pub fn with_options(graph: &'g G, options: SearchOptions) -> Self {
        Self { graph, options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Ordered nodes of the least-cost path, source and target included
    pub fn find_path(&self, source: &G::Node, target: &G::Node) -> Result<Vec<G::Node>, PathFinderError> {
        self.find_route(source, target).map(|route| route.nodes)
    }

    /// Least-cost path along with its total cost
    pub fn find_route(&self, source: &G::Node, target: &G::Node) -> Result<Route<G::Node>, PathFinderError> {
        self.find_route_with_checkpoint(source, target, |_| ControlFlow::Continue(()))
    }

    /// Like find_route, polling `checkpoint` before every frontier extraction
    /// Breaking out of the checkpoint aborts the search with `Cancelled`
    pub fn find_route_with_checkpoint<F>(&self, source: &G::Node, target: &G::Node, mut checkpoint: F) -> Result<Route<G::Node>, PathFinderError>
    where
        F: FnMut(&SearchProgress) -> ControlFlow<()>,
    {
        // input validation happens before any search state exists
        for node in [source, target] {
            if !self.graph.contains_node(node) {
                return Err(PathFinderError::UnknownNode(node_label(node)));
            }
        }
        debug!("searching path {source:?} -> {target:?}");

        let exploration = self.explore(source, Some(target), &mut checkpoint)?;

        let route = exploration.goal_index
            .and_then(|goal_index| {
                let nodes = shortest_path(&exploration.node_map, goal_index)?;
                let (_, &(_, cost)) = exploration.node_map.get_index(goal_index)?;
                Some(Route { nodes, cost: cost.into_inner() })
            });

        match route {
            Some(route) => {
                debug!(
                    "found path {source:?} -> {target:?}: {} hops, cost {}, {} nodes finalized, {} stale entries skipped",
                    route.hops(), route.cost, exploration.expanded, exploration.discarded
                );
                Ok(route)
            }
            None => {
                debug!("{target:?} unreachable from {source:?} after finalizing {} nodes", exploration.expanded);
                Err(PathFinderError::UnreachableTarget {
                    start: node_label(source),
                    target: node_label(target),
                })
            }
        }
    }

    /// Minimum cost to every node reachable from `source`
    /// Explores the whole reachable graph, find_path never needs this
    pub fn costs_from(&self, source: &G::Node) -> Result<FxIndexMap<G::Node, f64>, PathFinderError> {
        if !self.graph.contains_node(source) {
            return Err(PathFinderError::UnknownNode(node_label(source)));
        }

        let exploration = self.explore(source, None, &mut |_| ControlFlow::Continue(()))?;
        debug!("costs from {source:?}: {} nodes reached", exploration.expanded);

        // the frontier was drained, so every recorded cost is final
        Ok(exploration.node_map
            .into_iter()
            .map(|(node, (_, cost))| (node, cost.into_inner()))
            .collect())
    }


    /// Traverses the graph from `source` in order of cumulative cost
    /// Stops when `target` is finalized, or when the frontier runs dry
    fn explore<F>(&self, source: &G::Node, target: Option<&G::Node>, checkpoint: &mut F) -> Result<Exploration<G::Node>, PathFinderError>
    where
        F: FnMut(&SearchProgress) -> ControlFlow<()>,
    {
        let started = Instant::now();

        // Frontier entries carry the node's index in node_map alongside the node
        let mut frontier: MinPriorityQueue<OrderedFloat<f64>, (usize, G::Node)> = MinPriorityQueue::new();

        // path-cost and predecessor tables
        // for the start node, parent_index is NO_PARENT
        let mut node_map: GraphNodeMap<G::Node, OrderedFloat<f64>> = FxIndexMap::default();

        // indices of finalized nodes
        let mut explored: FxHashSet<usize> = FxHashSet::default();

        let start_index = node_map.insert_full(source.clone(), (NO_PARENT, OrderedFloat(0.0))).0;
        frontier.insert(OrderedFloat(0.0), (start_index, source.clone()));

        let mut expanded = 0;
        let mut discarded = 0;

        while !frontier.is_empty() {

            // cancellation point
            let progress = SearchProgress {
                expanded,
                frontier_len: frontier.len(),
                next_cost: frontier.peek_priority().map_or(0.0, |cost| cost.into_inner()),
            };
            self.check_budget(&progress, started)?;
            if checkpoint(&progress).is_break() {
                debug!("search from {source:?} cancelled after finalizing {expanded} nodes");
                return Err(PathFinderError::Cancelled { expanded });
            }

            let (OrderedFloat(cost), (index, current)) = frontier.extract_min()?;

            // A cheaper entry for this node was already extracted
            if !explored.insert(index) {
                trace!("skipping stale entry {current:?} at cost {cost}");
                discarded += 1;
                continue;
            }
            expanded += 1;
            trace!("finalized {current:?} at cost {cost}");

            if target == Some(&current) {
                return Ok(Exploration { node_map, goal_index: Some(index), expanded, discarded });
            }

            for neighbor in self.graph.neighbors(&current)? {

                let edge_cost = check_weight(&current, neighbor, self.graph.weight(&current, neighbor)?)?;
                let new_cost = OrderedFloat(cost + edge_cost);

                let neighbor_index = match node_map.entry(neighbor.clone()) {
                    Vacant(e) => {
                        // first time we're seeing this neighbor
                        let neighbor_index = e.index();
                        e.insert((index, new_cost));
                        neighbor_index
                    }
                    Occupied(mut e) => {
                        if new_cost < e.get().1 {
                            // found a strictly cheaper path, the old entry goes stale
                            e.insert((index, new_cost));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };

                frontier.insert(new_cost, (neighbor_index, neighbor.clone()));
            }
        }

        Ok(Exploration { node_map, goal_index: None, expanded, discarded })
    }

    fn check_budget(&self, progress: &SearchProgress, started: Instant) -> Result<(), PathFinderError> {
        if let Some(limit) = self.options.max_expansions {
            if progress.expanded >= limit {
                warn!("search stopped at expansion limit {limit}");
                return Err(PathFinderError::ExpansionLimit(limit));
            }
        }
        if let Some(timeout) = self.options.timeout {
            if started.elapsed() >= timeout {
                warn!("search stopped after {timeout:?} with {} nodes finalized", progress.expanded);
                return Err(PathFinderError::Timeout(timeout));
            }
        }
        Ok(())
    }
}
