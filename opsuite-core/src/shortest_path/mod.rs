//! Single-pair shortest paths.
//!
//! [`dijkstra`] handles graphs with non-negative weights; [`bellman_ford`]
//! accepts negative weights and reports reachable negative cycles. Both
//! return the same [`ShortestPath`] record and the same error kinds for
//! unknown vertices and unreachable targets.

mod bellman_ford;
mod dijkstra;

pub use self::{
    bellman_ford::{ShortestPathTree, bellman_ford, bellman_ford_tree},
    dijkstra::dijkstra,
};

use crate::{
    error::{Result, SolverError},
    graph::Graph,
};

/// A shortest path between two vertices.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShortestPath {
    source: usize,
    target: usize,
    distance: i64,
    path: Vec<usize>,
}

impl ShortestPath {
    /// Vertex the search started from.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Vertex the search was asked to reach.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Total weight of [`Self::path`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn distance(&self) -> i64 { self.distance }

    /// Vertices from source to target inclusive.
    #[must_use]
    #[rustfmt::skip]
    pub fn path(&self) -> &[usize] { &self.path }

    /// Number of edges on the path.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

fn validate_endpoints(graph: &Graph, source: usize, target: usize) -> Result<()> {
    graph.check_vertex(source)?;
    graph.check_vertex(target)
}

/// Walks predecessor links back from `target`. Returns `None` when the chain
/// does not reach `source` within `predecessors.len()` steps.
fn reconstruct_path(
    predecessors: &[Option<usize>],
    source: usize,
    target: usize,
) -> Option<Vec<usize>> {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        if path.len() > predecessors.len() {
            return None;
        }
        current = (*predecessors.get(current)?)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

fn unreachable(source: usize, target: usize) -> SolverError {
    SolverError::Unreachable {
        from: source,
        to: target,
    }
}
