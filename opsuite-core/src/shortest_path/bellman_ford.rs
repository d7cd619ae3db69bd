//! Bellman-Ford relaxation with negative-cycle detection.

use tracing::{debug, instrument, warn};

use crate::{
    error::{Result, SolverError},
    graph::{Edge, Graph},
};

use super::{ShortestPath, reconstruct_path, unreachable, validate_endpoints};

/// Distances and predecessor links from one source to every vertex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShortestPathTree {
    source: usize,
    distances: Vec<Option<i64>>,
    predecessors: Vec<Option<usize>>,
    rounds: usize,
}

impl ShortestPathTree {
    /// Vertex the tree is rooted at.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Distance to `vertex`, or `None` when it is unreachable.
    #[must_use]
    pub fn distance(&self, vertex: usize) -> Option<i64> {
        self.distances.get(vertex).copied().flatten()
    }

    /// Distances indexed by vertex; `None` marks unreachable vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn distances(&self) -> &[Option<i64>] { &self.distances }

    /// Relaxation rounds performed before the distances settled.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rounds(&self) -> usize { self.rounds }

    /// Path from the source to `vertex`, or `None` when unreachable.
    #[must_use]
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        self.distance(vertex)?;
        reconstruct_path(&self.predecessors, self.source, vertex)
    }

    /// Shortest path from the source to `target` read off the tree.
    ///
    /// # Errors
    /// Returns [`SolverError::Unreachable`] when `target` has no distance.
    pub fn route_to(&self, target: usize) -> Result<ShortestPath> {
        let unreached = || unreachable(self.source, target);
        Ok(ShortestPath {
            source: self.source,
            target,
            distance: self.distance(target).ok_or_else(unreached)?,
            path: self.path_to(target).ok_or_else(unreached)?,
        })
    }
}

/// Runs Bellman-Ford from `source` and returns the full distance table.
///
/// At most `|V| - 1` rounds relax every arc; a round without improvement
/// ends the loop early. A final pass that can still improve a distance means
/// a negative cycle is reachable from `source`.
///
/// # Errors
/// - [`SolverError::VertexOutOfRange`] when `source` is not a vertex.
/// - [`SolverError::NegativeCycle`] when a reachable negative cycle exists.
#[instrument(
    name = "shortest_path.bellman_ford",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn bellman_ford_tree(graph: &Graph, source: usize) -> Result<ShortestPathTree> {
    graph.check_vertex(source)?;
    let vertex_count = graph.vertex_count();
    let arcs: Vec<Edge> = graph.arcs().collect();
    let mut distances: Vec<Option<i64>> = vec![None; vertex_count];
    let mut predecessors: Vec<Option<usize>> = vec![None; vertex_count];
    distances[source] = Some(0);

    let mut rounds = 0;
    for _ in 1..vertex_count {
        rounds += 1;
        let mut changed = false;
        for arc in &arcs {
            if let Some(candidate) = relaxed(&distances, arc) {
                distances[arc.to()] = Some(candidate);
                predecessors[arc.to()] = Some(arc.from());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    if let Some(arc) = arcs.iter().find(|arc| relaxed(&distances, arc).is_some()) {
        warn!(vertex = arc.to(), rounds, "negative cycle detected");
        return Err(SolverError::NegativeCycle { vertex: arc.to() });
    }

    debug!(rounds, "bellman-ford converged");
    Ok(ShortestPathTree {
        source,
        distances,
        predecessors,
        rounds,
    })
}

/// The improved distance for `arc.to()` if relaxing `arc` helps.
fn relaxed(distances: &[Option<i64>], arc: &Edge) -> Option<i64> {
    let base = distances[arc.from()]?;
    let candidate = base.saturating_add(arc.weight());
    distances[arc.to()]
        .is_none_or(|current| candidate < current)
        .then_some(candidate)
}

/// Computes the shortest `source → target` path, allowing negative weights.
///
/// # Errors
/// - [`SolverError::VertexOutOfRange`] when either endpoint is not a vertex.
/// - [`SolverError::NegativeCycle`] when a reachable negative cycle exists.
/// - [`SolverError::Unreachable`] when no path exists.
///
/// # Examples
/// ```
/// use opsuite_core::{ErrorKind, Graph, GraphKind, shortest_path::bellman_ford};
///
/// let graph = Graph::from_labeled_edges(GraphKind::Directed, &[("u", "v", -1), ("v", "u", -1)])?;
/// let err = bellman_ford(&graph, 0, 1).expect_err("cycle must be reported");
/// assert_eq!(err.kind(), ErrorKind::NegativeCycle);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
pub fn bellman_ford(graph: &Graph, source: usize, target: usize) -> Result<ShortestPath> {
    validate_endpoints(graph, source, target)?;
    bellman_ford_tree(graph, source)?.route_to(target)
}
