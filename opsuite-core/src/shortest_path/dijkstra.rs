//! Dijkstra's algorithm with a binary-heap frontier.

use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::{debug, instrument};

use crate::{
    error::{Result, SolverError},
    graph::Graph,
};

use super::{ShortestPath, reconstruct_path, unreachable, validate_endpoints};

/// Computes the shortest `source → target` path in a graph whose weights are
/// all non-negative.
///
/// The frontier is ordered by `(distance, vertex)`, so among equally distant
/// vertices the lower index is settled first. The search stops as soon as the
/// target is settled.
///
/// # Errors
/// - [`SolverError::VertexOutOfRange`] when either endpoint is not a vertex.
/// - [`SolverError::NegativeWeight`] when any edge weight is negative.
/// - [`SolverError::Unreachable`] when no path exists.
///
/// # Examples
/// ```
/// use opsuite_core::{Graph, GraphKind, shortest_path::dijkstra};
///
/// let graph = Graph::from_labeled_edges(
///     GraphKind::Undirected,
///     &[("x0", "x1", 7), ("x0", "x2", 2), ("x2", "x1", 3)],
/// )?;
/// let result = dijkstra(&graph, graph.vertex("x0")?, graph.vertex("x1")?)?;
/// assert_eq!(result.distance(), 5);
/// assert_eq!(graph.path_labels(result.path()), ["x0", "x2", "x1"]);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[instrument(
    name = "shortest_path.dijkstra",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn dijkstra(graph: &Graph, source: usize, target: usize) -> Result<ShortestPath> {
    validate_endpoints(graph, source, target)?;
    if let Some(edge) = graph.edges().iter().find(|edge| edge.weight() < 0) {
        return Err(SolverError::NegativeWeight {
            from: edge.from(),
            to: edge.to(),
            weight: edge.weight(),
        });
    }

    let adjacency = graph.adjacency();
    let vertex_count = graph.vertex_count();
    let mut distances: Vec<Option<i64>> = vec![None; vertex_count];
    let mut predecessors: Vec<Option<usize>> = vec![None; vertex_count];
    let mut settled = vec![false; vertex_count];
    let mut frontier = BinaryHeap::new();

    distances[source] = Some(0);
    frontier.push(Reverse((0_i64, source)));

    while let Some(Reverse((distance, vertex))) = frontier.pop() {
        if settled[vertex] {
            continue;
        }
        settled[vertex] = true;
        if vertex == target {
            break;
        }
        for &(next, weight) in &adjacency[vertex] {
            if settled[next] {
                continue;
            }
            let candidate = distance.saturating_add(weight);
            if distances[next].is_none_or(|current| candidate < current) {
                distances[next] = Some(candidate);
                predecessors[next] = Some(vertex);
                frontier.push(Reverse((candidate, next)));
            }
        }
    }

    let distance = distances[target]
        .filter(|_| settled[target])
        .ok_or_else(|| unreachable(source, target))?;
    let path = reconstruct_path(&predecessors, source, target)
        .ok_or_else(|| unreachable(source, target))?;
    debug!(distance, hops = path.len().saturating_sub(1), "dijkstra settled target");

    Ok(ShortestPath {
        source,
        target,
        distance,
        path,
    })
}
