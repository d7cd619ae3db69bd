//! Minimum spanning forest construction with Kruskal's algorithm.
//!
//! Edges are sorted by weight with a stable sort, so ties keep the order in
//! which they were added to the [`Graph`]. Direction is ignored. A
//! disconnected graph yields a spanning forest with one tree per component.

mod union_find;

use tracing::{debug, instrument};

use crate::{
    error::{Result, SolverError},
    graph::{Edge, Graph},
};

pub use self::union_find::DisjointSet;

/// The output of a minimum spanning forest computation.
///
/// When the input graph is connected, the forest is a minimum spanning tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanningForest {
    edges: Vec<Edge>,
    total_weight: i64,
    component_count: usize,
}

impl SpanningForest {
    /// Accepted edges in acceptance order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Sum of the accepted edge weights.
    #[must_use]
    #[rustfmt::skip]
    pub const fn total_weight(&self) -> i64 { self.total_weight }

    /// Number of trees in the forest.
    #[must_use]
    #[rustfmt::skip]
    pub const fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub const fn is_tree(&self) -> bool {
        self.component_count == 1
    }
}

/// Computes a minimum spanning forest.
///
/// # Errors
/// Returns [`SolverError::EmptyInstance`] when the graph has no vertices.
///
/// # Examples
/// ```
/// use opsuite_core::{Graph, GraphKind, mst::kruskal};
///
/// let graph = Graph::from_labeled_edges(
///     GraphKind::Undirected,
///     &[("A", "B", 1), ("B", "C", 2), ("A", "C", 3)],
/// )?;
/// let forest = kruskal(&graph)?;
/// assert_eq!(forest.total_weight(), 3);
/// assert!(forest.is_tree());
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[instrument(
    name = "mst.kruskal",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn kruskal(graph: &Graph) -> Result<SpanningForest> {
    let vertex_count = graph.vertex_count();
    if vertex_count == 0 {
        return Err(SolverError::EmptyInstance { what: "graph" });
    }

    let mut sorted: Vec<Edge> = graph.edges().to_vec();
    sorted.sort_by_key(Edge::weight);

    let mut sets = DisjointSet::new(vertex_count);
    let mut accepted = Vec::with_capacity(vertex_count - 1);
    let mut total_weight = 0_i64;

    for edge in sorted {
        if sets.union(edge.from(), edge.to()) {
            total_weight = total_weight.saturating_add(edge.weight());
            accepted.push(edge);
            if sets.components() == 1 {
                break;
            }
        }
    }

    debug!(
        accepted = accepted.len(),
        total_weight,
        components = sets.components(),
        "kruskal finished"
    );
    Ok(SpanningForest {
        edges: accepted,
        total_weight,
        component_count: sets.components(),
    })
}
