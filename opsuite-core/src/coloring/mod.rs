//! Welsh-Powell greedy vertex colouring.
//!
//! The colour count is an upper bound on the chromatic number, not the exact
//! value: greedy colouring never uses more than `max_degree + 1` colours but
//! may use more than the optimum.

use tracing::{debug, instrument};

use crate::graph::Graph;

/// A proper colouring of a graph's vertices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coloring {
    colors: Vec<usize>,
    color_count: usize,
    order: Vec<usize>,
}

impl Coloring {
    /// Colour index per vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn colors(&self) -> &[usize] { &self.colors }

    /// Colour of `vertex`, if it exists.
    #[must_use]
    pub fn color(&self, vertex: usize) -> Option<usize> {
        self.colors.get(vertex).copied()
    }

    /// `1 + max colour index`, or `0` for an empty graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn color_count(&self) -> usize { self.color_count }

    /// Vertices in the order they were coloured.
    #[must_use]
    #[rustfmt::skip]
    pub fn order(&self) -> &[usize] { &self.order }

    /// Vertices grouped by colour, each class in ascending vertex order.
    #[must_use]
    pub fn classes(&self) -> Vec<Vec<usize>> {
        let mut classes = vec![Vec::new(); self.color_count];
        for (vertex, &color) in self.colors.iter().enumerate() {
            if let Some(class) = classes.get_mut(color) {
                class.push(vertex);
            }
        }
        classes
    }
}

/// Colours `graph` with the Welsh-Powell heuristic.
///
/// Vertices are visited by descending degree, ties broken by ascending
/// vertex index. Each receives the lowest colour not already used by a
/// coloured neighbour. Degrees count distinct neighbours, ignoring edge
/// direction and parallel edges.
///
/// # Examples
/// ```
/// use opsuite_core::{Graph, GraphKind, coloring::welsh_powell};
///
/// let triangle = Graph::from_labeled_edges(
///     GraphKind::Undirected,
///     &[("a", "b", 1), ("b", "c", 1), ("c", "a", 1)],
/// )?;
/// assert_eq!(welsh_powell(&triangle).color_count(), 3);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[must_use]
#[instrument(
    name = "coloring.welsh_powell",
    skip(graph),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn welsh_powell(graph: &Graph) -> Coloring {
    let neighbours = graph.neighbour_sets();
    let mut order: Vec<usize> = (0..graph.vertex_count()).collect();
    order.sort_by(|&left, &right| {
        neighbours[right]
            .len()
            .cmp(&neighbours[left].len())
            .then(left.cmp(&right))
    });

    let mut assigned: Vec<Option<usize>> = vec![None; graph.vertex_count()];
    for &vertex in &order {
        let mut taken: Vec<usize> = neighbours[vertex]
            .iter()
            .filter_map(|&neighbour| assigned[neighbour])
            .collect();
        taken.sort_unstable();
        taken.dedup();
        let color = taken
            .iter()
            .enumerate()
            .find(|&(candidate, &used)| candidate != used)
            .map_or(taken.len(), |(candidate, _)| candidate);
        assigned[vertex] = Some(color);
    }

    let colors: Vec<usize> = assigned.into_iter().map(|color| color.unwrap_or(0)).collect();
    let color_count = colors.iter().max().map_or(0, |max| max + 1);
    debug!(color_count, "welsh-powell finished");
    Coloring {
        colors,
        color_count,
        order,
    }
}

#[cfg(test)]
mod tests;
