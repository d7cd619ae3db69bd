//! Labelled weighted graphs shared by the path, tree, colouring and flow
//! engines.
//!
//! Vertices are dense indices `0..vertex_count` with a unique label attached
//! to each. Edges keep their insertion order, which the engines rely on for
//! deterministic tie-breaking.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, SolverError};

/// Whether edges are one-way arcs or symmetric links.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphKind {
    /// Edges run from `from` to `to` only.
    Directed,
    /// Edges may be traversed in both directions.
    Undirected,
}

/// A weighted edge between two vertex indices.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    from: usize,
    to: usize,
    weight: i64,
}

impl Edge {
    /// Creates an edge without validating it against a graph.
    #[must_use]
    pub const fn new(from: usize, to: usize, weight: i64) -> Self {
        Self { from, to, weight }
    }

    /// Tail vertex (or first endpoint for undirected graphs).
    #[must_use]
    #[rustfmt::skip]
    pub const fn from(&self) -> usize { self.from }

    /// Head vertex (or second endpoint for undirected graphs).
    #[must_use]
    #[rustfmt::skip]
    pub const fn to(&self) -> usize { self.to }

    /// Edge weight, cost or capacity.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> i64 { self.weight }

    /// The same edge traversed in the opposite direction.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            weight: self.weight,
        }
    }
}

/// A graph with labelled vertices and weighted edges.
///
/// # Examples
/// ```
/// use opsuite_core::{Graph, GraphKind};
///
/// let graph = Graph::from_labeled_edges(GraphKind::Undirected, &[("A", "B", 4), ("B", "C", 1)])?;
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.vertex("C")?, 2);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    kind: GraphKind,
    labels: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Creates a graph with the given vertex labels and no edges.
    ///
    /// # Errors
    /// Returns [`SolverError::DuplicateVertex`] when a label repeats.
    pub fn with_vertices<I, S>(kind: GraphKind, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::new(kind);
        for label in labels {
            graph.add_vertex(label)?;
        }
        Ok(graph)
    }

    /// Builds a graph from `(from, to, weight)` triples, registering labels in
    /// first-appearance order.
    ///
    /// # Errors
    /// Returns [`SolverError::SelfLoop`] when an edge joins a label to itself.
    pub fn from_labeled_edges(kind: GraphKind, edges: &[(&str, &str, i64)]) -> Result<Self> {
        let mut graph = Self::new(kind);
        for &(from, to, weight) in edges {
            let from = graph.ensure_vertex(from);
            let to = graph.ensure_vertex(to);
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    fn ensure_vertex(&mut self, label: &str) -> usize {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(label.to_owned());
        self.index.insert(label.to_owned(), id);
        id
    }

    /// Registers a new vertex and returns its index.
    ///
    /// # Errors
    /// Returns [`SolverError::DuplicateVertex`] when the label is taken.
    pub fn add_vertex(&mut self, label: impl Into<String>) -> Result<usize> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(SolverError::DuplicateVertex { label });
        }
        Ok(self.ensure_vertex(&label))
    }

    /// Adds an edge between two existing vertices.
    ///
    /// # Errors
    /// Returns [`SolverError::VertexOutOfRange`] for unknown indices and
    /// [`SolverError::SelfLoop`] when `from == to`.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: i64) -> Result<()> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if from == to {
            return Err(SolverError::SelfLoop { vertex: from });
        }
        self.edges.push(Edge::new(from, to, weight));
        Ok(())
    }

    /// Validates a vertex index.
    ///
    /// # Errors
    /// Returns [`SolverError::VertexOutOfRange`] when `id` is not a vertex.
    pub fn check_vertex(&self, id: usize) -> Result<()> {
        if id < self.labels.len() {
            Ok(())
        } else {
            Err(SolverError::VertexOutOfRange {
                index: id,
                vertex_count: self.labels.len(),
            })
        }
    }

    /// Resolves a label to its vertex index.
    ///
    /// # Errors
    /// Returns [`SolverError::UnknownVertex`] when the label is not present.
    pub fn vertex(&self, label: &str) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| SolverError::UnknownVertex {
                label: label.to_owned(),
            })
    }

    /// Directed or undirected.
    #[must_use]
    #[rustfmt::skip]
    pub const fn kind(&self) -> GraphKind { self.kind }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in insertion order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// All vertex labels, indexed by vertex id.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[String] { &self.labels }

    /// Label of vertex `id`.
    #[must_use]
    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Traversable arcs: each stored edge, plus its reverse when undirected.
    pub fn arcs(&self) -> impl Iterator<Item = Edge> + '_ {
        let undirected = self.kind == GraphKind::Undirected;
        self.edges.iter().flat_map(move |edge| {
            let reverse = undirected.then(|| edge.reversed());
            std::iter::once(*edge).chain(reverse)
        })
    }

    /// Outgoing `(neighbour, weight)` lists per vertex, following [`Self::arcs`].
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<(usize, i64)>> {
        let mut adjacency = vec![Vec::new(); self.vertex_count()];
        for arc in self.arcs() {
            if let Some(list) = adjacency.get_mut(arc.from) {
                list.push((arc.to, arc.weight));
            }
        }
        adjacency
    }

    /// Distinct neighbours per vertex, ignoring direction and parallel edges.
    #[must_use]
    pub fn neighbour_sets(&self) -> Vec<BTreeSet<usize>> {
        let mut sets = vec![BTreeSet::new(); self.vertex_count()];
        for edge in &self.edges {
            if let Some(set) = sets.get_mut(edge.from) {
                set.insert(edge.to);
            }
            if let Some(set) = sets.get_mut(edge.to) {
                set.insert(edge.from);
            }
        }
        sets
    }

    /// Maps a vertex path to its labels, skipping unknown ids.
    #[must_use]
    pub fn path_labels(&self, path: &[usize]) -> Vec<&str> {
        path.iter().filter_map(|&id| self.label(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_labels() {
        let err = Graph::with_vertices(GraphKind::Directed, ["x0", "x0"]).expect_err("duplicate");
        assert_eq!(
            err,
            SolverError::DuplicateVertex {
                label: "x0".to_owned()
            }
        );
    }

    #[test]
    fn rejects_self_loops_and_unknown_indices() {
        let mut graph = Graph::with_vertices(GraphKind::Directed, ["a", "b"]).expect("labels");
        assert_eq!(
            graph.add_edge(1, 1, 3),
            Err(SolverError::SelfLoop { vertex: 1 })
        );
        assert_eq!(
            graph.add_edge(0, 2, 3),
            Err(SolverError::VertexOutOfRange {
                index: 2,
                vertex_count: 2
            })
        );
    }

    #[test]
    fn undirected_arcs_run_both_ways() {
        let graph =
            Graph::from_labeled_edges(GraphKind::Undirected, &[("a", "b", 5)]).expect("graph");
        let arcs: Vec<_> = graph.arcs().collect();
        assert_eq!(arcs, vec![Edge::new(0, 1, 5), Edge::new(1, 0, 5)]);
        assert_eq!(graph.adjacency(), vec![vec![(1, 5)], vec![(0, 5)]]);
    }

    #[test]
    fn neighbour_sets_collapse_parallel_edges() {
        let graph = Graph::from_labeled_edges(
            GraphKind::Directed,
            &[("a", "b", 1), ("b", "a", 2), ("a", "b", 3)],
        )
        .expect("graph");
        let sets = graph.neighbour_sets();
        assert_eq!(sets[0].len(), 1);
        assert_eq!(sets[1].len(), 1);
    }

    #[test]
    fn unknown_label_is_reported() {
        let graph = Graph::new(GraphKind::Undirected);
        assert_eq!(
            graph.vertex("x9"),
            Err(SolverError::UnknownVertex {
                label: "x9".to_owned()
            })
        );
    }
}
