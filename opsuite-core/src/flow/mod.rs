//! Maximum flow and minimum cut with the Edmonds-Karp variant of
//! Ford-Fulkerson.
//!
//! Capacities live in a dense [`Matrix`]; parallel arcs between the same
//! ordered pair are merged by summing their capacities. Flow is tracked as a
//! skew-symmetric [`FlowMatrix`], so the residual capacity of `(u, v)` is
//! always `capacity(u, v) - flow(u, v)`.

use std::collections::VecDeque;

use tracing::{debug, instrument, trace};

use crate::{
    error::{Result, SolverError},
    graph::Graph,
    matrix::Matrix,
};

/// A directed network of non-negative capacities.
///
/// # Examples
/// ```
/// use opsuite_core::flow::FlowNetwork;
///
/// let mut network = FlowNetwork::new(3);
/// network.add_arc(0, 1, 4)?;
/// network.add_arc(0, 1, 1)?;
/// assert_eq!(network.capacity(0, 1), 5);
/// assert_eq!(network.label(2), Some("x2"));
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowNetwork {
    labels: Vec<String>,
    capacity: Matrix<i64>,
}

impl FlowNetwork {
    /// Creates a network of `vertex_count` vertices labelled `x0, x1, ...`
    /// with no arcs.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            labels: (0..vertex_count).map(|id| format!("x{id}")).collect(),
            capacity: Matrix::filled(vertex_count, vertex_count, 0),
        }
    }

    /// Builds a network from a graph, reading edge weights as capacities.
    /// Undirected edges contribute an arc in each direction.
    ///
    /// # Errors
    /// Returns [`SolverError::NegativeCapacity`] for negative weights.
    pub fn from_graph(graph: &Graph) -> Result<Self> {
        let mut network = Self {
            labels: graph.labels().to_vec(),
            capacity: Matrix::filled(graph.vertex_count(), graph.vertex_count(), 0),
        };
        for arc in graph.arcs() {
            network.add_arc(arc.from(), arc.to(), arc.weight())?;
        }
        Ok(network)
    }

    /// Adds `capacity` to the arc `from → to`.
    ///
    /// # Errors
    /// - [`SolverError::VertexOutOfRange`] for unknown indices.
    /// - [`SolverError::SelfLoop`] when `from == to`.
    /// - [`SolverError::NegativeCapacity`] when `capacity < 0`.
    pub fn add_arc(&mut self, from: usize, to: usize, capacity: i64) -> Result<()> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if from == to {
            return Err(SolverError::SelfLoop { vertex: from });
        }
        if capacity < 0 {
            return Err(SolverError::NegativeCapacity { from, to, capacity });
        }
        let cell = self
            .capacity
            .get_mut(from, to)
            .ok_or(SolverError::VertexOutOfRange {
                index: from.max(to),
                vertex_count: self.labels.len(),
            })?;
        *cell = cell.saturating_add(capacity);
        Ok(())
    }

    fn check_vertex(&self, id: usize) -> Result<()> {
        if id < self.labels.len() {
            Ok(())
        } else {
            Err(SolverError::VertexOutOfRange {
                index: id,
                vertex_count: self.labels.len(),
            })
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Capacity of `from → to`, or 0 when there is no such arc.
    #[must_use]
    pub fn capacity(&self, from: usize, to: usize) -> i64 {
        self.capacity.get(from, to).copied().unwrap_or(0)
    }

    /// The full capacity table.
    #[must_use]
    #[rustfmt::skip]
    pub const fn capacities(&self) -> &Matrix<i64> { &self.capacity }

    /// Label of vertex `id`.
    #[must_use]
    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// All vertex labels.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &[String] { &self.labels }

    /// Arcs with positive capacity in row-major order.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.capacity
            .iter_cells()
            .filter(|(_, _, capacity)| **capacity > 0)
            .map(|(from, to, capacity)| (from, to, *capacity))
    }
}

/// Net flow between every ordered pair of vertices.
///
/// Every update goes through [`FlowMatrix::push`], which keeps
/// `flow(u, v) == -flow(v, u)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowMatrix {
    flow: Matrix<i64>,
}

impl FlowMatrix {
    fn zeros(vertex_count: usize) -> Self {
        Self {
            flow: Matrix::filled(vertex_count, vertex_count, 0),
        }
    }

    fn push(&mut self, from: usize, to: usize, amount: i64) {
        if let Some(forward) = self.flow.get_mut(from, to) {
            *forward += amount;
        }
        if let Some(backward) = self.flow.get_mut(to, from) {
            *backward -= amount;
        }
    }

    /// Signed net flow from `from` to `to`.
    #[must_use]
    pub fn net(&self, from: usize, to: usize) -> i64 {
        self.flow.get(from, to).copied().unwrap_or(0)
    }

    /// Units travelling along `from → to`, ignoring the reverse direction.
    #[must_use]
    pub fn on_arc(&self, from: usize, to: usize) -> i64 {
        self.net(from, to).max(0)
    }

    /// Net units leaving `vertex`.
    #[must_use]
    pub fn outflow(&self, vertex: usize) -> i64 {
        self.flow.row(vertex).map_or(0, |row| row.iter().sum())
    }

    /// The underlying signed table.
    #[must_use]
    #[rustfmt::skip]
    pub const fn as_matrix(&self) -> &Matrix<i64> { &self.flow }
}

/// An original arc crossing from the source side to the sink side.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CutEdge {
    /// Tail, on the source side.
    pub from: usize,
    /// Head, on the sink side.
    pub to: usize,
    /// Capacity of the arc.
    pub capacity: i64,
}

/// A minimum `source`/`sink` cut.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinCut {
    source_side: Vec<bool>,
    edges: Vec<CutEdge>,
}

impl MinCut {
    /// Vertices reachable from the source in the final residual graph.
    #[must_use]
    pub fn source_side(&self) -> Vec<usize> {
        self.source_side
            .iter()
            .enumerate()
            .filter_map(|(id, &reached)| reached.then_some(id))
            .collect()
    }

    /// Returns `true` when `vertex` lies on the source side.
    #[must_use]
    pub fn contains(&self, vertex: usize) -> bool {
        self.source_side.get(vertex).copied().unwrap_or(false)
    }

    /// Crossing arcs in row-major order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[CutEdge] { &self.edges }

    /// Sum of the crossing capacities.
    #[must_use]
    pub fn capacity(&self) -> i64 {
        self.edges.iter().map(|edge| edge.capacity).sum()
    }
}

/// Result of a maximum-flow computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaxFlow {
    source: usize,
    sink: usize,
    value: i64,
    flows: FlowMatrix,
    augmentations: usize,
    min_cut: MinCut,
}

impl MaxFlow {
    /// Source vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Sink vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn sink(&self) -> usize { self.sink }

    /// Total flow delivered to the sink.
    #[must_use]
    #[rustfmt::skip]
    pub const fn value(&self) -> i64 { self.value }

    /// Final flow assignment.
    #[must_use]
    #[rustfmt::skip]
    pub const fn flows(&self) -> &FlowMatrix { &self.flows }

    /// Number of augmenting paths used.
    #[must_use]
    #[rustfmt::skip]
    pub const fn augmentations(&self) -> usize { self.augmentations }

    /// Cut certifying optimality.
    #[must_use]
    #[rustfmt::skip]
    pub const fn min_cut(&self) -> &MinCut { &self.min_cut }
}

fn residual(network: &FlowNetwork, flows: &FlowMatrix, from: usize, to: usize) -> i64 {
    network.capacity(from, to) - flows.net(from, to)
}

/// Breadth-first search over arcs with positive residual capacity. Returns
/// the parent of every reached vertex, with the source marked by itself.
fn residual_bfs(network: &FlowNetwork, flows: &FlowMatrix, source: usize) -> Vec<Option<usize>> {
    let vertex_count = network.vertex_count();
    let mut parents = vec![None; vertex_count];
    parents[source] = Some(source);
    let mut queue = VecDeque::from([source]);
    while let Some(vertex) = queue.pop_front() {
        for next in 0..vertex_count {
            if parents[next].is_none() && residual(network, flows, vertex, next) > 0 {
                parents[next] = Some(vertex);
                queue.push_back(next);
            }
        }
    }
    parents
}

/// Collects the `source → sink` path from BFS parents, sink last.
fn augmenting_path(parents: &[Option<usize>], source: usize, sink: usize) -> Option<Vec<usize>> {
    let mut path = vec![sink];
    let mut current = sink;
    while current != source {
        current = (*parents.get(current)?)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

/// Computes a maximum `source → sink` flow and a matching minimum cut.
///
/// Each round runs a breadth-first search in the residual graph, so the
/// shortest augmenting path (by arc count) is always chosen and neighbours
/// are scanned in ascending index order.
///
/// # Errors
/// - [`SolverError::VertexOutOfRange`] when either endpoint is not a vertex.
/// - [`SolverError::SourceIsSink`] when `source == sink`.
///
/// # Examples
/// ```
/// use opsuite_core::flow::{FlowNetwork, ford_fulkerson};
///
/// let mut network = FlowNetwork::new(4);
/// for (from, to, capacity) in [(0, 1, 3), (0, 2, 2), (1, 3, 2), (2, 3, 3)] {
///     network.add_arc(from, to, capacity)?;
/// }
/// let result = ford_fulkerson(&network, 0, 3)?;
/// assert_eq!(result.value(), 4);
/// assert_eq!(result.min_cut().capacity(), 4);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[instrument(
    name = "flow.ford_fulkerson",
    err,
    skip(network),
    fields(vertices = network.vertex_count()),
)]
pub fn ford_fulkerson(network: &FlowNetwork, source: usize, sink: usize) -> Result<MaxFlow> {
    network.check_vertex(source)?;
    network.check_vertex(sink)?;
    if source == sink {
        return Err(SolverError::SourceIsSink { vertex: source });
    }

    let mut flows = FlowMatrix::zeros(network.vertex_count());
    let mut value = 0_i64;
    let mut augmentations = 0_usize;
    let parents = loop {
        let parents = residual_bfs(network, &flows, source);
        let Some(path) = augmenting_path(&parents, source, sink) else {
            break parents;
        };
        let Some(bottleneck) = path
            .windows(2)
            .map(|pair| residual(network, &flows, pair[0], pair[1]))
            .min()
        else {
            break parents;
        };
        for pair in path.windows(2) {
            flows.push(pair[0], pair[1], bottleneck);
        }
        value += bottleneck;
        augmentations += 1;
        trace!(bottleneck, hops = path.len() - 1, "augmented");
    };

    let source_side: Vec<bool> = parents.iter().map(Option::is_some).collect();
    let edges = network
        .arcs()
        .filter(|&(from, to, _)| source_side[from] && !source_side[to])
        .map(|(from, to, capacity)| CutEdge { from, to, capacity })
        .collect();
    let min_cut = MinCut { source_side, edges };
    debug!(value, augmentations, cut_edges = min_cut.edges.len(), "maximum flow found");

    Ok(MaxFlow {
        source,
        sink,
        value,
        flows,
        augmentations,
        min_cut,
    })
}
