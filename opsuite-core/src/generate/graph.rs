//! Graph and flow network shapes.

use rand::{Rng, seq::index};
use tracing::{debug, instrument};

use crate::{
    error::{Result, SolverError},
    flow::FlowNetwork,
    graph::{Graph, GraphKind},
};

use super::{FlowConfig, GraphConfig};

fn labelled(config: &GraphConfig, kind: GraphKind) -> Result<Graph> {
    if config.vertex_count == 0 {
        return Err(SolverError::EmptyInstance {
            what: "vertex count",
        });
    }
    Graph::with_vertices(kind, config.labels.labels(config.vertex_count)?)
}

/// Every unordered pair `i < j`, in lexicographic order.
fn pairs(vertex_count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..vertex_count).flat_map(move |from| ((from + 1)..vertex_count).map(move |to| (from, to)))
}

/// An undirected complete graph with random weights.
///
/// # Errors
/// Returns [`SolverError::EmptyInstance`] for zero vertices,
/// [`SolverError::InvalidRange`] for an inverted weight range, and
/// [`SolverError::LabelCapacity`] when the label scheme runs out.
///
/// # Examples
/// ```
/// use opsuite_core::generate::{GraphConfig, complete_graph};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = complete_graph(&GraphConfig::default(), &mut rng)?;
/// assert_eq!(graph.edge_count(), 15);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[instrument(name = "generate.complete_graph", err, skip(rng))]
pub fn complete_graph<R: Rng + ?Sized>(config: &GraphConfig, rng: &mut R) -> Result<Graph> {
    let weights = config.weights.validate("weights")?;
    let mut graph = labelled(config, GraphKind::Undirected)?;
    for (from, to) in pairs(config.vertex_count) {
        graph.add_edge(from, to, weights.sample(rng))?;
    }
    debug!(edges = graph.edge_count(), "generated complete graph");
    Ok(graph)
}

/// A directed graph with an arc `i → j` for every `i < j`.
///
/// The result is acyclic, so negative weight ranges are accepted and can
/// never produce a negative cycle.
///
/// # Errors
/// As [`complete_graph`].
#[instrument(name = "generate.forward_digraph", err, skip(rng))]
pub fn forward_digraph<R: Rng + ?Sized>(config: &GraphConfig, rng: &mut R) -> Result<Graph> {
    let weights = config.weights.validate("weights")?;
    let mut graph = labelled(config, GraphKind::Directed)?;
    for (from, to) in pairs(config.vertex_count) {
        graph.add_edge(from, to, weights.sample(rng))?;
    }
    debug!(edges = graph.edge_count(), "generated forward digraph");
    Ok(graph)
}

/// A uniform random undirected graph with unit weights.
///
/// The edge count `m` is drawn from `n ..= n(n-1)/2` (clamped to the number
/// of pairs for tiny graphs), then `m` distinct pairs are chosen uniformly.
/// Edges are stored in pair order.
///
/// # Errors
/// Returns [`SolverError::EmptyInstance`] for zero vertices and
/// [`SolverError::LabelCapacity`] when the label scheme runs out.
#[instrument(name = "generate.random_graph", err, skip(rng))]
pub fn random_graph<R: Rng + ?Sized>(config: &GraphConfig, rng: &mut R) -> Result<Graph> {
    let mut graph = labelled(config, GraphKind::Undirected)?;
    let candidates: Vec<(usize, usize)> = pairs(config.vertex_count).collect();
    let lower = config.vertex_count.min(candidates.len());
    let edge_count = rng.gen_range(lower..=candidates.len());
    let mut chosen = index::sample(rng, candidates.len(), edge_count).into_vec();
    chosen.sort_unstable();
    for &(from, to) in chosen.iter().filter_map(|&pick| candidates.get(pick)) {
        graph.add_edge(from, to, 1)?;
    }
    debug!(edges = graph.edge_count(), "generated random graph");
    Ok(graph)
}

/// A complete directed flow network without self-loops.
///
/// # Errors
/// Returns [`SolverError::EmptyInstance`] for zero vertices and
/// [`SolverError::InvalidRange`] for an inverted or negative capacity range.
#[instrument(name = "generate.flow_network", err, skip(rng))]
pub fn flow_network<R: Rng + ?Sized>(config: &FlowConfig, rng: &mut R) -> Result<FlowNetwork> {
    if config.vertex_count == 0 {
        return Err(SolverError::EmptyInstance {
            what: "vertex count",
        });
    }
    let capacities = config.capacities.validate_non_negative("capacities")?;
    let mut network = FlowNetwork::new(config.vertex_count);
    for from in 0..config.vertex_count {
        for to in (0..config.vertex_count).filter(|&to| to != from) {
            network.add_arc(from, to, capacities.sample(rng))?;
        }
    }
    Ok(network)
}
