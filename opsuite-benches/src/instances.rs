//! Seeded instances shared by the benchmarks.
//!
//! Every builder derives its generator from the same seed so repeated runs
//! measure identical inputs.

use opsuite_core::{
    Graph,
    flow::FlowNetwork,
    generate::{self, FlowConfig, GraphConfig, TaskConfig, TransportConfig},
    schedule::TaskTable,
    transport::TransportProblem,
};
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Seed used for all generated benchmark instances.
pub const SEED: u64 = 42;

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(SEED)
}

const fn non_zero(size: usize, context: &'static str) -> Result<usize, BenchSetupError> {
    if size == 0 {
        Err(BenchSetupError::ZeroValue { context })
    } else {
        Ok(size)
    }
}

fn graph_config(size: usize) -> Result<GraphConfig, BenchSetupError> {
    Ok(GraphConfig {
        vertex_count: non_zero(size, "vertex count")?,
        ..GraphConfig::default()
    })
}

/// Complete undirected graph for Dijkstra and Kruskal.
///
/// # Errors
/// Returns [`BenchSetupError`] when `size` is zero or generation fails.
pub fn complete_graph(size: usize) -> Result<Graph, BenchSetupError> {
    Ok(generate::complete_graph(&graph_config(size)?, &mut rng())?)
}

/// Forward-only directed graph for Bellman-Ford.
///
/// # Errors
/// Returns [`BenchSetupError`] when `size` is zero or generation fails.
pub fn forward_digraph(size: usize) -> Result<Graph, BenchSetupError> {
    Ok(generate::forward_digraph(&graph_config(size)?, &mut rng())?)
}

/// Random simple graph for Welsh-Powell.
///
/// # Errors
/// Returns [`BenchSetupError`] when `size` is zero or generation fails.
pub fn random_graph(size: usize) -> Result<Graph, BenchSetupError> {
    Ok(generate::random_graph(&graph_config(size)?, &mut rng())?)
}

/// Complete capacitated network for Ford-Fulkerson.
///
/// # Errors
/// Returns [`BenchSetupError`] when `size` is zero or generation fails.
pub fn flow_network(size: usize) -> Result<FlowNetwork, BenchSetupError> {
    let config = FlowConfig {
        vertex_count: non_zero(size, "vertex count")?,
        ..FlowConfig::default()
    };
    Ok(generate::flow_network(&config, &mut rng())?)
}

/// Task table for the critical path method.
///
/// # Errors
/// Returns [`BenchSetupError`] when `size` is zero or generation fails.
pub fn task_table(size: usize) -> Result<TaskTable, BenchSetupError> {
    let config = TaskConfig {
        task_count: non_zero(size, "task count")?,
        ..TaskConfig::default()
    };
    Ok(generate::task_table(&config, &mut rng())?)
}

/// Square `size × size` transportation problem.
///
/// # Errors
/// Returns [`BenchSetupError`] when `size` is zero or generation fails.
pub fn transport_problem(size: usize) -> Result<TransportProblem, BenchSetupError> {
    let size = non_zero(size, "transport size")?;
    let config = TransportConfig {
        sources: size,
        destinations: size,
        ..TransportConfig::default()
    };
    Ok(generate::transport_problem(&config, &mut rng())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(8)]
    fn builders_honour_the_requested_size(#[case] size: usize) -> Result<(), BenchSetupError> {
        assert_eq!(complete_graph(size)?.vertex_count(), size);
        assert_eq!(forward_digraph(size)?.vertex_count(), size);
        assert_eq!(flow_network(size)?.vertex_count(), size);
        assert_eq!(task_table(size)?.len(), size);
        let problem = transport_problem(size)?;
        assert_eq!((problem.rows(), problem.cols()), (size, size));
        Ok(())
    }

    #[test]
    fn builders_are_deterministic() -> Result<(), BenchSetupError> {
        assert_eq!(complete_graph(6)?, complete_graph(6)?);
        assert_eq!(random_graph(6)?, random_graph(6)?);
        Ok(())
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(matches!(
            transport_problem(0),
            Err(BenchSetupError::ZeroValue {
                context: "transport size"
            })
        ));
        assert!(matches!(
            complete_graph(0),
            Err(BenchSetupError::ZeroValue {
                context: "vertex count"
            })
        ));
    }
}
