//! Tests for the instance generators.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use crate::{
    error::SolverError,
    graph::GraphKind,
    test_utils::suite_proptest_config,
};

use super::{
    FlowConfig,
    GraphConfig,
    LETTER_PAIR_CAPACITY,
    LabelScheme,
    TaskConfig,
    TransportConfig,
    ValueRange,
    complete_graph,
    flow_network,
    forward_digraph,
    random_graph,
    task_table,
    transport_problem,
};

fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

#[test]
fn letter_pairs_cover_the_reference_alphabet() {
    let labels = LabelScheme::LetterPairs
        .labels(LETTER_PAIR_CAPACITY)
        .expect("within capacity");
    assert_eq!(labels.first().map(String::as_str), Some("AB"));
    assert_eq!(labels.get(24).map(String::as_str), Some("AZ"));
    assert_eq!(labels.get(25).map(String::as_str), Some("BC"));
    assert_eq!(labels.last().map(String::as_str), Some("YZ"));
    assert_eq!(
        LabelScheme::LetterPairs.labels(LETTER_PAIR_CAPACITY + 1),
        Err(SolverError::LabelCapacity {
            requested: 326,
            available: 325
        })
    );
}

#[test]
fn complete_graph_joins_every_pair_within_range() {
    let config = GraphConfig {
        vertex_count: 5,
        labels: LabelScheme::LetterPairs,
        ..GraphConfig::default()
    };
    let graph = complete_graph(&config, &mut rng(1)).expect("valid config");
    assert_eq!(graph.kind(), GraphKind::Undirected);
    assert_eq!(graph.edge_count(), 10);
    assert_eq!(graph.label(4), Some("AF"));
    assert!(graph.edges().iter().all(|edge| (1..=100).contains(&edge.weight())));
}

#[test]
fn forward_digraph_only_points_forward() {
    let config = GraphConfig {
        vertex_count: 6,
        weights: ValueRange::new(-5, 5),
        ..GraphConfig::default()
    };
    let graph = forward_digraph(&config, &mut rng(2)).expect("valid config");
    assert_eq!(graph.kind(), GraphKind::Directed);
    assert_eq!(graph.edge_count(), 15);
    assert!(graph.edges().iter().all(|edge| edge.from() < edge.to()));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(9)]
fn random_graph_edge_count_stays_in_bounds(#[case] vertex_count: usize) {
    let config = GraphConfig {
        vertex_count,
        ..GraphConfig::default()
    };
    let graph = random_graph(&config, &mut rng(3)).expect("valid config");
    let pairs = vertex_count * (vertex_count - 1) / 2;
    assert!(graph.edge_count() >= vertex_count.min(pairs));
    assert!(graph.edge_count() <= pairs);
    let mut seen = std::collections::BTreeSet::new();
    assert!(graph.edges().iter().all(|edge| seen.insert((edge.from(), edge.to()))));
}

#[test]
fn flow_network_is_complete_without_loops() {
    let config = FlowConfig {
        vertex_count: 4,
        ..FlowConfig::default()
    };
    let network = flow_network(&config, &mut rng(4)).expect("valid config");
    let arcs: Vec<_> = network.arcs().collect();
    assert_eq!(arcs.len(), 12);
    assert!(arcs.iter().all(|&(from, to, capacity)| from != to && (1..=10).contains(&capacity)));
}

#[test]
fn task_table_draws_predecessors_from_earlier_tasks() {
    let config = TaskConfig {
        task_count: 12,
        ..TaskConfig::default()
    };
    let table = task_table(&config, &mut rng(5)).expect("valid config");
    assert_eq!(table.len(), 12);
    assert_eq!(table.tasks()[0].label(), "T1");
    for (id, task) in table.tasks().iter().enumerate() {
        assert!(task.predecessors().len() <= 2);
        assert!(task.predecessors().iter().all(|&p| p < id));
        assert!((1..=10).contains(&task.duration()));
    }
}

#[test]
fn same_seed_gives_same_instance() {
    let config = TransportConfig::default();
    let first = transport_problem(&config, &mut rng(6)).expect("valid config");
    let second = transport_problem(&config, &mut rng(6)).expect("valid config");
    assert_eq!(first, second);
}

#[rstest]
#[case::graph_empty(
    complete_graph(&GraphConfig { vertex_count: 0, ..GraphConfig::default() }, &mut rng(0)).map(|_| ()),
    SolverError::EmptyInstance { what: "vertex count" },
)]
#[case::graph_inverted(
    complete_graph(&GraphConfig { weights: ValueRange::new(9, 1), ..GraphConfig::default() }, &mut rng(0)).map(|_| ()),
    SolverError::InvalidRange { parameter: "weights", min: 9, max: 1 },
)]
#[case::flow_negative(
    flow_network(&FlowConfig { capacities: ValueRange::new(-1, 3), ..FlowConfig::default() }, &mut rng(0)).map(|_| ()),
    SolverError::InvalidRange { parameter: "capacities", min: -1, max: 3 },
)]
#[case::tasks_empty(
    task_table(&TaskConfig { task_count: 0, ..TaskConfig::default() }, &mut rng(0)).map(|_| ()),
    SolverError::EmptyInstance { what: "task count" },
)]
#[case::transport_no_destinations(
    transport_problem(&TransportConfig { destinations: 0, ..TransportConfig::default() }, &mut rng(0)).map(|_| ()),
    SolverError::EmptyInstance { what: "destinations" },
)]
#[case::transport_costs(
    transport_problem(&TransportConfig { costs: ValueRange::new(-3, -1), ..TransportConfig::default() }, &mut rng(0)).map(|_| ()),
    SolverError::InvalidRange { parameter: "costs", min: -3, max: -1 },
)]
fn invalid_configs_are_rejected(#[case] outcome: crate::Result<()>, #[case] expected: SolverError) {
    assert_eq!(outcome, Err(expected));
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn transport_problems_are_balanced(
        seed in any::<u64>(),
        sources in 1_usize..6,
        destinations in 1_usize..6,
    ) {
        let config = TransportConfig { sources, destinations, ..TransportConfig::default() };
        let problem = transport_problem(&config, &mut rng(seed)).expect("valid config");
        prop_assert_eq!(problem.rows(), sources);
        prop_assert_eq!(problem.cols(), destinations);
        let supply: i64 = problem.supply().iter().sum();
        let demand: i64 = problem.demand().iter().sum();
        prop_assert_eq!(supply, demand);
        prop_assert!(problem.costs().iter_cells().all(|(_, _, cost)| (1..=19).contains(cost)));
    }
}
