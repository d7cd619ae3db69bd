//! Unit and property tests for Welsh-Powell colouring.

use proptest::prelude::*;
use rstest::rstest;

use crate::{
    graph::{Graph, GraphKind},
    test_utils::suite_proptest_config,
};

use super::welsh_powell;

fn graph_from(vertex_count: usize, edges: &[(usize, usize)]) -> Graph {
    let labels = (0..vertex_count).map(|index| format!("x{index}"));
    let mut graph = Graph::with_vertices(GraphKind::Undirected, labels).expect("labels");
    for &(from, to) in edges {
        graph.add_edge(from, to, 1).expect("valid edge");
    }
    graph
}

#[test]
fn empty_graph_needs_no_colours() {
    let coloring = welsh_powell(&Graph::new(GraphKind::Undirected));
    assert_eq!(coloring.color_count(), 0);
    assert!(coloring.colors().is_empty());
    assert!(coloring.classes().is_empty());
}

#[rstest]
#[case::isolated(graph_from(3, &[]), 1)]
#[case::path(graph_from(4, &[(0, 1), (1, 2), (2, 3)]), 2)]
#[case::star(graph_from(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]), 2)]
#[case::even_cycle(graph_from(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]), 2)]
#[case::odd_cycle(graph_from(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]), 3)]
#[case::k4(graph_from(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]), 4)]
fn colours_known_shapes(#[case] graph: Graph, #[case] expected: usize) {
    assert_eq!(welsh_powell(&graph).color_count(), expected);
}

#[test]
fn visits_high_degree_vertices_first() {
    let graph = graph_from(5, &[(3, 0), (3, 1), (3, 2), (1, 2)]);
    let coloring = welsh_powell(&graph);
    assert_eq!(coloring.order(), [3, 1, 2, 0, 4]);
    assert_eq!(coloring.color(3), Some(0));
    assert_eq!(coloring.classes(), vec![vec![3, 4], vec![0, 1], vec![2]]);
}

fn random_graph() -> impl Strategy<Value = Graph> {
    (1_usize..14, prop::collection::vec((0_usize..64, 0_usize..64), 0..60)).prop_map(
        |(vertex_count, raw_edges)| {
            let edges: Vec<(usize, usize)> = raw_edges
                .into_iter()
                .map(|(from, to)| (from % vertex_count, to % vertex_count))
                .filter(|(from, to)| from != to)
                .collect();
            graph_from(vertex_count, &edges)
        },
    )
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn colouring_is_proper_and_bounded(graph in random_graph()) {
        let coloring = welsh_powell(&graph);
        for edge in graph.edges() {
            prop_assert_ne!(coloring.color(edge.from()), coloring.color(edge.to()));
        }
        let max_degree = graph
            .neighbour_sets()
            .iter()
            .map(std::collections::BTreeSet::len)
            .max()
            .unwrap_or(0);
        prop_assert!(coloring.color_count() <= max_degree + 1);
        prop_assert_eq!(coloring.colors().len(), graph.vertex_count());
    }
}
