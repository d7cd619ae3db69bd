//! Engine benchmarks over seeded random instances.
//!
//! Each group builds its instances once per size and times only the engine
//! call, mirroring what the CLI reports as elapsed time.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use opsuite_benches::{error::BenchSetupError, instances, params::SizeParams};
use opsuite_core::{
    coloring::welsh_powell,
    flow::ford_fulkerson,
    mst::kruskal,
    schedule::critical_path_method,
    shortest_path::{bellman_ford, dijkstra},
    transport::{least_cost, north_west_corner, stepping_stone},
};

/// Vertex and task counts for the graph and scheduling engines.
const GRAPH_SIZES: &[usize] = &[16, 64, 256];

/// Vertex counts for the dense flow networks.
const FLOW_SIZES: &[usize] = &[8, 16, 32];

/// Sources (and destinations) for the square transportation problems.
const TRANSPORT_SIZES: &[usize] = &[4, 8, 16];

fn graph_engines_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("shortest_path");
    for &size in GRAPH_SIZES {
        let complete = instances::complete_graph(size)?;
        let forward = instances::forward_digraph(size)?;
        let target = size - 1;
        let params = SizeParams { size };
        group.bench_with_input(BenchmarkId::new("dijkstra", params), &complete, |b, graph| {
            b.iter(|| dijkstra(graph, 0, target));
        });
        group.bench_with_input(
            BenchmarkId::new("bellman_ford", params),
            &forward,
            |b, graph| {
                b.iter(|| bellman_ford(graph, 0, target));
            },
        );
    }
    group.finish();

    let mut group = c.benchmark_group("mst_and_coloring");
    for &size in GRAPH_SIZES {
        let complete = instances::complete_graph(size)?;
        let sparse = instances::random_graph(size)?;
        let params = SizeParams { size };
        group.bench_with_input(BenchmarkId::new("kruskal", params), &complete, |b, graph| {
            b.iter(|| kruskal(graph));
        });
        group.bench_with_input(
            BenchmarkId::new("welsh_powell", params),
            &sparse,
            |b, graph| {
                b.iter(|| welsh_powell(graph));
            },
        );
    }
    group.finish();

    let mut group = c.benchmark_group("critical_path");
    for &size in GRAPH_SIZES {
        let table = instances::task_table(size)?;
        group.bench_with_input(
            BenchmarkId::from_parameter(SizeParams { size }),
            &table,
            |b, table| {
                b.iter(|| critical_path_method(table));
            },
        );
    }
    group.finish();
    Ok(())
}

fn flow_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("ford_fulkerson");
    for &size in FLOW_SIZES {
        let network = instances::flow_network(size)?;
        group.bench_with_input(
            BenchmarkId::from_parameter(SizeParams { size }),
            &network,
            |b, network| {
                b.iter(|| ford_fulkerson(network, 0, size - 1));
            },
        );
    }
    group.finish();
    Ok(())
}

fn transport_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("transport");
    group.sample_size(20);
    for &size in TRANSPORT_SIZES {
        let problem = instances::transport_problem(size)?;
        let start = north_west_corner(&problem);
        let params = SizeParams { size };
        group.bench_with_input(BenchmarkId::new("north_west", params), &problem, |b, problem| {
            b.iter(|| north_west_corner(problem));
        });
        group.bench_with_input(BenchmarkId::new("least_cost", params), &problem, |b, problem| {
            b.iter(|| least_cost(problem));
        });
        group.bench_with_input(
            BenchmarkId::new("stepping_stone", params),
            &(&problem, &start),
            |b, &(problem, start)| {
                b.iter(|| stepping_stone(problem, start));
            },
        );
    }
    group.finish();
    Ok(())
}

fn graph_engines(c: &mut Criterion) {
    if let Err(err) = graph_engines_impl(c) {
        panic!("graph engine benchmark setup failed: {err}");
    }
}

fn flow(c: &mut Criterion) {
    if let Err(err) = flow_impl(c) {
        panic!("flow benchmark setup failed: {err}");
    }
}

fn transport(c: &mut Criterion) {
    if let Err(err) = transport_impl(c) {
        panic!("transport benchmark setup failed: {err}");
    }
}

criterion_group!(benches, graph_engines, flow, transport);
criterion_main!(benches);
