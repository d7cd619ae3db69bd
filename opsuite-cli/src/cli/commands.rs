//! Command definitions and execution for the opsuite CLI.
//!
//! Every subcommand draws a random instance from the generators in
//! `opsuite_core::generate`, runs one engine on it and condenses the result
//! into a [`Report`]. Only the engine call is timed; generation and rendering
//! are excluded.

use std::{
    io::{self, Write},
    time::Duration,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use opsuite_core::{
    Graph, SolverError, Timed,
    coloring::welsh_powell,
    flow::ford_fulkerson,
    generate::{
        FlowConfig, GraphConfig, LabelScheme, TaskConfig, TransportConfig, ValueRange,
        complete_graph, flow_network, forward_digraph, random_graph, task_table,
        transport_problem,
    },
    mst::kruskal,
    schedule::critical_path_method,
    shortest_path::{bellman_ford_tree, dijkstra},
    timed,
    transport::{least_cost, north_west_corner, stepping_stone},
};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Command-line interface for the opsuite solvers.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "opsuite",
    version,
    about = "Run classical operations-research algorithms on random instances."
)]
pub struct Cli {
    /// Seed for the instance generator. Omit it for a fresh instance per run.
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Algorithm to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Shortest path on a complete undirected graph (Dijkstra).
    Dijkstra(PathCommand),
    /// Shortest path on a forward-only directed graph (Bellman-Ford).
    BellmanFord(PathCommand),
    /// Minimum spanning tree of a complete graph (Kruskal).
    Kruskal(TreeCommand),
    /// Greedy vertex colouring of a random graph (Welsh-Powell).
    WelshPowell(ColoringCommand),
    /// Earliest and latest start times of a random project (Potentiel Métra).
    Metra(MetraCommand),
    /// Maximum flow and minimum cut of a random network (Ford-Fulkerson).
    MaxFlow(FlowCommand),
    /// Initial allocations and stepping-stone optimisation of a transport problem.
    Transport(TransportCommand),
}

impl Command {
    /// Stable name used in reports and span fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dijkstra(_) => "dijkstra",
            Self::BellmanFord(_) => "bellman-ford",
            Self::Kruskal(_) => "kruskal",
            Self::WelshPowell(_) => "welsh-powell",
            Self::Metra(_) => "metra",
            Self::MaxFlow(_) => "max-flow",
            Self::Transport(_) => "transport",
        }
    }
}

/// Edge weight bounds shared by the graph commands.
#[derive(Debug, Args, Clone)]
pub struct WeightArgs {
    /// Smallest edge weight.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub min_weight: i64,
    /// Largest edge weight.
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    pub max_weight: i64,
}

impl WeightArgs {
    const fn range(&self) -> ValueRange {
        ValueRange::new(self.min_weight, self.max_weight)
    }
}

/// Arguments for the shortest-path commands.
#[derive(Debug, Args, Clone)]
pub struct PathCommand {
    /// Number of vertices, labelled `x0`, `x1`, ...
    #[arg(long, default_value_t = 6)]
    pub vertices: usize,
    /// Label of the start vertex.
    #[arg(long, default_value = "x0")]
    pub source: String,
    /// Label of the destination. Defaults to the last vertex.
    #[arg(long)]
    pub target: Option<String>,
    /// Edge weight bounds.
    #[command(flatten)]
    pub weights: WeightArgs,
}

/// Vertex naming offered on the command line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LabelArg {
    /// `x0`, `x1`, ...
    Indexed,
    /// `AB`, `AC`, ... `YZ`.
    #[default]
    LetterPairs,
}

impl From<LabelArg> for LabelScheme {
    fn from(value: LabelArg) -> Self {
        match value {
            LabelArg::Indexed => Self::Indexed,
            LabelArg::LetterPairs => Self::LetterPairs,
        }
    }
}

/// Arguments for `kruskal`.
#[derive(Debug, Args, Clone)]
pub struct TreeCommand {
    /// Number of vertices.
    #[arg(long, default_value_t = 6)]
    pub vertices: usize,
    /// Vertex naming scheme.
    #[arg(long, value_enum, default_value_t = LabelArg::LetterPairs)]
    pub labels: LabelArg,
    /// Edge weight bounds.
    #[command(flatten)]
    pub weights: WeightArgs,
}

/// Arguments for `welsh-powell`.
#[derive(Debug, Args, Clone)]
pub struct ColoringCommand {
    /// Number of vertices.
    #[arg(long, default_value_t = 6)]
    pub vertices: usize,
}

/// Arguments for `metra`.
#[derive(Debug, Args, Clone)]
pub struct MetraCommand {
    /// Number of tasks, labelled `T1..Tn`.
    #[arg(long, default_value_t = 8)]
    pub tasks: usize,
    /// Shortest task duration.
    #[arg(long, default_value_t = 1)]
    pub min_duration: i64,
    /// Longest task duration.
    #[arg(long, default_value_t = 10)]
    pub max_duration: i64,
    /// Upper bound on predecessors per task.
    #[arg(long, default_value_t = 2)]
    pub max_predecessors: usize,
}

/// Arguments for `max-flow`.
#[derive(Debug, Args, Clone)]
pub struct FlowCommand {
    /// Number of vertices.
    #[arg(long, default_value_t = 6)]
    pub vertices: usize,
    /// Smallest arc capacity.
    #[arg(long, default_value_t = 1)]
    pub min_capacity: i64,
    /// Largest arc capacity.
    #[arg(long, default_value_t = 10)]
    pub max_capacity: i64,
    /// Source vertex index. Defaults to `0`.
    #[arg(long)]
    pub source: Option<usize>,
    /// Sink vertex index. Defaults to the last vertex.
    #[arg(long)]
    pub sink: Option<usize>,
}

/// Arguments for `transport`.
#[derive(Debug, Args, Clone)]
pub struct TransportCommand {
    /// Number of supply points.
    #[arg(long, default_value_t = 3)]
    pub sources: usize,
    /// Number of demand points.
    #[arg(long, default_value_t = 4)]
    pub destinations: usize,
    /// Smallest unit cost.
    #[arg(long, default_value_t = 1)]
    pub min_cost: i64,
    /// Largest unit cost.
    #[arg(long, default_value_t = 19)]
    pub max_cost: i64,
    /// Smallest supply or demand before balancing.
    #[arg(long, default_value_t = 10)]
    pub min_quantity: i64,
    /// Largest supply or demand before balancing.
    #[arg(long, default_value_t = 49)]
    pub max_quantity: i64,
}

/// Errors emitted by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Instance generation or the engine failed.
    #[error(transparent)]
    Core(#[from] SolverError),
}

/// One row of the `metra` report.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaskRow {
    /// Task label.
    pub label: String,
    /// Task duration.
    pub duration: u64,
    /// Labels of the direct predecessors.
    pub predecessors: Vec<String>,
    /// Earliest start time.
    pub earliest_start: u64,
    /// Latest start time that keeps the project length.
    pub latest_start: u64,
    /// `latest_start - earliest_start`.
    pub slack: u64,
}

/// Engine output condensed for rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Report {
    /// Result of `dijkstra` or `bellman-ford`.
    ShortestPath {
        /// Vertex labels from source to target.
        path: Vec<String>,
        /// Total path weight.
        distance: i64,
        /// Distance from the source to every vertex; `None` when unreachable.
        /// Empty for Dijkstra, which stops at the target.
        distances: Vec<(String, Option<i64>)>,
    },
    /// Result of `kruskal`.
    SpanningTree {
        /// Tree edges as `(from, to, weight)` in acceptance order.
        edges: Vec<(String, String, i64)>,
        /// Sum of the tree weights.
        total_weight: i64,
        /// Number of trees in the forest.
        components: usize,
    },
    /// Result of `welsh-powell`.
    Coloring {
        /// `(vertex, colour)` in vertex order.
        assignments: Vec<(String, usize)>,
        /// Number of colours used.
        color_count: usize,
        /// Number of edges in the generated graph.
        edge_count: usize,
    },
    /// Result of `metra`.
    Schedule {
        /// One row per task in table order.
        tasks: Vec<TaskRow>,
        /// Minimum project duration.
        total_duration: u64,
        /// Labels of the critical chain.
        critical_path: Vec<String>,
    },
    /// Result of `max-flow`.
    MaxFlow {
        /// Source label.
        source: String,
        /// Sink label.
        sink: String,
        /// Maximum flow value.
        value: i64,
        /// Number of augmenting paths used.
        augmentations: usize,
        /// Labels reachable from the source in the final residual network.
        source_side: Vec<String>,
        /// Saturated arcs crossing the cut as `(from, to, capacity)`.
        cut_edges: Vec<(String, String, i64)>,
    },
    /// Result of `transport`.
    Transport {
        /// Cost of the North-West corner allocation.
        north_west_cost: i64,
        /// Cost of the least-cost allocation.
        least_cost_cost: i64,
        /// Cost after stepping-stone optimisation of the least-cost start.
        optimal_cost: i64,
        /// Pivots performed by the optimiser.
        pivots: usize,
        /// Optimised allocation, one row per source.
        allocation: Vec<Vec<i64>>,
        /// Supply per source.
        supply: Vec<i64>,
        /// Demand per destination.
        demand: Vec<i64>,
    },
}

/// Output of a successful command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutionSummary {
    /// Subcommand name.
    pub command: &'static str,
    /// Seed used for generation, when one was given.
    pub seed: Option<u64>,
    /// Wall-clock time spent inside the engine.
    pub elapsed: Duration,
    /// Engine output.
    pub report: Report,
}

/// Execute the CLI command.
///
/// # Errors
/// Returns [`CliError::Core`] when the arguments describe an invalid instance
/// or the engine rejects the generated one.
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty, seed = field::Empty)
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let name = cli.command.name();
    span.record("command", name);
    let mut rng = match cli.seed {
        Some(seed) => {
            span.record("seed", seed);
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_entropy(),
    };

    let measured = match &cli.command {
        Command::Dijkstra(args) => run_dijkstra(args, &mut rng)?,
        Command::BellmanFord(args) => run_bellman_ford(args, &mut rng)?,
        Command::Kruskal(args) => run_kruskal(args, &mut rng)?,
        Command::WelshPowell(args) => run_welsh_powell(args, &mut rng)?,
        Command::Metra(args) => run_metra(args, &mut rng)?,
        Command::MaxFlow(args) => run_max_flow(args, &mut rng)?,
        Command::Transport(args) => run_transport(args, &mut rng)?,
    };
    let (report, elapsed) = measured.into_parts();
    info!(command = name, elapsed = ?elapsed, "command completed");
    Ok(ExecutionSummary {
        command: name,
        seed: cli.seed,
        elapsed,
        report,
    })
}

fn label(labels: &[String], id: usize) -> String {
    labels.get(id).cloned().unwrap_or_else(|| id.to_string())
}

fn labels_of(labels: &[String], ids: &[usize]) -> Vec<String> {
    ids.iter().map(|&id| label(labels, id)).collect()
}

fn graph_config(vertices: usize, weights: &WeightArgs, labels: LabelScheme) -> GraphConfig {
    GraphConfig {
        vertex_count: vertices,
        weights: weights.range(),
        labels,
    }
}

fn endpoints(graph: &Graph, args: &PathCommand) -> Result<(usize, usize), SolverError> {
    let source = graph.vertex(&args.source)?;
    let target = match &args.target {
        Some(target) => graph.vertex(target)?,
        None => graph.vertex_count().saturating_sub(1),
    };
    Ok((source, target))
}

#[instrument(name = "cli.dijkstra", skip_all, fields(vertices = args.vertices))]
fn run_dijkstra(args: &PathCommand, rng: &mut SmallRng) -> Result<Timed<Report>, CliError> {
    let config = graph_config(args.vertices, &args.weights, LabelScheme::Indexed);
    let graph = complete_graph(&config, rng)?;
    let (source, target) = endpoints(&graph, args)?;
    let measured = timed(|| dijkstra(&graph, source, target)).transpose()?;
    Ok(measured.map(|found| Report::ShortestPath {
        path: labels_of(graph.labels(), found.path()),
        distance: found.distance(),
        distances: Vec::new(),
    }))
}

#[instrument(name = "cli.bellman_ford", skip_all, fields(vertices = args.vertices))]
fn run_bellman_ford(args: &PathCommand, rng: &mut SmallRng) -> Result<Timed<Report>, CliError> {
    let config = graph_config(args.vertices, &args.weights, LabelScheme::Indexed);
    let graph = forward_digraph(&config, rng)?;
    let (source, target) = endpoints(&graph, args)?;
    let measured = timed(|| bellman_ford_tree(&graph, source)).transpose()?;
    let found = measured.value().route_to(target)?;
    let distances = graph
        .labels()
        .iter()
        .cloned()
        .zip(measured.value().distances().iter().copied())
        .collect();
    Ok(measured.map(|_| Report::ShortestPath {
        path: labels_of(graph.labels(), found.path()),
        distance: found.distance(),
        distances,
    }))
}

#[instrument(name = "cli.kruskal", skip_all, fields(vertices = args.vertices))]
fn run_kruskal(args: &TreeCommand, rng: &mut SmallRng) -> Result<Timed<Report>, CliError> {
    let config = graph_config(args.vertices, &args.weights, args.labels.into());
    let graph = complete_graph(&config, rng)?;
    let measured = timed(|| kruskal(&graph)).transpose()?;
    Ok(measured.map(|forest| Report::SpanningTree {
        edges: forest
            .edges()
            .iter()
            .map(|edge| {
                (
                    label(graph.labels(), edge.from()),
                    label(graph.labels(), edge.to()),
                    edge.weight(),
                )
            })
            .collect(),
        total_weight: forest.total_weight(),
        components: forest.component_count(),
    }))
}

#[instrument(name = "cli.welsh_powell", skip_all, fields(vertices = args.vertices))]
fn run_welsh_powell(args: &ColoringCommand, rng: &mut SmallRng) -> Result<Timed<Report>, CliError> {
    let config = GraphConfig {
        vertex_count: args.vertices,
        ..GraphConfig::default()
    };
    let graph = random_graph(&config, rng)?;
    let measured = timed(|| welsh_powell(&graph));
    Ok(measured.map(|coloring| Report::Coloring {
        assignments: graph
            .labels()
            .iter()
            .cloned()
            .zip(coloring.colors().iter().copied())
            .collect(),
        color_count: coloring.color_count(),
        edge_count: graph.edge_count(),
    }))
}

#[instrument(name = "cli.metra", skip_all, fields(tasks = args.tasks))]
fn run_metra(args: &MetraCommand, rng: &mut SmallRng) -> Result<Timed<Report>, CliError> {
    let config = TaskConfig {
        task_count: args.tasks,
        durations: ValueRange::new(args.min_duration, args.max_duration),
        max_predecessors: args.max_predecessors,
    };
    let table = task_table(&config, rng)?;
    let measured = timed(|| critical_path_method(&table)).transpose()?;
    let labels: Vec<String> = table
        .tasks()
        .iter()
        .map(|task| task.label().to_owned())
        .collect();
    Ok(measured.map(|schedule| {
        let tasks = table
            .tasks()
            .iter()
            .enumerate()
            .map(|(id, task)| TaskRow {
                label: task.label().to_owned(),
                duration: task.duration(),
                predecessors: labels_of(&labels, task.predecessors()),
                earliest_start: schedule.earliest_start(id).unwrap_or_default(),
                latest_start: schedule.latest_start(id).unwrap_or_default(),
                slack: schedule.slack(id).unwrap_or_default(),
            })
            .collect();
        Report::Schedule {
            tasks,
            total_duration: schedule.total_duration(),
            critical_path: labels_of(&labels, schedule.critical_path()),
        }
    }))
}

#[instrument(name = "cli.max_flow", skip_all, fields(vertices = args.vertices))]
fn run_max_flow(args: &FlowCommand, rng: &mut SmallRng) -> Result<Timed<Report>, CliError> {
    let config = FlowConfig {
        vertex_count: args.vertices,
        capacities: ValueRange::new(args.min_capacity, args.max_capacity),
    };
    let network = flow_network(&config, rng)?;
    let source = args.source.unwrap_or(0);
    let sink = args
        .sink
        .unwrap_or_else(|| network.vertex_count().saturating_sub(1));
    let measured = timed(|| ford_fulkerson(&network, source, sink)).transpose()?;
    let labels = network.labels();
    Ok(measured.map(|flow| {
        let cut = flow.min_cut();
        Report::MaxFlow {
            source: label(labels, flow.source()),
            sink: label(labels, flow.sink()),
            value: flow.value(),
            augmentations: flow.augmentations(),
            source_side: labels_of(labels, &cut.source_side()),
            cut_edges: cut
                .edges()
                .iter()
                .map(|edge| (label(labels, edge.from), label(labels, edge.to), edge.capacity))
                .collect(),
        }
    }))
}

#[instrument(
    name = "cli.transport",
    skip_all,
    fields(sources = args.sources, destinations = args.destinations)
)]
fn run_transport(args: &TransportCommand, rng: &mut SmallRng) -> Result<Timed<Report>, CliError> {
    let config = TransportConfig {
        sources: args.sources,
        destinations: args.destinations,
        costs: ValueRange::new(args.min_cost, args.max_cost),
        quantities: ValueRange::new(args.min_quantity, args.max_quantity),
    };
    let problem = transport_problem(&config, rng)?;
    let measured = timed(|| {
        let north_west = north_west_corner(&problem);
        let cheapest = least_cost(&problem);
        stepping_stone(&problem, &cheapest).map(|outcome| {
            (
                north_west.total_cost(&problem),
                cheapest.total_cost(&problem),
                outcome,
            )
        })
    })
    .transpose()?;
    Ok(measured.map(|(north_west_cost, least_cost_cost, outcome)| Report::Transport {
        north_west_cost,
        least_cost_cost,
        optimal_cost: outcome.final_cost(),
        pivots: outcome.pivots(),
        allocation: outcome.allocation().to_rows(),
        supply: problem.supply().to_vec(),
        demand: problem.demand().to_vec(),
    }))
}

/// Render a human-readable report of the command output.
///
/// # Errors
/// Returns any I/O error raised while writing to `writer`.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "command: {}", summary.command)?;
    match summary.seed {
        Some(seed) => writeln!(writer, "seed: {seed}")?,
        None => writeln!(writer, "seed: random")?,
    }
    writeln!(writer, "elapsed: {:?}", summary.elapsed)?;
    match &summary.report {
        Report::ShortestPath {
            path,
            distance,
            distances,
        } => {
            writeln!(writer, "path: {}", path.join(" -> "))?;
            writeln!(writer, "distance: {distance}")?;
            for (vertex, reached) in distances {
                match reached {
                    Some(value) => writeln!(writer, "  {vertex}: {value}")?,
                    None => writeln!(writer, "  {vertex}: unreachable")?,
                }
            }
        }
        Report::SpanningTree {
            edges,
            total_weight,
            components,
        } => {
            for (from, to, weight) in edges {
                writeln!(writer, "edge: {from} - {to} ({weight})")?;
            }
            writeln!(writer, "total weight: {total_weight}")?;
            writeln!(writer, "components: {components}")?;
        }
        Report::Coloring {
            assignments,
            color_count,
            edge_count,
        } => {
            writeln!(writer, "edges: {edge_count}")?;
            for (vertex, color) in assignments {
                writeln!(writer, "{vertex}: colour {color}")?;
            }
            writeln!(writer, "colours: {color_count}")?;
        }
        Report::Schedule {
            tasks,
            total_duration,
            critical_path,
        } => {
            writeln!(writer, "task\tduration\tafter\tES\tLS\tslack")?;
            for task in tasks {
                let after = if task.predecessors.is_empty() {
                    "-".to_owned()
                } else {
                    task.predecessors.join(",")
                };
                writeln!(
                    writer,
                    "{}\t{}\t{after}\t{}\t{}\t{}",
                    task.label, task.duration, task.earliest_start, task.latest_start, task.slack
                )?;
            }
            writeln!(writer, "total duration: {total_duration}")?;
            writeln!(writer, "critical path: {}", critical_path.join(" -> "))?;
        }
        Report::MaxFlow {
            source,
            sink,
            value,
            augmentations,
            source_side,
            cut_edges,
        } => {
            writeln!(writer, "max flow {source} -> {sink}: {value}")?;
            writeln!(writer, "augmenting paths: {augmentations}")?;
            writeln!(writer, "source side: {}", source_side.join(", "))?;
            for (from, to, capacity) in cut_edges {
                writeln!(writer, "cut: {from} -> {to} ({capacity})")?;
            }
        }
        Report::Transport {
            north_west_cost,
            least_cost_cost,
            optimal_cost,
            pivots,
            allocation,
            supply,
            demand,
        } => {
            writeln!(writer, "north-west cost: {north_west_cost}")?;
            writeln!(writer, "least-cost cost: {least_cost_cost}")?;
            writeln!(writer, "optimal cost: {optimal_cost} after {pivots} pivots")?;
            for (row, quantity) in allocation.iter().zip(supply) {
                let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                writeln!(writer, "{}\t| {quantity}", cells.join("\t"))?;
            }
            let totals: Vec<String> = demand.iter().map(ToString::to_string).collect();
            writeln!(writer, "{}", totals.join("\t"))?;
        }
    }
    Ok(())
}
