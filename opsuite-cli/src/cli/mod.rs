//! Argument parsing, command dispatch and report rendering.

mod commands;

pub use commands::{
    Cli, CliError, ColoringCommand, Command, ExecutionSummary, FlowCommand, LabelArg,
    MetraCommand, PathCommand, Report, TaskRow, TransportCommand, TreeCommand, WeightArgs,
    render_summary, run_cli,
};
