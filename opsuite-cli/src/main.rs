//! `opsuite` binary.
//!
//! Installs logging, runs the parsed command and writes its report to
//! stdout. Failures are logged with their stable error code and turned into
//! an exit status that reflects the error kind:
//!
//! | status | meaning |
//! |---|---|
//! | 0 | success |
//! | 1 | I/O or logging failure |
//! | 2 | invalid input |
//! | 3 | unreachable target |
//! | 4 | negative cycle |
//! | 5 | degenerate tableau or pivot cap reached |

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use opsuite_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use opsuite_core::{ErrorKind, SolverError};
use tracing::{error, field};

fn execute(cli: Cli) -> Result<()> {
    let summary = run_cli(cli).context("command failed")?;
    let mut out = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut out).context("failed to write report")?;
    out.flush().context("failed to flush report")
}

fn solver_error(err: &anyhow::Error) -> Option<&SolverError> {
    err.downcast_ref::<CliError>().map(|cli_error| match cli_error {
        CliError::Core(core) => core,
    })
}

const fn exit_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::InvalidInput => 2,
        ErrorKind::Unreachable => 3,
        ErrorKind::NegativeCycle => 4,
        ErrorKind::Degenerate => 5,
    }
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    let Err(err) = execute(Cli::parse()) else {
        return ExitCode::SUCCESS;
    };
    let solver = solver_error(&err);
    error!(
        error = %format!("{err:#}"),
        code = solver.map(|found| field::display(found.code())),
        kind = solver.map(|found| field::display(found.kind())),
        "opsuite failed"
    );
    solver.map_or(ExitCode::FAILURE, |found| {
        ExitCode::from(exit_status(found.kind()))
    })
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is unavailable when its subscriber failed to install"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("opsuite: cannot initialise logging: {err}");
}
