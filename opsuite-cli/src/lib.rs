//! Command-line front end for the opsuite engines.
//!
//! The binary generates a random instance for the chosen algorithm, runs the
//! engine, and prints a plain-text report. Library consumers can drive the
//! same flow through [`cli::run_cli`] and [`cli::render_summary`].

pub mod cli;
pub mod logging;
