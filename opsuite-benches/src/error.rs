//! Benchmark setup error type.
//!
//! Setup functions propagate instance-generation failures with `?` so the
//! benchmark bodies only panic in one place.

use opsuite_core::SolverError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Instance generation or a setup run of an engine failed.
    #[error("instance setup failed: {0}")]
    Core(#[from] SolverError),
    /// A zero size was passed where an instance needs at least one element.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
