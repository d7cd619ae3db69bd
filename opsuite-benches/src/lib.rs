//! Benchmark support crate for opsuite.
//!
//! Provides seeded instance builders and parameter types used by the
//! Criterion benchmarks of the path, tree, colouring, scheduling, flow and
//! transportation engines.

pub mod error;
pub mod instances;
pub mod params;
