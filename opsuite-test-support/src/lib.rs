//! Shared test utilities used across opsuite crates.
//!
//! Fixtures are plain data and this crate does not depend on `opsuite-core`,
//! so core unit tests can use it as a dev-dependency.

pub mod ci;
pub mod fixtures;
pub mod tracing;
