//! Classical operations-research engines over small generated instances.
//!
//! Each engine is a pure function from a validated instance to a structured
//! result: shortest paths ([`shortest_path`]), minimum spanning forests
//! ([`mst`]), greedy colouring ([`coloring`]), critical-path scheduling
//! ([`schedule`]), maximum flow with minimum cut ([`flow`]) and the
//! transportation problem ([`transport`]). Instances come from callers or
//! from the seedable generators in [`generate`].
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod coloring;
pub mod error;
pub mod flow;
pub mod generate;
pub mod graph;
pub mod matrix;
pub mod mst;
pub mod schedule;
pub mod shortest_path;
pub mod timing;
pub mod transport;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{ErrorKind, Result, SolverError, SolverErrorCode},
    graph::{Edge, Graph, GraphKind},
    matrix::Matrix,
    timing::{Timed, timed},
};
