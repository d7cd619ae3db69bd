//! Seedable random instance generators.
//!
//! Every generator takes a typed configuration and a caller-supplied
//! [`rand::Rng`], validates the configuration, and returns an instance that
//! already satisfies the invariants of the engine it feeds. Defaults match
//! the parameter ranges of the interactive reference tool.

mod graph;
mod tasks;
mod transport;

pub use self::{
    graph::{complete_graph, flow_network, forward_digraph, random_graph},
    tasks::task_table,
    transport::transport_problem,
};

use rand::Rng;

use crate::error::{Result, SolverError};

/// Number of distinct labels [`LabelScheme::LetterPairs`] can produce.
pub const LETTER_PAIR_CAPACITY: usize = 325;

/// An inclusive integer range sampled uniformly.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ValueRange {
    /// Smallest value that may be drawn.
    pub min: i64,
    /// Largest value that may be drawn.
    pub max: i64,
}

impl ValueRange {
    /// Creates the range `min..=max`.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    fn validate(self, parameter: &'static str) -> Result<Self> {
        if self.min > self.max {
            return Err(self.invalid(parameter));
        }
        Ok(self)
    }

    fn validate_non_negative(self, parameter: &'static str) -> Result<Self> {
        if self.min < 0 {
            return Err(self.invalid(parameter));
        }
        self.validate(parameter)
    }

    const fn invalid(self, parameter: &'static str) -> SolverError {
        SolverError::InvalidRange {
            parameter,
            min: self.min,
            max: self.max,
        }
    }

    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> i64 {
        rng.gen_range(self.min..=self.max)
    }
}

/// How generated vertices are named.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LabelScheme {
    /// `x0, x1, x2, ...`
    #[default]
    Indexed,
    /// Ordered pairs of distinct capital letters: `AB, AC, ..., AZ, BC, ...`
    LetterPairs,
}

impl LabelScheme {
    /// Produces `count` distinct labels.
    ///
    /// # Errors
    /// Returns [`SolverError::LabelCapacity`] when `count` exceeds
    /// [`LETTER_PAIR_CAPACITY`] for [`LabelScheme::LetterPairs`].
    ///
    /// # Examples
    /// ```
    /// use opsuite_core::generate::LabelScheme;
    ///
    /// assert_eq!(LabelScheme::Indexed.labels(2)?, ["x0", "x1"]);
    /// assert_eq!(LabelScheme::LetterPairs.labels(3)?, ["AB", "AC", "AD"]);
    /// # Ok::<(), opsuite_core::SolverError>(())
    /// ```
    pub fn labels(self, count: usize) -> Result<Vec<String>> {
        match self {
            Self::Indexed => Ok((0..count).map(|id| format!("x{id}")).collect()),
            Self::LetterPairs => {
                if count > LETTER_PAIR_CAPACITY {
                    return Err(SolverError::LabelCapacity {
                        requested: count,
                        available: LETTER_PAIR_CAPACITY,
                    });
                }
                let letters: Vec<char> = ('A'..='Z').collect();
                let pairs = letters.iter().enumerate().flat_map(|(position, &first)| {
                    letters
                        .iter()
                        .skip(position + 1)
                        .map(move |&second| format!("{first}{second}"))
                });
                Ok(pairs.take(count).collect())
            }
        }
    }
}

/// Parameters for weighted graph generators.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GraphConfig {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Range edge weights are drawn from.
    pub weights: ValueRange,
    /// Vertex naming.
    pub labels: LabelScheme,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            vertex_count: 6,
            weights: ValueRange::new(1, 100),
            labels: LabelScheme::Indexed,
        }
    }
}

/// Parameters for [`flow_network`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FlowConfig {
    /// Number of vertices; the source is `0` and the sink the last vertex.
    pub vertex_count: usize,
    /// Range arc capacities are drawn from.
    pub capacities: ValueRange,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            vertex_count: 6,
            capacities: ValueRange::new(1, 10),
        }
    }
}

/// Parameters for [`task_table`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TaskConfig {
    /// Number of tasks, labelled `T1..=Tn`.
    pub task_count: usize,
    /// Range durations are drawn from.
    pub durations: ValueRange,
    /// Upper bound on predecessors per task.
    pub max_predecessors: usize,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            task_count: 8,
            durations: ValueRange::new(1, 10),
            max_predecessors: 2,
        }
    }
}

/// Parameters for [`transport_problem`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransportConfig {
    /// Number of supply points.
    pub sources: usize,
    /// Number of demand points.
    pub destinations: usize,
    /// Range unit costs are drawn from.
    pub costs: ValueRange,
    /// Range supplies and demands are drawn from before balancing.
    pub quantities: ValueRange,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            sources: 3,
            destinations: 4,
            costs: ValueRange::new(1, 19),
            quantities: ValueRange::new(10, 49),
        }
    }
}

#[cfg(test)]
mod tests;
