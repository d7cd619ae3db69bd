//! Error taxonomy shared by every engine.
//!
//! Each [`SolverError`] variant names one concrete failure, carries a stable
//! [`SolverErrorCode`] for logs and exit reporting, and folds into one of the
//! four coarse [`ErrorKind`]s that presentation layers switch on.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Coarse classification of a [`SolverError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The caller supplied data the engine cannot work with.
    InvalidInput,
    /// No path exists between the requested vertices.
    Unreachable,
    /// A negative-weight cycle is reachable from the source.
    NegativeCycle,
    /// The transportation tableau could not be pivoted.
    Degenerate,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidInput => "invalid input",
            Self::Unreachable => "unreachable",
            Self::NegativeCycle => "negative cycle",
            Self::Degenerate => "degenerate",
        })
    }
}

/// Error returned by instance construction, generators and engines.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SolverError {
    /// A size parameter or collection was empty.
    #[error("{what} must not be empty")]
    EmptyInstance {
        /// Description of the empty input.
        what: &'static str,
    },
    /// A generator range was inverted or outside its domain.
    #[error("invalid range for {parameter}: {min}..={max}")]
    InvalidRange {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Lower bound supplied by the caller.
        min: i64,
        /// Upper bound supplied by the caller.
        max: i64,
    },
    /// More labels were requested than a labelling scheme can produce.
    #[error("requested {requested} labels but the scheme provides at most {available}")]
    LabelCapacity {
        /// Number of labels asked for.
        requested: usize,
        /// Number of distinct labels available.
        available: usize,
    },
    /// A vertex label was registered twice.
    #[error("vertex `{label}` already exists")]
    DuplicateVertex {
        /// The repeated label.
        label: String,
    },
    /// A vertex label did not resolve.
    #[error("vertex `{label}` does not exist")]
    UnknownVertex {
        /// The unresolved label.
        label: String,
    },
    /// A vertex index was outside the graph.
    #[error("vertex index {index} is out of range for {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge joined a vertex to itself.
    #[error("self-loop on vertex {vertex} is not allowed")]
    SelfLoop {
        /// The vertex carrying the loop.
        vertex: usize,
    },
    /// Source and sink coincide.
    #[error("source and sink must differ (both are {vertex})")]
    SourceIsSink {
        /// The shared vertex index.
        vertex: usize,
    },
    /// Dijkstra was handed a negative edge weight.
    #[error("edge ({from}, {to}) has negative weight {weight}")]
    NegativeWeight {
        /// Tail of the edge.
        from: usize,
        /// Head of the edge.
        to: usize,
        /// The negative weight.
        weight: i64,
    },
    /// A flow arc was given a negative capacity.
    #[error("arc ({from}, {to}) has negative capacity {capacity}")]
    NegativeCapacity {
        /// Tail of the arc.
        from: usize,
        /// Head of the arc.
        to: usize,
        /// The negative capacity.
        capacity: i64,
    },
    /// A task label was registered twice.
    #[error("task `{label}` already exists")]
    DuplicateTask {
        /// The repeated label.
        label: String,
    },
    /// A task label did not resolve.
    #[error("task `{label}` does not exist")]
    UnknownTask {
        /// The unresolved label.
        label: String,
    },
    /// A predecessor index was not strictly lower than its task.
    #[error("task {task} lists predecessor {predecessor}, which is not an earlier task")]
    PredecessorOrder {
        /// Index of the task.
        task: usize,
        /// Index of the offending predecessor.
        predecessor: usize,
    },
    /// Two related dimensions disagree.
    #[error("{what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which dimension disagreed.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// A supply, demand, cost or allocation entry was negative.
    #[error("{what}[{index}] is negative ({value})")]
    NegativeQuantity {
        /// Which vector or matrix held the entry.
        what: &'static str,
        /// Flat index of the entry.
        index: usize,
        /// The negative value.
        value: i64,
    },
    /// Total supply differs from total demand.
    #[error("total supply {supply} does not match total demand {demand}")]
    Unbalanced {
        /// Sum of supplies.
        supply: i64,
        /// Sum of demands.
        demand: i64,
    },
    /// An allocation's row or column sums do not match the problem.
    #[error("allocation {axis} {index} sums to {actual}, expected {expected}")]
    InfeasibleAllocation {
        /// `"row"` or `"column"`.
        axis: &'static str,
        /// Index of the offending row or column.
        index: usize,
        /// Required sum.
        expected: i64,
        /// Observed sum.
        actual: i64,
    },
    /// The target cannot be reached from the source.
    #[error("vertex {to} is unreachable from vertex {from}")]
    Unreachable {
        /// Source vertex index.
        from: usize,
        /// Target vertex index.
        to: usize,
    },
    /// Relaxation still improved a distance after `|V| - 1` rounds.
    #[error("negative-weight cycle detected through vertex {vertex}")]
    NegativeCycle {
        /// A vertex whose distance could still be improved.
        vertex: usize,
    },
    /// No closed loop could be built for a non-basic cell.
    #[error("no stepping-stone loop for cell ({row}, {col})")]
    Degenerate {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
    },
    /// The optimiser hit its pivot cap.
    #[error("stepping-stone stopped after {limit} pivots without converging")]
    IterationLimit {
        /// The configured cap.
        limit: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SolverError`] variants.
    enum SolverErrorCode for SolverError {
        /// A size parameter or collection was empty.
        EmptyInstance => EmptyInstance { .. } => "SOLVER_EMPTY_INSTANCE",
        /// A generator range was inverted or outside its domain.
        InvalidRange => InvalidRange { .. } => "SOLVER_INVALID_RANGE",
        /// More labels were requested than a labelling scheme can produce.
        LabelCapacity => LabelCapacity { .. } => "SOLVER_LABEL_CAPACITY",
        /// A vertex label was registered twice.
        DuplicateVertex => DuplicateVertex { .. } => "SOLVER_DUPLICATE_VERTEX",
        /// A vertex label did not resolve.
        UnknownVertex => UnknownVertex { .. } => "SOLVER_UNKNOWN_VERTEX",
        /// A vertex index was outside the graph.
        VertexOutOfRange => VertexOutOfRange { .. } => "SOLVER_VERTEX_OUT_OF_RANGE",
        /// An edge joined a vertex to itself.
        SelfLoop => SelfLoop { .. } => "SOLVER_SELF_LOOP",
        /// Source and sink coincide.
        SourceIsSink => SourceIsSink { .. } => "SOLVER_SOURCE_IS_SINK",
        /// Dijkstra was handed a negative edge weight.
        NegativeWeight => NegativeWeight { .. } => "SOLVER_NEGATIVE_WEIGHT",
        /// A flow arc was given a negative capacity.
        NegativeCapacity => NegativeCapacity { .. } => "SOLVER_NEGATIVE_CAPACITY",
        /// A task label was registered twice.
        DuplicateTask => DuplicateTask { .. } => "SOLVER_DUPLICATE_TASK",
        /// A task label did not resolve.
        UnknownTask => UnknownTask { .. } => "SOLVER_UNKNOWN_TASK",
        /// A predecessor index was not strictly lower than its task.
        PredecessorOrder => PredecessorOrder { .. } => "SOLVER_PREDECESSOR_ORDER",
        /// Two related dimensions disagree.
        DimensionMismatch => DimensionMismatch { .. } => "SOLVER_DIMENSION_MISMATCH",
        /// A supply, demand, cost or allocation entry was negative.
        NegativeQuantity => NegativeQuantity { .. } => "SOLVER_NEGATIVE_QUANTITY",
        /// Total supply differs from total demand.
        Unbalanced => Unbalanced { .. } => "SOLVER_UNBALANCED",
        /// An allocation's row or column sums do not match the problem.
        InfeasibleAllocation => InfeasibleAllocation { .. } => "SOLVER_INFEASIBLE_ALLOCATION",
        /// The target cannot be reached from the source.
        Unreachable => Unreachable { .. } => "SOLVER_UNREACHABLE",
        /// A negative-weight cycle was detected.
        NegativeCycle => NegativeCycle { .. } => "SOLVER_NEGATIVE_CYCLE",
        /// No closed loop could be built for a non-basic cell.
        Degenerate => Degenerate { .. } => "SOLVER_DEGENERATE",
        /// The optimiser hit its pivot cap.
        IterationLimit => IterationLimit { .. } => "SOLVER_ITERATION_LIMIT",
    }
}

impl SolverError {
    /// Classify the error into the coarse taxonomy used by callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unreachable { .. } => ErrorKind::Unreachable,
            Self::NegativeCycle { .. } => ErrorKind::NegativeCycle,
            Self::Degenerate { .. } | Self::IterationLimit { .. } => ErrorKind::Degenerate,
            _ => ErrorKind::InvalidInput,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SolverError>;
