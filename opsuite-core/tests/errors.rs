//! Stable codes and coarse kinds for every solver error.

use opsuite_core::{ErrorKind, SolverError, SolverErrorCode};
use rstest::rstest;

#[rstest]
#[case(SolverError::EmptyInstance { what: "graph" }, SolverErrorCode::EmptyInstance, "SOLVER_EMPTY_INSTANCE")]
#[case(
    SolverError::InvalidRange { parameter: "weights", min: 5, max: 1 },
    SolverErrorCode::InvalidRange,
    "SOLVER_INVALID_RANGE",
)]
#[case(
    SolverError::LabelCapacity { requested: 400, available: 325 },
    SolverErrorCode::LabelCapacity,
    "SOLVER_LABEL_CAPACITY",
)]
#[case(
    SolverError::UnknownVertex { label: "x9".to_owned() },
    SolverErrorCode::UnknownVertex,
    "SOLVER_UNKNOWN_VERTEX",
)]
#[case(SolverError::SourceIsSink { vertex: 0 }, SolverErrorCode::SourceIsSink, "SOLVER_SOURCE_IS_SINK")]
#[case(
    SolverError::NegativeWeight { from: 0, to: 1, weight: -3 },
    SolverErrorCode::NegativeWeight,
    "SOLVER_NEGATIVE_WEIGHT",
)]
#[case(
    SolverError::PredecessorOrder { task: 1, predecessor: 4 },
    SolverErrorCode::PredecessorOrder,
    "SOLVER_PREDECESSOR_ORDER",
)]
#[case(SolverError::Unbalanced { supply: 10, demand: 12 }, SolverErrorCode::Unbalanced, "SOLVER_UNBALANCED")]
#[case(SolverError::Unreachable { from: 0, to: 3 }, SolverErrorCode::Unreachable, "SOLVER_UNREACHABLE")]
#[case(SolverError::NegativeCycle { vertex: 2 }, SolverErrorCode::NegativeCycle, "SOLVER_NEGATIVE_CYCLE")]
#[case(SolverError::Degenerate { row: 1, col: 2 }, SolverErrorCode::Degenerate, "SOLVER_DEGENERATE")]
#[case(SolverError::IterationLimit { limit: 10 }, SolverErrorCode::IterationLimit, "SOLVER_ITERATION_LIMIT")]
fn returns_expected_code(
    #[case] error: SolverError,
    #[case] expected: SolverErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
    assert_eq!(error.code().to_string(), text);
}

#[rstest]
#[case(SolverError::UnknownTask { label: "T7".to_owned() }, ErrorKind::InvalidInput)]
#[case(SolverError::SelfLoop { vertex: 3 }, ErrorKind::InvalidInput)]
#[case(
    SolverError::InfeasibleAllocation { axis: "column", index: 0, expected: 4, actual: 3 },
    ErrorKind::InvalidInput,
)]
#[case(SolverError::Unreachable { from: 1, to: 0 }, ErrorKind::Unreachable)]
#[case(SolverError::NegativeCycle { vertex: 0 }, ErrorKind::NegativeCycle)]
#[case(SolverError::Degenerate { row: 0, col: 0 }, ErrorKind::Degenerate)]
#[case(SolverError::IterationLimit { limit: 1 }, ErrorKind::Degenerate)]
fn folds_into_coarse_kind(#[case] error: SolverError, #[case] expected: ErrorKind) {
    assert_eq!(error.kind(), expected);
}

#[test]
fn messages_name_the_offending_values() {
    let error = SolverError::NegativeQuantity {
        what: "supply",
        index: 2,
        value: -4,
    };
    assert_eq!(error.to_string(), "supply[2] is negative (-4)");
    assert_eq!(ErrorKind::NegativeCycle.to_string(), "negative cycle");
}
