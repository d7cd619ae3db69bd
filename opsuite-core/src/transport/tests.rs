//! Tests for the transportation engines.

use opsuite_test_support::fixtures::transport as tableau;
use proptest::prelude::*;
use rstest::rstest;

use crate::{
    error::{ErrorKind, SolverError},
    matrix::Matrix,
    test_utils::suite_proptest_config,
};

use super::{
    Allocation,
    SteppingStoneLimits,
    TransportProblem,
    least_cost,
    north_west_corner,
    stepping_stone,
    stepping_stone_with_limits,
};

fn classic() -> TransportProblem {
    TransportProblem::from_rows(
        tableau::cost_rows(),
        tableau::SUPPLY.to_vec(),
        tableau::DEMAND.to_vec(),
    )
    .expect("balanced problem")
}

const CLASSIC_OPTIMUM: [[i64; 4]; 3] = [[5, 0, 0, 2], [0, 2, 7, 0], [0, 6, 0, 12]];

#[test]
fn north_west_walks_the_staircase() {
    let problem = classic();
    let allocation = north_west_corner(&problem);
    assert_eq!(
        allocation.to_rows(),
        vec![vec![5, 2, 0, 0], vec![0, 6, 3, 0], vec![0, 0, 4, 14]]
    );
    assert_eq!(allocation.total_cost(&problem), tableau::NORTH_WEST_COST);
    assert_eq!(allocation.basic_cells().len(), 6);
    allocation.check_feasible(&problem).expect("feasible");
}

#[test]
fn least_cost_starts_from_the_cheapest_cell() {
    let problem = classic();
    let allocation = least_cost(&problem);
    assert_eq!(
        allocation.to_rows(),
        vec![vec![0, 0, 0, 7], vec![2, 0, 7, 0], vec![3, 8, 0, 7]]
    );
    assert_eq!(allocation.total_cost(&problem), tableau::LEAST_COST_COST);
    allocation.check_feasible(&problem).expect("feasible");
}

#[rstest]
#[case::north_west(north_west_corner as fn(&TransportProblem) -> Allocation, 1015)]
#[case::least_cost(least_cost as fn(&TransportProblem) -> Allocation, 814)]
fn stepping_stone_reaches_the_optimum(
    #[case] initial: fn(&TransportProblem) -> Allocation,
    #[case] initial_cost: i64,
) {
    let problem = classic();
    let outcome = stepping_stone(&problem, &initial(&problem)).expect("optimisable");
    assert_eq!(outcome.initial_cost(), initial_cost);
    assert_eq!(outcome.final_cost(), tableau::OPTIMAL_COST);
    assert_eq!(outcome.pivots(), 2);
    let expected: Vec<Vec<i64>> = CLASSIC_OPTIMUM.iter().map(|row| row.to_vec()).collect();
    assert_eq!(outcome.allocation().to_rows(), expected);
}

#[test]
fn degenerate_start_pivots_through_a_zero_basis_cell() {
    let problem = TransportProblem::from_rows(vec![vec![3, 1], vec![1, 3]], vec![5, 5], vec![5, 5])
        .expect("balanced problem");
    let start = north_west_corner(&problem);
    assert_eq!(start.to_rows(), vec![vec![5, 0], vec![0, 5]]);
    let outcome = stepping_stone(&problem, &start).expect("optimisable");
    assert_eq!(outcome.allocation().to_rows(), vec![vec![0, 5], vec![5, 0]]);
    assert_eq!(outcome.pivots(), 1);
    assert_eq!(outcome.final_cost(), 10);
}

#[test]
fn loops_among_allocated_cells_are_broken_first() {
    let problem = TransportProblem::from_rows(vec![vec![1, 2], vec![3, 1]], vec![5, 5], vec![5, 5])
        .expect("balanced problem");
    let start = Allocation::from_rows(vec![vec![3, 2], vec![2, 3]]).expect("non-negative");
    let outcome = stepping_stone(&problem, &start).expect("optimisable");
    assert_eq!(outcome.initial_cost(), 16);
    assert_eq!(outcome.final_cost(), 10);
    assert_eq!(outcome.pivots(), 0);
    assert_eq!(outcome.loop_breaks(), 1);
    assert_eq!(outcome.allocation().to_rows(), vec![vec![5, 0], vec![0, 5]]);
}

#[rstest]
#[case::flat_square(vec![vec![1, 1], vec![1, 1]], vec![vec![1, 1], vec![1, 1]], 4)]
#[case::flat_wide(vec![vec![2, 2, 2], vec![2, 2, 2]], vec![vec![1, 2, 1], vec![2, 1, 1]], 16)]
fn optimal_inputs_with_zero_cost_loops_are_returned_unchanged(
    #[case] costs: Vec<Vec<i64>>,
    #[case] rows: Vec<Vec<i64>>,
    #[case] cost: i64,
) {
    let start = Allocation::from_rows(rows).expect("non-negative");
    let problem = TransportProblem::from_rows(costs, start.row_sums(), start.col_sums())
        .expect("balanced problem");
    let outcome = stepping_stone(&problem, &start).expect("optimisable");
    assert_eq!(outcome.allocation(), &start);
    assert_eq!(outcome.final_cost(), cost);
    assert_eq!(outcome.pivots(), 0);
    assert_eq!(outcome.loop_breaks(), 0);
}

#[test]
fn total_cost_saturates_on_huge_quantities() {
    let problem = TransportProblem::from_rows(vec![vec![i64::MAX, 2]], vec![4], vec![2, 2])
        .expect("balanced problem");
    let allocation = north_west_corner(&problem);
    assert_eq!(allocation.to_rows(), vec![vec![2, 2]]);
    assert_eq!(allocation.total_cost(&problem), i64::MAX);
}

#[test]
fn pivot_cap_is_reported() {
    let problem = classic();
    let limits = SteppingStoneLimits {
        max_pivots: 0,
        ..SteppingStoneLimits::default()
    };
    let err = stepping_stone_with_limits(&problem, &north_west_corner(&problem), limits)
        .expect_err("an improving pivot exists");
    assert_eq!(err, SolverError::IterationLimit { limit: 0 });
    assert_eq!(err.kind(), ErrorKind::Degenerate);
}

#[test]
fn shallow_depth_guard_reports_degeneracy() {
    let problem = classic();
    let limits = SteppingStoneLimits {
        max_depth: Some(1),
        ..SteppingStoneLimits::default()
    };
    let err = stepping_stone_with_limits(&problem, &north_west_corner(&problem), limits)
        .expect_err("loops need at least three basis cells");
    assert_eq!(err, SolverError::Degenerate { row: 0, col: 2 });
}

#[rstest]
#[case::short_row(vec![vec![1, 1, 0, 0], vec![0; 4], vec![0; 4]], SolverError::InfeasibleAllocation { axis: "row", index: 0, expected: 7, actual: 2 })]
#[case::wrong_shape(vec![vec![7]], SolverError::DimensionMismatch { what: "allocation rows", expected: 3, actual: 1 })]
fn infeasible_allocations_are_rejected(#[case] rows: Vec<Vec<i64>>, #[case] expected: SolverError) {
    let problem = classic();
    let allocation = Allocation::from_rows(rows).expect("non-negative");
    assert_eq!(stepping_stone(&problem, &allocation), Err(expected));
}

#[rstest]
#[case::unbalanced(vec![vec![1, 2]], vec![5], vec![2, 2], SolverError::Unbalanced { supply: 5, demand: 4 })]
#[case::negative_cost(vec![vec![1, -2]], vec![4], vec![2, 2], SolverError::NegativeQuantity { what: "cost", index: 1, value: -2 })]
#[case::negative_supply(vec![vec![1], vec![1]], vec![-1, 1], vec![0], SolverError::NegativeQuantity { what: "supply", index: 0, value: -1 })]
#[case::missing_row(vec![vec![1, 2]], vec![2, 2], vec![2, 2], SolverError::DimensionMismatch { what: "cost rows", expected: 2, actual: 1 })]
#[case::missing_col(vec![vec![1]], vec![2], vec![1, 1], SolverError::DimensionMismatch { what: "cost columns", expected: 2, actual: 1 })]
#[case::no_sources(vec![], vec![], vec![1], SolverError::EmptyInstance { what: "supply" })]
fn invalid_problems_are_rejected(
    #[case] costs: Vec<Vec<i64>>,
    #[case] supply: Vec<i64>,
    #[case] demand: Vec<i64>,
    #[case] expected: SolverError,
) {
    assert_eq!(TransportProblem::from_rows(costs, supply, demand), Err(expected));
}

#[test]
fn negative_allocation_cells_are_rejected() {
    let cells = Matrix::from_rows(vec![vec![1, -1]]).expect("rectangular");
    assert_eq!(
        Allocation::from_matrix(cells),
        Err(SolverError::NegativeQuantity {
            what: "allocation",
            index: 1,
            value: -1
        })
    );
}

fn random_problem() -> impl Strategy<Value = TransportProblem> {
    (1_usize..5, 1_usize..5)
        .prop_flat_map(|(rows, cols)| {
            (
                prop::collection::vec(prop::collection::vec(0_i64..20, cols), rows),
                prop::collection::vec(0_i64..30, rows),
                prop::collection::vec(0_i64..30, cols),
            )
        })
        .prop_map(|(costs, mut supply, mut demand)| {
            let shortfall = supply.iter().sum::<i64>() - demand.iter().sum::<i64>();
            if shortfall > 0 {
                if let Some(last) = demand.last_mut() {
                    *last += shortfall;
                }
            } else if let Some(last) = supply.last_mut() {
                *last -= shortfall;
            }
            TransportProblem::from_rows(costs, supply, demand).expect("balanced problem")
        })
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn initial_rules_are_feasible(problem in random_problem()) {
        for allocation in [north_west_corner(&problem), least_cost(&problem)] {
            prop_assert_eq!(allocation.row_sums(), problem.supply());
            prop_assert_eq!(allocation.col_sums(), problem.demand());
            prop_assert!(allocation.basic_cells().len() < problem.rows() + problem.cols());
        }
    }

    #[test]
    fn stepping_stone_never_raises_cost(problem in random_problem()) {
        for start in [north_west_corner(&problem), least_cost(&problem)] {
            let outcome = stepping_stone(&problem, &start).expect("optimisable");
            prop_assert!(outcome.final_cost() <= outcome.initial_cost());
            prop_assert_eq!(outcome.final_cost(), outcome.allocation().total_cost(&problem));
            prop_assert!(outcome.allocation().check_feasible(&problem).is_ok());
        }
    }

    #[test]
    fn both_starts_reach_the_same_cost(problem in random_problem()) {
        let from_corner = stepping_stone(&problem, &north_west_corner(&problem)).expect("optimisable");
        let from_cheapest = stepping_stone(&problem, &least_cost(&problem)).expect("optimisable");
        prop_assert_eq!(from_corner.final_cost(), from_cheapest.final_cost());
    }

    #[test]
    fn optimal_allocations_are_left_alone(problem in random_problem()) {
        let first = stepping_stone(&problem, &least_cost(&problem)).expect("optimisable");
        let second = stepping_stone(&problem, first.allocation()).expect("optimisable");
        prop_assert_eq!(second.allocation(), first.allocation());
        prop_assert_eq!(second.final_cost(), first.final_cost());
    }

    #[test]
    fn flat_costs_leave_any_feasible_allocation_alone(
        rows in (1_usize..5, 1_usize..5).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(prop::collection::vec(0_i64..6, cols), rows)
        }),
        cost in 0_i64..10,
    ) {
        let start = Allocation::from_rows(rows).expect("non-negative");
        let costs = vec![vec![cost; start.col_sums().len()]; start.row_sums().len()];
        let problem = TransportProblem::from_rows(costs, start.row_sums(), start.col_sums())
            .expect("balanced problem");
        let outcome = stepping_stone(&problem, &start).expect("optimisable");
        prop_assert_eq!(outcome.allocation(), &start);
        prop_assert_eq!(outcome.pivots(), 0);
    }
}
