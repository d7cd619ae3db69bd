//! Least-cost (matrix minimum) rule.

use tracing::{debug, instrument};

use super::{Allocation, TransportProblem};

/// Repeatedly ships through the cheapest cell whose source and destination
/// are both still open, closing whichever of the two runs out.
///
/// Ties go to the first cell in row-major order. Every step closes at least
/// one source or destination, so the walk ends after at most `rows + cols`
/// steps.
#[must_use]
#[instrument(
    name = "transport.least_cost",
    skip(problem),
    fields(rows = problem.rows(), cols = problem.cols()),
)]
pub fn least_cost(problem: &TransportProblem) -> Allocation {
    let mut allocation = Allocation::zeros(problem);
    let mut supply = problem.supply().to_vec();
    let mut demand = problem.demand().to_vec();
    let mut open_rows = vec![true; supply.len()];
    let mut open_cols = vec![true; demand.len()];

    loop {
        let cheapest = problem
            .costs()
            .iter_cells()
            .filter(|&(row, col, _)| open_rows[row] && open_cols[col])
            .min_by_key(|&(_, _, cost)| *cost)
            .map(|(row, col, _)| (row, col));
        let Some((row, col)) = cheapest else {
            break;
        };
        let shipped = supply[row].min(demand[col]);
        allocation.add(row, col, shipped);
        supply[row] -= shipped;
        demand[col] -= shipped;
        if supply[row] == 0 {
            open_rows[row] = false;
        }
        if demand[col] == 0 {
            open_cols[col] = false;
        }
    }

    debug!(cost = allocation.total_cost(problem), "least-cost allocation built");
    allocation
}
