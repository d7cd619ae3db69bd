//! North-West corner rule.

use tracing::{debug, instrument};

use super::{Allocation, TransportProblem};

/// Fills the tableau from the top-left cell, shipping as much as possible
/// before moving down (source exhausted) or right (destination satisfied).
/// When both run out together the walk moves diagonally.
///
/// The result is always feasible but ignores costs entirely.
#[must_use]
#[instrument(
    name = "transport.north_west",
    skip(problem),
    fields(rows = problem.rows(), cols = problem.cols()),
)]
pub fn north_west_corner(problem: &TransportProblem) -> Allocation {
    let mut allocation = Allocation::zeros(problem);
    let mut supply = problem.supply().to_vec();
    let mut demand = problem.demand().to_vec();
    let (mut row, mut col) = (0, 0);

    while row < supply.len() && col < demand.len() {
        let shipped = supply[row].min(demand[col]);
        allocation.add(row, col, shipped);
        supply[row] -= shipped;
        demand[col] -= shipped;
        let source_done = supply[row] == 0;
        let destination_done = demand[col] == 0;
        if source_done {
            row += 1;
        }
        if destination_done {
            col += 1;
        }
    }

    debug!(cost = allocation.total_cost(problem), "north-west allocation built");
    allocation
}
