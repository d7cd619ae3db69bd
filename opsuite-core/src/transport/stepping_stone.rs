//! Stepping-stone optimisation.
//!
//! The optimiser keeps an explicit basis: `rows + cols - 1` cells forming a
//! spanning tree over the source and destination lines. Every non-basic
//! cell then closes exactly one loop with the basis. Basis cells may hold
//! zero units, which keeps degenerate tableaux pivotable.

use tracing::{debug, instrument, trace, warn};

use crate::{
    error::{Result, SolverError},
    matrix::Matrix,
    mst::DisjointSet,
};

use super::{Allocation, TransportProblem};

type Cell = (usize, usize);

/// Pivot cap used by [`SteppingStoneLimits::default`].
pub const DEFAULT_MAX_PIVOTS: usize = 10_000;

/// Safety caps for [`stepping_stone_with_limits`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SteppingStoneLimits {
    /// Improving pivots allowed before giving up.
    pub max_pivots: usize,
    /// Longest loop search, in cells. `None` means `2 * (rows + cols)`.
    pub max_depth: Option<usize>,
}

impl Default for SteppingStoneLimits {
    fn default() -> Self {
        Self {
            max_pivots: DEFAULT_MAX_PIVOTS,
            max_depth: None,
        }
    }
}

impl SteppingStoneLimits {
    fn depth_for(&self, problem: &TransportProblem) -> usize {
        self.max_depth
            .unwrap_or_else(|| 2 * (problem.rows() + problem.cols()))
    }
}

/// Result of [`stepping_stone`].
///
/// When the optimum costs the same as the allocation handed in, that
/// allocation is returned unchanged and both move counters read zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SteppingStoneOutcome {
    allocation: Allocation,
    pivots: usize,
    loop_breaks: usize,
    initial_cost: i64,
    final_cost: i64,
}

impl SteppingStoneOutcome {
    /// The optimised allocation.
    #[must_use]
    #[rustfmt::skip]
    pub const fn allocation(&self) -> &Allocation { &self.allocation }

    /// Consumes the outcome, returning the allocation.
    #[must_use]
    pub fn into_allocation(self) -> Allocation {
        self.allocation
    }

    /// Number of basis exchanges performed after the starting basis was
    /// built. Moves counted by [`Self::loop_breaks`] are not included.
    #[must_use]
    #[rustfmt::skip]
    pub const fn pivots(&self) -> usize { self.pivots }

    /// Number of times units were moved around a loop among the allocated
    /// cells while building the starting basis.
    #[must_use]
    #[rustfmt::skip]
    pub const fn loop_breaks(&self) -> usize { self.loop_breaks }

    /// Cost of the allocation handed in.
    #[must_use]
    #[rustfmt::skip]
    pub const fn initial_cost(&self) -> i64 { self.initial_cost }

    /// Cost of [`Self::allocation`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn final_cost(&self) -> i64 { self.final_cost }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Line {
    Row(usize),
    Col(usize),
}

struct Basis {
    cells: Vec<Cell>,
    member: Matrix<bool>,
}

impl Basis {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Vec::new(),
            member: Matrix::filled(rows, cols, false),
        }
    }

    fn contains(&self, (row, col): Cell) -> bool {
        self.member.get(row, col).copied().unwrap_or(false)
    }

    fn insert(&mut self, cell: Cell) {
        if let Some(flag) = self.member.get_mut(cell.0, cell.1) {
            if !*flag {
                *flag = true;
                self.cells.push(cell);
            }
        }
    }

    fn remove(&mut self, cell: Cell) {
        if let Some(flag) = self.member.get_mut(cell.0, cell.1) {
            *flag = false;
        }
        self.cells.retain(|&kept| kept != cell);
    }

    /// Basis cells on `line` other than `via`, paired with the line they lead to.
    fn turns(&self, line: Line, via: Option<Cell>) -> Vec<(Line, Cell)> {
        let candidates: Vec<(Line, Cell)> = match line {
            Line::Row(row) => (0..self.member.cols())
                .map(|col| (Line::Col(col), (row, col)))
                .collect(),
            Line::Col(col) => (0..self.member.rows())
                .map(|row| (Line::Row(row), (row, col)))
                .collect(),
        };
        candidates
            .into_iter()
            .filter(|&(_, cell)| Some(cell) != via && self.contains(cell))
            .collect()
    }

    /// Finds the closed loop through `entering`: a row move first, then
    /// alternating column and row moves over basis cells, ending with a
    /// column move back onto `entering`. The returned loop starts with
    /// `entering`. Returns `None` when no loop of at most `max_depth` basis
    /// cells exists.
    fn loop_through(&self, entering: Cell, max_depth: usize) -> Option<Vec<Cell>> {
        let (row, col) = entering;
        let target = Line::Col(col);
        let mut stack: Vec<(Line, Vec<Cell>)> = vec![(Line::Row(row), Vec::new())];
        while let Some((line, path)) = stack.pop() {
            if line == target {
                let mut cycle = Vec::with_capacity(path.len() + 1);
                cycle.push(entering);
                cycle.extend(path);
                return Some(cycle);
            }
            if path.len() >= max_depth {
                continue;
            }
            let via = path.last().copied();
            for (next, cell) in self.turns(line, via).into_iter().rev() {
                let mut extended = path.clone();
                extended.push(cell);
                stack.push((next, extended));
            }
        }
        None
    }
}

fn signs() -> impl Iterator<Item = i64> {
    [1_i64, -1].into_iter().cycle()
}

/// Change in total cost from shipping one unit around `cycle` with the
/// entering cell on the `+` side.
fn net_cost(problem: &TransportProblem, cycle: &[Cell]) -> i64 {
    cycle
        .iter()
        .zip(signs())
        .map(|(&(row, col), sign)| sign * problem.cost(row, col))
        .sum()
}

/// Largest shift along `cycle` in `direction` (`1` grows the entering cell,
/// `-1` shrinks it) and the loop position of the first cell it empties.
fn pivot_amount(allocation: &Allocation, cycle: &[Cell], direction: i64) -> Option<(i64, usize)> {
    let mut best: Option<(i64, usize)> = None;
    for (position, (&(row, col), sign)) in cycle.iter().zip(signs()).enumerate() {
        if sign * direction > 0 {
            continue;
        }
        let units = allocation.get(row, col);
        if best.is_none_or(|(least, _)| units < least) {
            best = Some((units, position));
        }
    }
    best
}

fn shift(allocation: &mut Allocation, cycle: &[Cell], direction: i64, amount: i64) {
    for (&(row, col), sign) in cycle.iter().zip(signs()) {
        allocation.add(row, col, sign * direction * amount);
    }
}

/// Builds a spanning-tree basis for `allocation`, breaking any loop among
/// the allocated cells on the way.
///
/// Allocated cells join in row-major order. One that closes a loop with the
/// cells already chosen pushes units around that loop in whichever direction
/// does not raise the cost until some cell empties; the emptied cell leaves
/// (or the newcomer is skipped if it emptied itself). Zero cells then fill
/// the tree in row-major order. Also returns how many loops moved units.
fn seed_basis(
    problem: &TransportProblem,
    allocation: &mut Allocation,
    max_depth: usize,
) -> (Basis, usize) {
    let (rows, cols) = (problem.rows(), problem.cols());
    let mut basis = Basis::new(rows, cols);
    let mut loop_breaks = 0_usize;

    for cell in allocation.basic_cells() {
        let Some(cycle) = basis.loop_through(cell, max_depth) else {
            basis.insert(cell);
            continue;
        };
        let direction = if net_cost(problem, &cycle) <= 0 { 1 } else { -1 };
        let Some((amount, leaving)) = pivot_amount(allocation, &cycle, direction) else {
            continue;
        };
        shift(allocation, &cycle, direction, amount);
        if amount > 0 {
            loop_breaks += 1;
        }
        trace!(?cell, amount, direction, "broke loop among allocated cells");
        if leaving == 0 {
            continue;
        }
        if let Some(&emptied) = cycle.get(leaving) {
            basis.remove(emptied);
        }
        basis.insert(cell);
    }

    let mut components = DisjointSet::new(rows + cols);
    for &(row, col) in &basis.cells {
        components.union(row, rows + col);
    }
    for row in 0..rows {
        for col in 0..cols {
            if !basis.contains((row, col)) && components.union(row, rows + col) {
                basis.insert((row, col));
            }
        }
    }
    (basis, loop_breaks)
}

/// Optimises a feasible allocation with the default [`SteppingStoneLimits`].
///
/// # Errors
/// See [`stepping_stone_with_limits`].
///
/// # Examples
/// ```
/// use opsuite_core::transport::{TransportProblem, north_west_corner, stepping_stone};
///
/// let problem = TransportProblem::from_rows(
///     vec![vec![4, 6], vec![5, 3]],
///     vec![3, 5],
///     vec![4, 4],
/// )?;
/// let outcome = stepping_stone(&problem, &north_west_corner(&problem))?;
/// assert_eq!(outcome.initial_cost(), 29);
/// assert_eq!(outcome.final_cost(), 29);
/// assert_eq!(outcome.pivots(), 0);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
pub fn stepping_stone(
    problem: &TransportProblem,
    allocation: &Allocation,
) -> Result<SteppingStoneOutcome> {
    stepping_stone_with_limits(problem, allocation, SteppingStoneLimits::default())
}

/// Optimises a feasible allocation.
///
/// Each pivot enters the non-basic cell whose loop has the most negative
/// net cost (first in row-major order on ties) and ships the smallest
/// amount found on the loop's `-` positions around it. The first `-` cell
/// holding that amount leaves the basis. The search stops when no loop has
/// a negative net cost.
///
/// An input that is already optimal comes back untouched, even when other
/// allocations share its cost.
///
/// # Errors
/// - [`SolverError::DimensionMismatch`], [`SolverError::NegativeQuantity`]
///   or [`SolverError::InfeasibleAllocation`] when `allocation` is not
///   feasible for `problem`.
/// - [`SolverError::Degenerate`] when a non-basic cell has no loop within
///   the depth limit or a pivot would drive a cell negative.
/// - [`SolverError::IterationLimit`] when `limits.max_pivots` pivots did not
///   reach an optimum.
#[instrument(
    name = "transport.stepping_stone",
    err,
    skip(problem, allocation),
    fields(rows = problem.rows(), cols = problem.cols()),
)]
pub fn stepping_stone_with_limits(
    problem: &TransportProblem,
    allocation: &Allocation,
    limits: SteppingStoneLimits,
) -> Result<SteppingStoneOutcome> {
    allocation.check_feasible(problem)?;
    let initial_cost = allocation.total_cost(problem);
    let max_depth = limits.depth_for(problem);
    let mut current = allocation.clone();
    let (mut basis, loop_breaks) = seed_basis(problem, &mut current, max_depth);
    let mut pivots = 0_usize;

    loop {
        let mut best: Option<(i64, Vec<Cell>)> = None;
        for row in 0..problem.rows() {
            for col in 0..problem.cols() {
                if basis.contains((row, col)) {
                    continue;
                }
                let cycle = basis
                    .loop_through((row, col), max_depth)
                    .ok_or(SolverError::Degenerate { row, col })?;
                let net = net_cost(problem, &cycle);
                if net < 0 && best.as_ref().is_none_or(|(lowest, _)| net < *lowest) {
                    best = Some((net, cycle));
                }
            }
        }
        let Some((net, cycle)) = best else {
            break;
        };
        let (row, col) = cycle.first().copied().unwrap_or_default();
        if pivots == limits.max_pivots {
            warn!(limit = limits.max_pivots, "pivot cap reached");
            return Err(SolverError::IterationLimit {
                limit: limits.max_pivots,
            });
        }
        let (amount, leaving) = pivot_amount(&current, &cycle, 1)
            .filter(|&(amount, _)| amount >= 0)
            .ok_or(SolverError::Degenerate { row, col })?;
        shift(&mut current, &cycle, 1, amount);
        if let Some(&emptied) = cycle.get(leaving) {
            basis.remove(emptied);
        }
        basis.insert((row, col));
        pivots += 1;
        trace!(row, col, net, amount, "pivoted");
    }

    let final_cost = current.total_cost(problem);
    debug!(initial_cost, final_cost, pivots, loop_breaks, "stepping-stone converged");
    if final_cost == initial_cost {
        return Ok(SteppingStoneOutcome {
            allocation: allocation.clone(),
            pivots: 0,
            loop_breaks: 0,
            initial_cost,
            final_cost,
        });
    }
    Ok(SteppingStoneOutcome {
        allocation: current,
        pivots,
        loop_breaks,
        initial_cost,
        final_cost,
    })
}
