//! Balanced transportation problems.
//!
//! [`north_west_corner`] and [`least_cost`] build an initial feasible
//! [`Allocation`]; [`stepping_stone`] improves any feasible allocation until
//! no closed loop lowers the total cost.

mod least_cost;
mod north_west;
mod stepping_stone;

pub use self::{
    least_cost::least_cost,
    north_west::north_west_corner,
    stepping_stone::{
        DEFAULT_MAX_PIVOTS,
        SteppingStoneLimits,
        SteppingStoneOutcome,
        stepping_stone,
        stepping_stone_with_limits,
    },
};

use crate::{
    error::{Result, SolverError},
    matrix::Matrix,
};

/// Costs, supplies and demands of a balanced transportation problem.
///
/// # Examples
/// ```
/// use opsuite_core::transport::{TransportProblem, north_west_corner};
///
/// let problem = TransportProblem::from_rows(
///     vec![vec![4, 6], vec![5, 3]],
///     vec![3, 5],
///     vec![4, 4],
/// )?;
/// let allocation = north_west_corner(&problem);
/// assert_eq!(allocation.to_rows(), vec![vec![3, 0], vec![1, 4]]);
/// assert_eq!(allocation.total_cost(&problem), 29);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportProblem {
    costs: Matrix<i64>,
    supply: Vec<i64>,
    demand: Vec<i64>,
}

impl TransportProblem {
    /// Validates and wraps a problem instance.
    ///
    /// # Errors
    /// - [`SolverError::EmptyInstance`] when there are no sources or no
    ///   destinations.
    /// - [`SolverError::DimensionMismatch`] when `costs` is not
    ///   `supply.len() × demand.len()`.
    /// - [`SolverError::NegativeQuantity`] for any negative entry.
    /// - [`SolverError::Unbalanced`] when total supply and demand differ.
    pub fn new(costs: Matrix<i64>, supply: Vec<i64>, demand: Vec<i64>) -> Result<Self> {
        if supply.is_empty() {
            return Err(SolverError::EmptyInstance { what: "supply" });
        }
        if demand.is_empty() {
            return Err(SolverError::EmptyInstance { what: "demand" });
        }
        if costs.rows() != supply.len() {
            return Err(SolverError::DimensionMismatch {
                what: "cost rows",
                expected: supply.len(),
                actual: costs.rows(),
            });
        }
        if costs.cols() != demand.len() {
            return Err(SolverError::DimensionMismatch {
                what: "cost columns",
                expected: demand.len(),
                actual: costs.cols(),
            });
        }
        let cost_cells = costs.iter_cells().map(|(_, _, cost)| *cost);
        check_non_negative("cost", cost_cells)?;
        check_non_negative("supply", supply.iter().copied())?;
        check_non_negative("demand", demand.iter().copied())?;

        let total_supply: i64 = supply.iter().sum();
        let total_demand: i64 = demand.iter().sum();
        if total_supply != total_demand {
            return Err(SolverError::Unbalanced {
                supply: total_supply,
                demand: total_demand,
            });
        }
        Ok(Self {
            costs,
            supply,
            demand,
        })
    }

    /// Convenience constructor taking the cost table as nested rows.
    ///
    /// # Errors
    /// As [`Self::new`], plus [`SolverError::DimensionMismatch`] for ragged
    /// rows.
    pub fn from_rows(costs: Vec<Vec<i64>>, supply: Vec<i64>, demand: Vec<i64>) -> Result<Self> {
        Self::new(Matrix::from_rows(costs)?, supply, demand)
    }

    /// Unit shipping cost per `(source, destination)`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn costs(&self) -> &Matrix<i64> { &self.costs }

    /// Units available at each source.
    #[must_use]
    #[rustfmt::skip]
    pub fn supply(&self) -> &[i64] { &self.supply }

    /// Units required at each destination.
    #[must_use]
    #[rustfmt::skip]
    pub fn demand(&self) -> &[i64] { &self.demand }

    /// Number of sources.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.supply.len()
    }

    /// Number of destinations.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.demand.len()
    }

    /// Total units shipped by any feasible allocation.
    #[must_use]
    pub fn total_supply(&self) -> i64 {
        self.supply.iter().sum()
    }

    fn cost(&self, row: usize, col: usize) -> i64 {
        self.costs.get(row, col).copied().unwrap_or(0)
    }
}

fn check_non_negative(what: &'static str, values: impl Iterator<Item = i64>) -> Result<()> {
    for (index, value) in values.enumerate() {
        if value < 0 {
            return Err(SolverError::NegativeQuantity { what, index, value });
        }
    }
    Ok(())
}

/// Units shipped per `(source, destination)` cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    cells: Matrix<i64>,
}

impl Allocation {
    fn zeros(problem: &TransportProblem) -> Self {
        Self {
            cells: Matrix::filled(problem.rows(), problem.cols(), 0),
        }
    }

    /// Wraps an externally supplied table.
    ///
    /// # Errors
    /// Returns [`SolverError::NegativeQuantity`] when a cell is negative.
    pub fn from_matrix(cells: Matrix<i64>) -> Result<Self> {
        check_non_negative("allocation", cells.iter_cells().map(|(_, _, value)| *value))?;
        Ok(Self { cells })
    }

    /// Convenience constructor taking nested rows.
    ///
    /// # Errors
    /// As [`Self::from_matrix`], plus [`SolverError::DimensionMismatch`] for
    /// ragged rows.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        Self::from_matrix(Matrix::from_rows(rows)?)
    }

    /// Units in cell `(row, col)`, or 0 outside the table.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.cells.get(row, col).copied().unwrap_or(0)
    }

    fn add(&mut self, row: usize, col: usize, delta: i64) {
        if let Some(cell) = self.cells.get_mut(row, col) {
            *cell += delta;
        }
    }

    /// The underlying table.
    #[must_use]
    #[rustfmt::skip]
    pub const fn as_matrix(&self) -> &Matrix<i64> { &self.cells }

    /// Rows as nested vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.cells.to_rows()
    }

    /// Sum of `units × unit cost` over every cell, saturating at the `i64`
    /// bounds.
    #[must_use]
    pub fn total_cost(&self, problem: &TransportProblem) -> i64 {
        self.cells
            .iter_cells()
            .map(|(row, col, units)| units.saturating_mul(problem.cost(row, col)))
            .fold(0_i64, i64::saturating_add)
    }

    /// Units leaving each source.
    #[must_use]
    pub fn row_sums(&self) -> Vec<i64> {
        (0..self.cells.rows())
            .map(|row| self.cells.row(row).map_or(0, |cells| cells.iter().sum()))
            .collect()
    }

    /// Units reaching each destination.
    #[must_use]
    pub fn col_sums(&self) -> Vec<i64> {
        let mut sums = vec![0; self.cells.cols()];
        for (_, col, units) in self.cells.iter_cells() {
            if let Some(sum) = sums.get_mut(col) {
                *sum += units;
            }
        }
        sums
    }

    /// Cells holding a positive allocation, in row-major order.
    #[must_use]
    pub fn basic_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter_cells()
            .filter(|(_, _, units)| **units > 0)
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    /// Checks that the allocation has the problem's shape and ships exactly
    /// the supplies and demands.
    ///
    /// # Errors
    /// - [`SolverError::DimensionMismatch`] when the shapes differ.
    /// - [`SolverError::NegativeQuantity`] for a negative cell.
    /// - [`SolverError::InfeasibleAllocation`] for the first row, then
    ///   column, whose sum is wrong.
    pub fn check_feasible(&self, problem: &TransportProblem) -> Result<()> {
        if self.cells.rows() != problem.rows() {
            return Err(SolverError::DimensionMismatch {
                what: "allocation rows",
                expected: problem.rows(),
                actual: self.cells.rows(),
            });
        }
        if self.cells.cols() != problem.cols() {
            return Err(SolverError::DimensionMismatch {
                what: "allocation columns",
                expected: problem.cols(),
                actual: self.cells.cols(),
            });
        }
        check_non_negative("allocation", self.cells.iter_cells().map(|(_, _, units)| *units))?;
        check_sums("row", &self.row_sums(), problem.supply())?;
        check_sums("column", &self.col_sums(), problem.demand())
    }
}

fn check_sums(axis: &'static str, actual: &[i64], expected: &[i64]) -> Result<()> {
    let mismatch = actual
        .iter()
        .zip(expected)
        .position(|(actual, expected)| actual != expected);
    mismatch.map_or(Ok(()), |index| {
        Err(SolverError::InfeasibleAllocation {
            axis,
            index,
            expected: expected.get(index).copied().unwrap_or(0),
            actual: actual.get(index).copied().unwrap_or(0),
        })
    })
}

#[cfg(test)]
mod tests;
