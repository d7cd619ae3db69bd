//! Fixed-dimension row-major tables.
//!
//! Capacity, flow, cost and allocation tables all share this container. The
//! dimensions are fixed at construction; [`Matrix::get`] is the checked
//! accessor and indexing with `(row, col)` panics on out-of-range cells.

use std::ops::{Index, IndexMut};

use crate::error::{Result, SolverError};

/// A dense `rows × cols` table stored in row-major order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Creates a matrix with every cell set to `value`.
    ///
    /// # Examples
    /// ```
    /// use opsuite_core::Matrix;
    ///
    /// let zeros = Matrix::filled(2, 3, 0_i64);
    /// assert_eq!(zeros.rows(), 2);
    /// assert_eq!(zeros.cols(), 3);
    /// assert_eq!(zeros.get(1, 2), Some(&0));
    /// ```
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows.saturating_mul(cols)],
        }
    }
}

impl<T> Matrix<T> {
    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    /// Returns [`SolverError::DimensionMismatch`] when the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(row_count.saturating_mul(cols));
        for row in rows {
            if row.len() != cols {
                return Err(SolverError::DimensionMismatch {
                    what: "matrix row length",
                    expected: cols,
                    actual: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// Number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rows(&self) -> usize { self.rows }

    /// Number of columns.
    #[must_use]
    #[rustfmt::skip]
    pub const fn cols(&self) -> usize { self.cols }

    /// Returns `true` when the matrix holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    const fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns the cell at `(row, col)` or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.offset(row, col).and_then(|offset| self.cells.get(offset))
    }

    /// Mutable counterpart of [`Self::get`].
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.offset(row, col)
            .and_then(|offset| self.cells.get_mut(offset))
    }

    /// Returns row `row` as a slice.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.cells.get(start..start + self.cols)
    }

    /// Iterates `(row, col, value)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(offset, value)| (offset / cols, offset % cols, value))
    }

    /// Applies `f` to every cell, producing a matrix of the same shape.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Returns the rows as nested vectors, mainly for rendering.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        (0..self.rows)
            .filter_map(|row| self.row(row).map(<[T]>::to_vec))
            .collect()
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.get(row, col) {
            Some(value) => value,
            None => panic!(
                "cell ({row}, {col}) outside {}x{} matrix",
                self.rows, self.cols
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let (rows, cols) = (self.rows, self.cols);
        match self.get_mut(row, col) {
            Some(value) => value,
            None => panic!("cell ({row}, {col}) outside {rows}x{cols} matrix"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).expect_err("ragged rows");
        assert_eq!(
            err,
            SolverError::DimensionMismatch {
                what: "matrix row length",
                expected: 2,
                actual: 1,
            }
        );
    }

    #[rstest]
    #[case(0, 0, Some(1))]
    #[case(1, 2, Some(6))]
    #[case(2, 0, None)]
    #[case(0, 3, None)]
    fn get_is_bounds_checked(
        #[case] row: usize,
        #[case] col: usize,
        #[case] expected: Option<i32>,
    ) {
        let matrix = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).expect("rectangular");
        assert_eq!(matrix.get(row, col).copied(), expected);
    }

    #[test]
    fn iter_cells_walks_row_major() {
        let matrix = Matrix::from_rows(vec![vec!['a', 'b'], vec!['c', 'd']]).expect("rectangular");
        let cells: Vec<_> = matrix.iter_cells().map(|(r, c, v)| (r, c, *v)).collect();
        assert_eq!(
            cells,
            vec![(0, 0, 'a'), (0, 1, 'b'), (1, 0, 'c'), (1, 1, 'd')]
        );
    }

    #[test]
    #[should_panic(expected = "outside 2x2 matrix")]
    fn indexing_out_of_range_panics() {
        let matrix = Matrix::filled(2, 2, 0);
        let value = matrix[(2, 0)];
        assert_eq!(value, 0);
    }
}
