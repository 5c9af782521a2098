//! Dense matrices stored in row-major order.
//!
//! A [`Matrix`] is always rectangular. Ragged input is rejected when the
//! matrix is constructed, so nothing downstream of the constructors has to
//! deal with rows of different lengths.

use std::{
    fmt::{Debug, Display},
    ops::Index,
};

use itertools::Itertools;
use thiserror::Error;

use crate::entry::Entry;
use crate::shift::rotated;

/// The rows of a matrix don't all have the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("row {row} has {found} columns, expected {expected}")]
pub struct ShapeError {
    /// Index of the first row whose length differs from the first row.
    pub row: usize,
    /// Length of the first row.
    pub expected: usize,
    /// Length of the offending row.
    pub found: usize,
}

/// Checks that all rows have the same length as the first one.
fn check_shape<T, U: AsRef<[T]>>(rows: &[U]) -> Result<usize, ShapeError> {
    let expected = rows.first().map_or(0, |r| r.as_ref().len());
    match rows.iter().position(|r| r.as_ref().len() != expected) {
        Some(row) => Err(ShapeError {
            row,
            expected,
            found: rows[row].as_ref().len(),
        }),
        None => Ok(expected),
    }
}

/// Sums the entries yielded by `iter`, or `None` if the sum overflows.
fn checked_sum<'a, T: Entry>(iter: impl Iterator<Item = &'a T>) -> Option<T> {
    iter.fold(Some(T::zero()), |acc, e| acc?.checked_add(e))
}

/// A rectangular matrix.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Matrix<T = i64> {
    entries: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    /// Return an empty matrix.
    pub fn empty() -> Self {
        Self { entries: Vec::new(), rows: 0, cols: 0 }
    }

    /// Creates a matrix from an array of rows.
    pub fn from_array<const RS: usize, const CS: usize>(a: [[T; CS]; RS]) -> Self {
        let mut entries = Vec::with_capacity(RS * CS);
        for row in a {
            entries.extend(row);
        }

        Self { entries, rows: RS, cols: CS }
    }

    /// Creates a matrix from a vector of rows, taking ownership of the entries.
    pub fn from_row_vecs(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let cols = check_shape::<T, _>(&rows)?;
        let num_rows = rows.len();
        let entries = rows.into_iter().flatten().collect();
        Ok(Self { entries, rows: num_rows, cols })
    }

    /// Creates a matrix from a slice of rows.
    pub fn try_from_rows<U>(rows: &[U]) -> Result<Self, ShapeError>
    where
        U: AsRef<[T]>,
        T: Clone,
    {
        let cols = check_shape::<T, U>(rows)?;
        let entries = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().cloned())
            .collect();
        Ok(Self { entries, rows: rows.len(), cols })
    }

    /// The number of rows of the matrix.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// The number of columns of the matrix.
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// Is the matrix empty, i.e. has it zero rows or columns?
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Returns the row `r`.
    pub fn row(&self, r: usize) -> &[T] {
        assert!(r < self.rows, "Row index {r} out of range for {} rows.", self.rows);
        &self.entries[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns a reference to the entry at row `r` and column `c`.
    pub fn entry(&self, r: usize, c: usize) -> &T {
        assert!(c < self.cols, "Column index {c} out of range for {} columns.", self.cols);
        &self.row(r)[c]
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + DoubleEndedIterator {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Returns an iterator over the column `c`.
    pub fn col(&self, c: usize) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator {
        assert!(c < self.cols, "Column index {c} out of range for {} columns.", self.cols);
        self.rows().map(move |r| &r[c])
    }

    /// Returns the rows as separate vectors.
    pub fn to_rows(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Returns a copy of the matrix where row `i` is rotated right by
    /// `shifts[i]` positions.
    ///
    /// # Panics
    ///
    /// Panics if there isn't exactly one shift per row or if a shift is not
    /// less than the number of columns.
    pub fn shifted(&self, shifts: &[usize]) -> Self
    where
        T: Clone,
    {
        assert_eq!(shifts.len(), self.rows, "Need exactly one shift per row.");
        if let Some(s) = shifts.iter().find(|&&s| s >= self.cols) {
            panic!("Shift {s} out of range for {} columns.", self.cols);
        }
        let mut entries = Vec::with_capacity(self.entries.len());
        for (row, &s) in self.rows().zip(shifts) {
            entries.extend(rotated(row, s));
        }

        Self { entries, rows: self.rows, cols: self.cols }
    }
}

impl<T: Entry> Matrix<T> {
    /// Returns the sum of each column.
    ///
    /// A sum that overflows `T` is `None`.
    pub fn column_sums(&self) -> Vec<Option<T>> {
        (0..self.cols).map(|c| checked_sum(self.col(c))).collect()
    }

    /// Does every column sum to `target`?
    ///
    /// A matrix without any rows or columns has no column that could sum to
    /// the target and is rejected.
    pub fn columns_sum_to(&self, target: &T) -> bool {
        if self.is_empty() {
            return false;
        }

        (0..self.cols).all(|c| checked_sum(self.col(c)).as_ref() == Some(target))
    }
}

/// Does every column of `rows` sum to `target`?
///
/// Returns `Ok(false)` when there are no rows or the first row is empty, and
/// an error if the rows don't all have the same length. An overflowing column
/// sum can't equal any `T`, so it is treated like any other mismatch.
pub fn check_column_sums<T, U>(rows: &[U], target: &T) -> Result<bool, ShapeError>
where
    T: Entry,
    U: AsRef<[T]>,
{
    if rows.is_empty() {
        return Ok(false);
    }

    let cols = check_shape::<T, U>(rows)?;
    if cols == 0 {
        return Ok(false);
    }

    Ok((0..cols).all(|c| {
        checked_sum(rows.iter().map(|r| &r.as_ref()[c])).as_ref() == Some(target)
    }))
}

impl<T> Index<usize> for Matrix<T> {
    type Output = [T];

    fn index(&self, index: usize) -> &Self::Output {
        self.row(index)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (r, c): (usize, usize)) -> &Self::Output {
        self.entry(r, c)
    }
}

impl<T: Debug> Debug for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

/// Prints every row in its own line, e.g. `[90, 10]`.
impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, r) in self.rows().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "[{}]", r.iter().join(", "))?;
        }
        Ok(())
    }
}
