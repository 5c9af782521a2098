//! Exhaustive search for row shifts that make every column sum to a target.
//!
//! The search tries every assignment of right shifts to the rows in the order
//! of the [`Odometer`], i.e. lexicographically with the shift of the last row
//! changing fastest, and stops at the first assignment for which all column
//! sums equal the target. If there is a solution, the one returned is
//! therefore always the lexicographically smallest.
//!
//! Nothing is pruned. A matrix with `R` rows and `C` columns needs up to
//! `C^R` checks, which [`total_combinations`] computes up front.

use num_bigint::BigUint;
use thiserror::Error;
use tracing::{debug, info};

use crate::entry::Entry;
use crate::matrix::Matrix;
use crate::odometer::{Odometer, total_assignments};

/// How many candidates are checked between two progress reports by default.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 5000;

/// Why the search couldn't even start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CannotSolve {
    #[error("Matrix is empty. Cannot solve.")]
    NoRows,

    #[error("Matrix rows are empty. Cannot solve.")]
    NoColumns,
}

/// The result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<T = i64> {
    /// The shifts in `shifts` turn the matrix into `matrix`, whose columns all
    /// sum to the target. `checked` includes the successful candidate.
    Found {
        shifts: Vec<usize>,
        matrix: Matrix<T>,
        checked: u64,
    },

    /// None of the `checked` candidates worked. This is all of them.
    Exhausted { checked: u64 },

    /// The matrix has no rows or no columns.
    CannotSolve(CannotSolve),

    /// The cancellation predicate fired after `checked` candidates.
    Cancelled { checked: u64 },
}

impl<T> SearchOutcome<T> {
    /// Was a solution found?
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// The number of candidates that were checked.
    pub fn checked(&self) -> u64 {
        match self {
            SearchOutcome::Found { checked, .. }
            | SearchOutcome::Exhausted { checked }
            | SearchOutcome::Cancelled { checked } => *checked,
            SearchOutcome::CannotSolve(_) => 0,
        }
    }
}

/// The number of shift assignments for `matrix`, i.e. `cols^rows`.
pub fn total_combinations<T>(matrix: &Matrix<T>) -> BigUint {
    total_assignments(matrix.num_rows(), matrix.num_cols())
}

/// Searches for shifts that make every column of `matrix` sum to `target`
/// without progress reporting or cancellation.
pub fn search<T: Entry>(matrix: &Matrix<T>, target: T) -> SearchOutcome<T> {
    Search::new(matrix, target).run()
}

/// A configurable search.
///
/// ```
/// use shiftsum::{Matrix, Search, SearchOutcome};
///
/// let m = Matrix::from_array([[10, 90], [10, 90]]);
/// let outcome = Search::new(&m, 100)
///     .progress_interval(1)
///     .on_progress(|checked, total| println!("{checked}/{total}"))
///     .run();
///
/// let SearchOutcome::Found { shifts, matrix, .. } = outcome else {
///     panic!("there is a solution");
/// };
/// assert_eq!(shifts, [0, 1]);
/// assert_eq!(matrix, Matrix::from_array([[10, 90], [90, 10]]));
/// ```
pub struct Search<'a, T> {
    matrix: &'a Matrix<T>,
    target: T,
    progress_interval: u64,
    progress: Option<Box<dyn FnMut(u64, &BigUint) + 'a>>,
    cancel: Option<Box<dyn FnMut() -> bool + 'a>>,
}

impl<'a, T: Entry> Search<'a, T> {
    pub fn new(matrix: &'a Matrix<T>, target: T) -> Self {
        Self {
            matrix,
            target,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            progress: None,
            cancel: None,
        }
    }

    /// Report progress every `n` candidates. Zero disables reporting.
    pub fn progress_interval(mut self, n: u64) -> Self {
        self.progress_interval = n;
        self
    }

    /// Called with the number of checked candidates and the total number of
    /// candidates every [`Search::progress_interval`] candidates.
    pub fn on_progress(mut self, f: impl FnMut(u64, &BigUint) + 'a) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    /// Polled before every candidate. The search stops with
    /// [`SearchOutcome::Cancelled`] as soon as this returns `true`.
    pub fn cancel_when(mut self, f: impl FnMut() -> bool + 'a) -> Self {
        self.cancel = Some(Box::new(f));
        self
    }

    /// Runs the search.
    pub fn run(mut self) -> SearchOutcome<T> {
        let rows = self.matrix.num_rows();
        let cols = self.matrix.num_cols();
        if rows == 0 {
            return SearchOutcome::CannotSolve(CannotSolve::NoRows);
        }
        if cols == 0 {
            return SearchOutcome::CannotSolve(CannotSolve::NoColumns);
        }

        let total = total_combinations(self.matrix);
        debug!(rows, cols, %total, target = %self.target, "Starting shift search");

        let mut odometer = Odometer::new(rows, cols);
        let mut checked = 0u64;
        while let Some(shifts) = odometer.advance() {
            if let Some(cancel) = self.cancel.as_mut() {
                if cancel() {
                    info!(checked, "Search cancelled");
                    return SearchOutcome::Cancelled { checked };
                }
            }

            checked += 1;
            if self.progress_interval != 0 && checked % self.progress_interval == 0 {
                if let Some(progress) = self.progress.as_mut() {
                    progress(checked, &total);
                }
            }

            let candidate = self.matrix.shifted(shifts);
            if candidate.columns_sum_to(&self.target) {
                debug!(?shifts, checked, "Found shifts");
                return SearchOutcome::Found {
                    shifts: shifts.to_vec(),
                    matrix: candidate,
                    checked,
                };
            }
        }

        debug!(checked, "Search exhausted");
        SearchOutcome::Exhausted { checked }
    }
}
