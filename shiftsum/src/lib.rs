//! Finding circular row shifts of an integer matrix that make every column
//! sum to the same target.
//!
//! ```
//! use shiftsum::{Matrix, SearchOutcome, search};
//!
//! let m = Matrix::from_array([[90, 10], [90, 10]]);
//! match search(&m, 100) {
//!     SearchOutcome::Found { shifts, matrix, .. } => {
//!         assert_eq!(shifts, [0, 1]);
//!         assert_eq!(matrix.to_string(), "[90, 10]\n[10, 90]");
//!     }
//!     other => panic!("{other:?}"),
//! }
//! ```

pub mod config;
pub mod entry;
pub mod loader;
pub mod matrix;
pub mod odometer;
pub mod search;
pub mod shift;

pub use config::SearchConfig;
pub use entry::Entry;
pub use loader::{LoadError, LoadedMatrix, parse_matrix, read_matrix};
pub use matrix::{Matrix, ShapeError, check_column_sums};
pub use search::{CannotSolve, Search, SearchOutcome, search, total_combinations};
pub use shift::shift_row;
