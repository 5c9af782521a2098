//! Reading matrices from text.
//!
//! The format is one row per line with the entries separated by commas:
//! ```text
//! // Optional comment in the first line.
//! 90, 10
//! 10, 90
//! ```
//! Lines that can't be parsed are skipped with a warning. What remains has to
//! form a non-empty rectangular matrix.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::matrix::Matrix;

/// The file that is read if none is specified.
pub const DEFAULT_MATRIX_FILE: &str = "matrix.txt";

/// Errors when loading a matrix.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The input is empty.")]
    Empty,

    #[error("File '{}' is empty.", .0.display())]
    EmptyFile(PathBuf),

    #[error("No valid matrix data found.")]
    NoValidRows,

    #[error(
        "Matrix rows have inconsistent number of columns: \
        line {line_number} has {found}, expected {expected}."
    )]
    InconsistentColumns {
        line_number: usize,
        expected: usize,
        found: usize,
    },
}

/// A line that was skipped because it isn't a list of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based.
    pub line_number: usize,
    pub content: String,
}

/// A successfully loaded matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedMatrix {
    pub matrix: Matrix<i64>,

    /// The comment in the first line, without the leading `//`.
    pub comment: Option<String>,

    pub skipped: Vec<SkippedLine>,
}

/// Parses a single row. Whitespace around the entries is ignored.
pub fn parse_row(line: &str) -> Option<Vec<i64>> {
    line.trim()
        .split(',')
        .map(|e| e.trim().parse().ok())
        .collect()
}

/// Parses a matrix from text.
pub fn parse_matrix(text: &str) -> Result<LoadedMatrix, LoadError> {
    let mut lines = text.lines().enumerate().peekable();
    let Some(&(_, first)) = lines.peek() else {
        return Err(LoadError::Empty);
    };

    let comment = first.trim().strip_prefix("//").map(|c| c.trim().to_owned());
    if comment.is_some() {
        lines.next();
    }

    // Rows together with their line numbers.
    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (i, line) in lines {
        match parse_row(line) {
            Some(row) => rows.push((i + 1, row)),
            None => {
                let content = line.trim().to_owned();
                warn!(line_number = i + 1, %content, "Could not parse line, skipping");
                skipped.push(SkippedLine { line_number: i + 1, content });
            }
        }
    }

    if rows.is_empty() {
        return Err(LoadError::NoValidRows);
    }

    let (line_numbers, rows): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
    let matrix = Matrix::from_row_vecs(rows).map_err(|e| LoadError::InconsistentColumns {
        line_number: line_numbers[e.row],
        expected: e.expected,
        found: e.found,
    })?;

    debug!(
        rows = matrix.num_rows(),
        cols = matrix.num_cols(),
        skipped = skipped.len(),
        "Parsed matrix"
    );

    Ok(LoadedMatrix { matrix, comment, skipped })
}

/// Reads a matrix from a file.
///
/// Bytes that aren't valid UTF-8 only spoil the line they are in, which is
/// then skipped like any other unparseable line.
pub fn read_matrix(path: impl AsRef<Path>) -> Result<LoadedMatrix, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound(path.to_owned()),
        _ => LoadError::Io { path: path.to_owned(), source: e },
    })?;

    match parse_matrix(&String::from_utf8_lossy(&bytes)) {
        Err(LoadError::Empty) => Err(LoadError::EmptyFile(path.to_owned())),
        r => r,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn with_comment() {
        let l = parse_matrix("// target 100\n90,10\n10,90\n").unwrap();
        assert_eq!(l.matrix, Matrix::from_array([[90, 10], [10, 90]]));
        assert_eq!(l.comment.as_deref(), Some("target 100"));
        assert!(l.skipped.is_empty());
    }

    #[test]
    fn without_comment() {
        let l = parse_matrix("1, 2, 3\r\n -4,5 ,6\r\n").unwrap();
        assert_eq!(l.matrix, Matrix::from_array([[1, 2, 3], [-4, 5, 6]]));
        assert_eq!(l.comment, None);
    }

    /// Only the first line can be a comment.
    #[test]
    fn later_comment_is_skipped() {
        let l = parse_matrix("1,2\n// nope\n3,4").unwrap();
        assert_eq!(l.matrix, Matrix::from_array([[1, 2], [3, 4]]));
        assert_eq!(
            l.skipped,
            [SkippedLine { line_number: 2, content: "// nope".into() }]
        );
    }

    #[test]
    fn skips_bad_lines() {
        let l = parse_matrix("//\n1,2\nx,2\n\n3,4\n1,,2").unwrap();
        assert_eq!(l.matrix, Matrix::from_array([[1, 2], [3, 4]]));
        let skipped: Vec<_> = l.skipped.iter().map(|s| s.line_number).collect();
        assert_eq!(skipped, [3, 4, 6]);
        assert_eq!(l.comment.as_deref(), Some(""));
    }

    #[test]
    fn empty() {
        assert!(matches!(parse_matrix(""), Err(LoadError::Empty)));
    }

    #[test]
    fn no_valid_rows() {
        assert!(matches!(parse_matrix("// just a comment"), Err(LoadError::NoValidRows)));
        assert!(matches!(parse_matrix("\n"), Err(LoadError::NoValidRows)));
        assert!(matches!(parse_matrix("a,b\nc"), Err(LoadError::NoValidRows)));
    }

    #[test]
    fn inconsistent_columns() {
        let err = parse_matrix("1,2,3\n1,2").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InconsistentColumns { line_number: 2, expected: 3, found: 2 }
        ));
        assert!(err.to_string().contains("inconsistent number of columns"));
    }

    #[test]
    fn overflow_is_unparseable() {
        let l = parse_matrix("1\n99999999999999999999\n2").unwrap();
        assert_eq!(l.matrix, Matrix::from_array([[1], [2]]));
        assert_eq!(l.skipped.len(), 1);
    }

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("shiftsum-does-not-exist/matrix.txt");
        assert!(matches!(read_matrix(&path), Err(LoadError::NotFound(p)) if p == path));
    }

    #[test]
    fn read_file() {
        let path = std::env::temp_dir().join(format!("shiftsum-loader-{}.txt", std::process::id()));
        std::fs::write(&path, "// m\n1,2,3\n3,1,2\n2,3,1\n").unwrap();
        let l = read_matrix(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(l.unwrap().matrix, Matrix::from_array([[1, 2, 3], [3, 1, 2], [2, 3, 1]]));
    }

    #[test]
    fn empty_file() {
        let path = std::env::temp_dir().join(format!("shiftsum-empty-{}.txt", std::process::id()));
        std::fs::write(&path, "").unwrap();
        let l = read_matrix(&path);
        std::fs::remove_file(&path).unwrap();
        let err = l.unwrap_err();
        assert_eq!(err.to_string(), format!("File '{}' is empty.", path.display()));
        assert!(matches!(err, LoadError::EmptyFile(p) if p == path));
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let path = std::env::temp_dir().join(format!("shiftsum-utf8-{}.txt", std::process::id()));
        std::fs::write(&path, b"1,2\n\xff,3\n3,4\n").unwrap();
        let l = read_matrix(&path);
        std::fs::remove_file(&path).unwrap();
        let l = l.unwrap();
        assert_eq!(l.matrix, Matrix::from_array([[1, 2], [3, 4]]));
        let skipped: Vec<_> = l.skipped.iter().map(|s| s.line_number).collect();
        assert_eq!(skipped, [2]);
    }

    #[test]
    fn read_error_keeps_cause() {
        let dir = std::env::temp_dir();
        let err = read_matrix(&dir).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
