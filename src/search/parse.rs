//! A parser for plain-text grid files.
//!
//! The format is one board row per line: cell values separated by
//! whitespace, with `0`, `.` or `_` marking an empty cell. Blank lines
//! and lines starting with `#` are skipped. The original editor silently
//! zeroed anything it could not read; here an unreadable token is an
//! error, and the parsed rows are validated by [`Grid::from_rows`] before
//! any search can see them.
//!
//! Example of a 6×6 board:
//!
//! ```text
//! # daily puzzle
//! 1 . . 4 . 6
//! . 5 6 . 2 .
//! 2 . 1 . . 4
//! . 6 . 2 3 .
//! 3 . 2 . 4 .
//! . 4 . 3 . 2
//! ```

use super::grid::{Grid, GridError};
use itertools::Itertools;
use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

/// Failures raised while reading a grid from text.
#[derive(Debug)]
pub enum ParseGridError {
    /// The underlying reader failed.
    Io(io::Error),
    /// A token was neither a cell value nor an empty-cell marker.
    BadToken {
        /// The one-based line number of the offending token.
        line: usize,
        /// The token as it appeared in the input.
        token: String,
    },
    /// The rows read were not a valid grid.
    Grid(GridError),
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read grid: {e}"),
            Self::BadToken { line, token } => {
                write!(f, "line {line}: unreadable cell token '{token}'")
            }
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
        }
    }
}

impl std::error::Error for ParseGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::BadToken { .. } => None,
        }
    }
}

impl From<io::Error> for ParseGridError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<GridError> for ParseGridError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Parses one cell token: a digit value, or `.`/`_` for an empty cell.
fn parse_token(token: &str, line: usize) -> Result<usize, ParseGridError> {
    match token {
        "." | "_" => Ok(0),
        _ => token.parse::<usize>().map_err(|_| ParseGridError::BadToken {
            line,
            token: token.to_string(),
        }),
    }
}

/// Parses a grid from any buffered reader.
///
/// # Errors
///
/// Returns [`ParseGridError`] on I/O failure, on an unreadable token, or
/// when the rows do not form a valid grid (ragged, wrong size, cell out
/// of range).
pub fn parse_grid<R: BufRead>(reader: R) -> Result<Grid, ParseGridError> {
    let mut rows: Vec<Vec<usize>> = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = trimmed
            .split_whitespace()
            .map(|token| parse_token(token, idx + 1))
            .try_collect()?;
        rows.push(row);
    }

    Ok(Grid::from_rows(rows)?)
}

/// Parses a grid file from disk.
///
/// This is a convenience wrapper that opens the file, buffers it, and
/// calls [`parse_grid`].
///
/// # Errors
///
/// Everything [`parse_grid`] reports, plus failure to open the file.
pub fn parse_grid_file(path: &Path) -> Result<Grid, ParseGridError> {
    let file = std::fs::File::open(path)?;
    parse_grid(io::BufReader::new(file))
}
