//! The grid data model.
//!
//! A [`Grid`] is an N×N board of small integers stored row-major, where
//! `0` marks an empty cell and `1..=N` are placed digits. Grids are value
//! types: every transformation produces a new `Grid`, and a grid handed to
//! the search frontier is never mutated afterwards. That immutability is
//! what makes breadth-first exploration sound — sibling states cannot
//! interfere with each other.
//!
//! All constructors validate their input, so a `Grid` value always holds a
//! square board whose side is a positive multiple of 3 and whose cells are
//! in range. Code downstream of a constructor never re-checks this.

use itertools::Itertools;
use std::fmt;

/// The fixed width of a constraint box, in columns.
///
/// Boxes are [`Grid::box_height`] rows tall and `BOX_WIDTH` columns wide,
/// tiled from the top-left corner. For a 9×9 board this yields the
/// conventional 3×3 partition.
pub const BOX_WIDTH: usize = 3;

/// An N×N Sudoku-style board.
///
/// Cells are stored row-major in a flat buffer; `0` is an empty cell and
/// `1..=N` are placed digits. Construction goes through [`Grid::empty`] or
/// [`Grid::from_rows`], both of which validate the dimensions and cell
/// values up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<usize>,
}

/// Validation failures raised when constructing a [`Grid`].
///
/// These are precondition violations, rejected before any search starts;
/// they are never produced mid-search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input contained no rows at all.
    NoRows,
    /// A row's length did not match the number of rows.
    NotSquare {
        /// The expected side length (the number of rows).
        size: usize,
        /// The zero-based index of the offending row.
        row: usize,
        /// The actual length of that row.
        len: usize,
    },
    /// The side length is not a positive multiple of [`BOX_WIDTH`].
    SizeNotDivisible {
        /// The rejected side length.
        size: usize,
    },
    /// A cell held a value outside `0..=N`.
    ValueOutOfRange {
        /// The zero-based row of the offending cell.
        row: usize,
        /// The zero-based column of the offending cell.
        col: usize,
        /// The rejected value.
        value: usize,
        /// The board's side length, which bounds legal values.
        size: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRows => write!(f, "grid has no rows"),
            Self::NotSquare { size, row, len } => {
                write!(f, "grid is not square: row {row} has {len} cells, expected {size}")
            }
            Self::SizeNotDivisible { size } => {
                write!(f, "grid size {size} is not a positive multiple of {BOX_WIDTH}")
            }
            Self::ValueOutOfRange { row, col, value, size } => {
                write!(f, "cell ({row}, {col}) holds {value}, outside 0..={size}")
            }
        }
    }
}

impl std::error::Error for GridError {}

impl Grid {
    /// Creates an all-empty grid of the given side length.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::SizeNotDivisible`] unless `size` is a positive
    /// multiple of [`BOX_WIDTH`].
    pub fn empty(size: usize) -> Result<Self, GridError> {
        if size == 0 || size % BOX_WIDTH != 0 {
            return Err(GridError::SizeNotDivisible { size });
        }
        Ok(Self {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Builds a grid from rows of cell values.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if the input is empty, ragged or
    /// non-square, if the side length is not a positive multiple of
    /// [`BOX_WIDTH`], or if any cell is outside `0..=N`.
    pub fn from_rows(rows: Vec<Vec<usize>>) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::NoRows);
        }
        if size % BOX_WIDTH != 0 {
            return Err(GridError::SizeNotDivisible { size });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(GridError::NotSquare {
                    size,
                    row: r,
                    len: row.len(),
                });
            }
            for (c, value) in row.into_iter().enumerate() {
                if value > size {
                    return Err(GridError::ValueOutOfRange {
                        row: r,
                        col: c,
                        value,
                        size,
                    });
                }
                cells.push(value);
            }
        }

        Ok(Self { size, cells })
    }

    /// The side length N of the board.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The height of a constraint box, in rows (N / 3).
    #[must_use]
    pub const fn box_height(&self) -> usize {
        self.size / BOX_WIDTH
    }

    /// The value at the given cell; `0` means empty.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> usize {
        assert!(row < self.size && col < self.size, "cell out of bounds");
        self.cells[row * self.size + col]
    }

    /// Iterates over the rows of the board as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.cells.chunks(self.size)
    }

    /// The number of nonzero cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// The first empty cell in row-major scan order, if any.
    ///
    /// Row-major means row 0 left to right, then row 1, and so on; this is
    /// the cell every successor of a search node fills.
    #[must_use]
    pub fn first_empty(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&v| v == 0)
            .map(|idx| (idx / self.size, idx % self.size))
    }

    /// Returns a copy of this grid with one cell set to `value`.
    ///
    /// `self` is left untouched; successors never mutate their parent.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds or `value` is outside `0..=N`.
    #[must_use]
    pub fn with_value(&self, row: usize, col: usize, value: usize) -> Self {
        assert!(row < self.size && col < self.size, "cell out of bounds");
        assert!(value <= self.size, "value {value} outside 0..={}", self.size);
        let mut next = self.clone();
        next.cells[row * self.size + col] = value;
        next
    }
}

impl TryFrom<Vec<Vec<usize>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<usize>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size.to_string().len();
        for row in self.rows() {
            let line = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{v:>width$}")
                    }
                })
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
