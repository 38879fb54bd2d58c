//! Pure constraint predicates over a [`Grid`].
//!
//! Everything here is a function of the board alone: no mutation, no
//! state. The duplicate checks use a [`BitVec`] presence set of length
//! N+1 indexed directly by digit value (so digit N is a valid index), and
//! empty cells never mark presence — `0` is a hole, not a digit.

use super::grid::{BOX_WIDTH, Grid};
use bit_vec::BitVec;

/// Marks `value` in the presence set, reporting whether it was already
/// there. Zero cells are skipped.
fn saw_before(seen: &mut BitVec, value: usize) -> bool {
    if value == 0 {
        return false;
    }
    if seen[value] {
        return true;
    }
    seen.set(value, true);
    false
}

/// Returns true iff no cell of the grid is empty.
#[must_use]
pub fn is_filled(grid: &Grid) -> bool {
    grid.rows().all(|row| row.iter().all(|&v| v != 0))
}

/// Returns true iff some row or column repeats a nonzero digit.
///
/// Scans every row, then every column, and short-circuits on the first
/// digit seen twice in the same line.
#[must_use]
pub fn has_line_conflict(grid: &Grid) -> bool {
    let n = grid.size();

    for row in 0..n {
        let mut seen = BitVec::from_elem(n + 1, false);
        for col in 0..n {
            if saw_before(&mut seen, grid.value(row, col)) {
                return true;
            }
        }
    }

    for col in 0..n {
        let mut seen = BitVec::from_elem(n + 1, false);
        for row in 0..n {
            if saw_before(&mut seen, grid.value(row, col)) {
                return true;
            }
        }
    }

    false
}

/// Returns true iff some constraint box repeats a nonzero digit.
///
/// Boxes are `N / 3` rows tall and [`BOX_WIDTH`] columns wide, tiled from
/// the top-left. The tiling is exact for every valid N since both spans
/// divide N.
#[must_use]
pub fn has_box_conflict(grid: &Grid) -> bool {
    let n = grid.size();
    let box_height = grid.box_height();

    for band in (0..n).step_by(box_height) {
        for stack in (0..n).step_by(BOX_WIDTH) {
            let mut seen = BitVec::from_elem(n + 1, false);
            for row in band..band + box_height {
                for col in stack..stack + BOX_WIDTH {
                    if saw_before(&mut seen, grid.value(row, col)) {
                        return true;
                    }
                }
            }
        }
    }

    false
}

/// Returns true iff the grid is completely filled and conflict-free.
#[must_use]
pub fn is_goal(grid: &Grid) -> bool {
    is_filled(grid) && !has_line_conflict(grid) && !has_box_conflict(grid)
}

/// The pruning predicate: true iff the grid already contains a
/// row, column, or box conflict among its placed digits.
///
/// A dead grid, filled or partial, can never extend to a goal, since the
/// search only fills zeros and never unplaces a digit.
#[must_use]
pub fn is_dead(grid: &Grid) -> bool {
    has_line_conflict(grid) || has_box_conflict(grid)
}
