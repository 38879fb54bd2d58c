//! The breadth-first search engine.
//!
//! [`Bfs`] completes a partially filled grid by exhaustive layer-by-layer
//! exploration: pop the oldest node, locate its first empty cell in
//! row-major order, and generate one successor per candidate digit
//! `1..=N` in ascending order. A successor that is a goal is returned
//! immediately; one that already violates a row, column, or box
//! constraint is pruned and never revisited; everything else joins the
//! frontier. This is not backtracking — dead states are simply dropped —
//! and there is no heuristic beyond that local legality check, so runtime
//! and memory grow combinatorially with the number of empty cells.
//!
//! The engine is generic over its [`Frontier`], mirroring how the rest of
//! the search picks strategies: the default [`FifoFrontier`] reproduces
//! the original unbounded queue, while a
//! [`DedupFrontier`](super::frontier::DedupFrontier) or an expansion
//! budget harden it without changing the contract.

use super::frontier::{FifoFrontier, Frontier};
use super::grid::Grid;
use super::node::SearchNode;
use super::rules;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// Why a solve call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The frontier was exhausted without reaching a goal: no completion
    /// of the initial grid satisfies the constraints, or the initial grid
    /// was already contradictory.
    NoSolution,
    /// The configured expansion budget was spent before the search
    /// finished. Says nothing about solvability either way.
    BudgetExhausted {
        /// How many nodes had been expanded when the search stopped.
        expanded: usize,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSolution => write!(f, "no solution found"),
            Self::BudgetExhausted { expanded } => {
                write!(f, "expansion budget exhausted after {expanded} nodes")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Counters describing one solve call.
///
/// Reset at the start of every [`Bfs::solve`] invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Nodes popped from the frontier and expanded.
    pub expanded: usize,
    /// Successor grids generated across all expansions.
    pub generated: usize,
    /// Successors discarded for violating a constraint.
    pub pruned: usize,
    /// The largest frontier size observed.
    pub peak_frontier: usize,
    /// Depth of the returned solution, i.e. how many cells the search
    /// filled. `None` when no solution was found.
    pub solution_depth: Option<u32>,
}

/// A breadth-first completion solver over a pluggable [`Frontier`].
///
/// Each call to [`solve`](Self::solve) owns a fresh frontier and runs to
/// completion on the calling thread; instances hold only configuration
/// and the statistics of the most recent call.
#[derive(Debug, Clone, Default)]
pub struct Bfs<F: Frontier = FifoFrontier> {
    budget: Option<usize>,
    stats: SearchStats,
    frontier: PhantomData<F>,
}

const FRESH_STATS: SearchStats = SearchStats {
    expanded: 0,
    generated: 0,
    pruned: 0,
    peak_frontier: 0,
    solution_depth: None,
};

impl<F: Frontier> Bfs<F> {
    /// Creates an engine with no expansion budget, matching the original
    /// unbounded search.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            budget: None,
            stats: FRESH_STATS,
            frontier: PhantomData,
        }
    }

    /// Creates an engine that gives up after expanding `max_expansions`
    /// nodes, failing with [`SolveError::BudgetExhausted`].
    #[must_use]
    pub const fn with_budget(max_expansions: usize) -> Self {
        Self {
            budget: Some(max_expansions),
            stats: FRESH_STATS,
            frontier: PhantomData,
        }
    }

    /// Counters from the most recent [`solve`](Self::solve) call.
    #[must_use]
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Searches for a complete, conflict-free filling of `initial`.
    ///
    /// On success the returned grid agrees with `initial` on every
    /// nonzero cell; an already-solved grid is returned unchanged with
    /// zero expansions.
    ///
    /// # Errors
    ///
    /// [`SolveError::NoSolution`] when every admissible expansion has
    /// been tried, and [`SolveError::BudgetExhausted`] when a configured
    /// budget runs out first.
    pub fn solve(&mut self, initial: &Grid) -> Result<Grid, SolveError> {
        self.stats = SearchStats::default();

        let root = SearchNode::root(initial.clone());
        if rules::is_goal(root.grid()) {
            self.stats.solution_depth = Some(0);
            return Ok(root.into_grid());
        }

        let mut frontier = F::default();
        frontier.push(root);
        self.stats.peak_frontier = frontier.len();

        while let Some(node) = frontier.pop() {
            if let Some(budget) = self.budget {
                if self.stats.expanded >= budget {
                    return Err(SolveError::BudgetExhausted {
                        expanded: self.stats.expanded,
                    });
                }
            }
            self.stats.expanded += 1;

            // A full grid that is not a goal has no children.
            let Some((row, col)) = node.grid().first_empty() else {
                continue;
            };

            let size = node.grid().size();
            let parent = Rc::new(node);

            for digit in 1..=size {
                let child =
                    SearchNode::child(&parent, parent.grid().with_value(row, col, digit));
                self.stats.generated += 1;

                if rules::is_goal(child.grid()) {
                    self.stats.solution_depth = Some(child.depth());
                    return Ok(child.into_grid());
                }

                if rules::is_dead(child.grid()) {
                    self.stats.pruned += 1;
                } else {
                    frontier.push(child);
                    self.stats.peak_frontier = self.stats.peak_frontier.max(frontier.len());
                }
            }
        }

        Err(SolveError::NoSolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::frontier::DedupFrontier;

    fn solved_nine() -> Grid {
        Grid::from_rows(vec![
            vec![5, 3, 4, 6, 7, 8, 9, 1, 2],
            vec![6, 7, 2, 1, 9, 5, 3, 4, 8],
            vec![1, 9, 8, 3, 4, 2, 5, 6, 7],
            vec![8, 5, 9, 7, 6, 1, 4, 2, 3],
            vec![4, 2, 6, 8, 5, 3, 7, 9, 1],
            vec![7, 1, 3, 9, 2, 4, 8, 5, 6],
            vec![9, 6, 1, 5, 3, 7, 2, 8, 4],
            vec![2, 8, 7, 4, 1, 9, 6, 3, 5],
            vec![3, 4, 5, 2, 8, 6, 1, 7, 9],
        ])
        .unwrap()
    }

    /// Blanks the given cells of a solved grid.
    fn blank(grid: &Grid, cells: &[(usize, usize)]) -> Grid {
        let mut out = grid.clone();
        for &(r, c) in cells {
            out = out.with_value(r, c, 0);
        }
        out
    }

    fn assert_respects_givens(initial: &Grid, solved: &Grid) {
        for row in 0..initial.size() {
            for col in 0..initial.size() {
                let given = initial.value(row, col);
                if given != 0 {
                    assert_eq!(solved.value(row, col), given, "given at ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn test_already_solved_grid_returns_itself_without_expanding() {
        let grid = solved_nine();
        let mut engine: Bfs = Bfs::new();
        let result = engine.solve(&grid).unwrap();

        assert_eq!(result, grid);
        assert_eq!(engine.stats().expanded, 0);
        assert_eq!(engine.stats().generated, 0);
        assert_eq!(engine.stats().solution_depth, Some(0));
    }

    #[test]
    fn test_three_by_three_with_givens_solves() {
        let initial =
            Grid::from_rows(vec![vec![1, 2, 0], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        let mut engine: Bfs = Bfs::new();
        let solved = engine.solve(&initial).unwrap();

        assert!(rules::is_goal(&solved));
        assert_respects_givens(&initial, &solved);
        assert_eq!(engine.stats().solution_depth, Some(7));
    }

    #[test]
    fn test_nearly_complete_nine_solves_to_the_unique_grid() {
        let full = solved_nine();
        let initial = blank(&full, &[(0, 0), (3, 4), (5, 7), (8, 8)]);
        let mut engine: Bfs = Bfs::new();
        let solved = engine.solve(&initial).unwrap();

        assert_eq!(solved, full);
        assert_respects_givens(&initial, &solved);
        assert_eq!(engine.stats().solution_depth, Some(4));
        assert!(engine.stats().expanded >= 4);
    }

    #[test]
    fn test_solution_never_has_fewer_filled_cells_than_input() {
        let initial =
            Grid::from_rows(vec![vec![1, 2, 0], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        let mut engine: Bfs = Bfs::new();
        let solved = engine.solve(&initial).unwrap();
        assert!(solved.filled_count() >= initial.filled_count());
        assert_eq!(solved.filled_count(), 9);
    }

    #[test]
    fn test_complete_grid_with_row_conflict_is_unsolvable() {
        // A duplicate cannot be unfilled, only zeros can be filled.
        let mut rows: Vec<Vec<usize>> = solved_nine().rows().map(<[usize]>::to_vec).collect();
        rows[0][1] = 5; // duplicates the 5 at (0, 0)
        let grid = Grid::from_rows(rows).unwrap();

        let mut engine: Bfs = Bfs::new();
        assert_eq!(engine.solve(&grid), Err(SolveError::NoSolution));
    }

    #[test]
    fn test_contradictory_partial_grid_is_unsolvable() {
        let grid =
            Grid::from_rows(vec![vec![1, 1, 0], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        let mut engine: Bfs = Bfs::new();
        assert_eq!(engine.solve(&grid), Err(SolveError::NoSolution));
        assert!(engine.stats().pruned > 0);
    }

    #[test]
    fn test_budget_stops_an_intractable_search() {
        let grid = Grid::empty(9).unwrap();
        let mut engine: Bfs = Bfs::with_budget(500);
        let result = engine.solve(&grid);
        assert_eq!(result, Err(SolveError::BudgetExhausted { expanded: 500 }));
        assert_eq!(engine.stats().expanded, 500);
    }

    #[test]
    fn test_budget_does_not_affect_fast_solves() {
        let initial =
            Grid::from_rows(vec![vec![1, 2, 0], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        let mut unbounded: Bfs = Bfs::new();
        let mut budgeted: Bfs = Bfs::with_budget(1_000_000);
        assert_eq!(unbounded.solve(&initial), budgeted.solve(&initial));
    }

    #[test]
    fn test_dedup_frontier_finds_the_same_answer() {
        let full = solved_nine();
        let initial = blank(&full, &[(2, 3), (4, 4), (6, 5)]);

        let mut fifo: Bfs = Bfs::new();
        let mut dedup: Bfs<DedupFrontier> = Bfs::new();
        assert_eq!(fifo.solve(&initial).unwrap(), dedup.solve(&initial).unwrap());
        assert_eq!(fifo.solve(&initial).unwrap(), full);
    }

    #[test]
    fn test_six_by_six_solves_with_two_by_three_boxes() {
        let full = Grid::from_rows(vec![
            vec![1, 2, 3, 4, 5, 6],
            vec![4, 5, 6, 1, 2, 3],
            vec![2, 3, 1, 5, 6, 4],
            vec![5, 6, 4, 2, 3, 1],
            vec![3, 1, 2, 6, 4, 5],
            vec![6, 4, 5, 3, 1, 2],
        ])
        .unwrap();
        assert!(rules::is_goal(&full));

        let initial = blank(&full, &[(0, 5), (1, 0), (3, 3), (5, 2)]);
        let mut engine: Bfs = Bfs::new();
        let solved = engine.solve(&initial).unwrap();
        assert!(rules::is_goal(&solved));
        assert_respects_givens(&initial, &solved);
    }

    #[test]
    fn test_stats_reset_between_calls() {
        let mut engine: Bfs = Bfs::new();
        let hard =
            Grid::from_rows(vec![vec![1, 2, 0], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        engine.solve(&hard).unwrap();
        assert!(engine.stats().expanded > 0);

        engine.solve(&solved_nine()).unwrap();
        assert_eq!(engine.stats().expanded, 0);
        assert_eq!(engine.stats().solution_depth, Some(0));
    }

    /// Exhaustive expansion of an all-empty board. Kept as an ignored
    /// smoke test: layer-by-layer completion of a blank 9×9 blows up
    /// combinatorially and is far too slow for the default suite.
    #[test]
    #[ignore]
    fn test_exhaustive_search_on_empty_nine_smoke() {
        let grid = Grid::empty(9).unwrap();
        let mut engine: Bfs<DedupFrontier> = Bfs::new();
        let solved = engine.solve(&grid).unwrap();
        assert!(rules::is_goal(&solved));
    }
}
