//! Search tree nodes.
//!
//! A [`SearchNode`] pairs a [`Grid`] with its lineage: an optional
//! back-reference to the node it was expanded from and a depth counter.
//! Because every expansion places exactly one digit, depth equals the
//! number of originally empty cells filled so far, so all nodes in the
//! same frontier layer have filled the same number of cells.
//!
//! Parents are held behind [`Rc`] so the many siblings produced by one
//! expansion share a single ancestor chain instead of each carrying a
//! copy of it.

use super::grid::Grid;
use std::rc::Rc;

/// A state in the completion search: a grid plus how it was reached.
#[derive(Debug, Clone)]
pub struct SearchNode {
    grid: Grid,
    parent: Option<Rc<SearchNode>>,
    depth: u32,
}

impl SearchNode {
    /// Wraps an initial grid as the root of a search, at depth 0.
    #[must_use]
    pub const fn root(grid: Grid) -> Self {
        Self {
            grid,
            parent: None,
            depth: 0,
        }
    }

    /// Creates a successor of `parent` holding `grid`, one level deeper.
    #[must_use]
    pub fn child(parent: &Rc<Self>, grid: Grid) -> Self {
        Self {
            grid,
            parent: Some(Rc::clone(parent)),
            depth: parent.depth + 1,
        }
    }

    /// The grid this node represents.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The node this one was expanded from, if it is not the root.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// How many placements separate this node from the root.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Consumes the node, returning its grid and releasing the ancestor
    /// chain.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// The grids from the root down to this node, in placement order.
    #[must_use]
    pub fn path(&self) -> Vec<&Grid> {
        let mut grids = Vec::with_capacity(self.depth as usize + 1);
        let mut current = Some(self);
        while let Some(node) = current {
            grids.push(&node.grid);
            current = node.parent();
        }
        grids.reverse();
        grids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_parent_and_depth_zero() {
        let root = SearchNode::root(Grid::empty(3).unwrap());
        assert_eq!(root.depth(), 0);
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_child_depth_increments() {
        let root = Rc::new(SearchNode::root(Grid::empty(3).unwrap()));
        let child = SearchNode::child(&root, root.grid().with_value(0, 0, 1));
        assert_eq!(child.depth(), 1);
        assert_eq!(child.parent().unwrap().depth(), 0);
    }

    #[test]
    fn test_siblings_share_one_parent() {
        let root = Rc::new(SearchNode::root(Grid::empty(3).unwrap()));
        let a = SearchNode::child(&root, root.grid().with_value(0, 0, 1));
        let b = SearchNode::child(&root, root.grid().with_value(0, 0, 2));
        assert_eq!(Rc::strong_count(&root), 3);
        assert_eq!(a.parent().unwrap().grid(), b.parent().unwrap().grid());
    }

    #[test]
    fn test_path_runs_root_to_leaf() {
        let root = Rc::new(SearchNode::root(Grid::empty(3).unwrap()));
        let mid = Rc::new(SearchNode::child(&root, root.grid().with_value(0, 0, 1)));
        let leaf = SearchNode::child(&mid, mid.grid().with_value(0, 1, 2));

        let path = leaf.path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].filled_count(), 0);
        assert_eq!(path[1].filled_count(), 1);
        assert_eq!(path[2].filled_count(), 2);
    }

    #[test]
    fn test_into_grid_returns_the_state() {
        let root = Rc::new(SearchNode::root(Grid::empty(3).unwrap()));
        let child = SearchNode::child(&root, root.grid().with_value(0, 0, 3));
        let grid = child.into_grid();
        assert_eq!(grid.value(0, 0), 3);
    }
}
