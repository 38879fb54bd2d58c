//! Frontier strategies for the breadth-first engine.
//!
//! The frontier is the ordered collection of not-yet-expanded nodes. It is
//! expressed as a trait so the engine's contract stays fixed while the
//! queueing policy varies: [`FifoFrontier`] reproduces the original
//! unbounded first-in-first-out queue exactly, and [`DedupFrontier`]
//! hardens it with visited-state deduplication for boards where the same
//! partial grid is reachable through different expansion orders.

use super::grid::Grid;
use super::node::SearchNode;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// The queue of not-yet-expanded search nodes.
///
/// A frontier is owned by a single solve call: the engine creates one,
/// drains it, and drops it. Implementations decide what `push` admits;
/// `pop` must always yield the earliest admitted node still queued.
pub trait Frontier: Default {
    /// Offers a node for later expansion. Implementations may drop it.
    fn push(&mut self, node: SearchNode);

    /// Removes and returns the earliest-inserted node, if any.
    fn pop(&mut self) -> Option<SearchNode>;

    /// The number of nodes currently queued.
    fn len(&self) -> usize;

    /// Whether the frontier holds no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A plain first-in-first-out frontier.
///
/// Every offered node is queued; nothing is deduplicated or bounded. This
/// is the original search's queue, combinatorial memory growth included.
#[derive(Debug, Clone, Default)]
pub struct FifoFrontier {
    queue: VecDeque<SearchNode>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, node: SearchNode) {
        self.queue.push_back(node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// A FIFO frontier that drops grids it has already admitted.
///
/// The set keys on the whole grid and keeps entries after their node is
/// dequeued: a state reached again later is still redundant, because the
/// earlier copy was expanded (or is queued ahead) in FIFO order. On inputs
/// where the plain search terminates, results are identical.
#[derive(Debug, Clone, Default)]
pub struct DedupFrontier {
    queue: VecDeque<SearchNode>,
    seen: FxHashSet<Grid>,
}

impl Frontier for DedupFrontier {
    fn push(&mut self, node: SearchNode) {
        if self.seen.insert(node.grid().clone()) {
            self.queue.push_back(node);
        }
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with(value: usize) -> SearchNode {
        SearchNode::root(Grid::empty(3).unwrap().with_value(0, 0, value))
    }

    #[test]
    fn test_fifo_pops_in_insertion_order() {
        let mut frontier = FifoFrontier::default();
        frontier.push(node_with(1));
        frontier.push(node_with(2));
        frontier.push(node_with(3));

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop().unwrap().grid().value(0, 0), 1);
        assert_eq!(frontier.pop().unwrap().grid().value(0, 0), 2);
        assert_eq!(frontier.pop().unwrap().grid().value(0, 0), 3);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_fifo_admits_duplicates() {
        let mut frontier = FifoFrontier::default();
        frontier.push(node_with(1));
        frontier.push(node_with(1));
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_dedup_drops_repeated_grids() {
        let mut frontier = DedupFrontier::default();
        frontier.push(node_with(1));
        frontier.push(node_with(1));
        frontier.push(node_with(2));
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_dedup_remembers_dequeued_grids() {
        let mut frontier = DedupFrontier::default();
        frontier.push(node_with(1));
        let _ = frontier.pop();
        frontier.push(node_with(1));
        assert!(frontier.is_empty());
    }
}
