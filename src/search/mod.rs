#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Breadth-first completion search for Sudoku-style grids.
//!
//! The pieces fit together like this: a [`grid::Grid`] is an immutable
//! N×N board; [`rules`] holds the pure predicates that decide whether a
//! board is complete, conflicted, or a goal; [`node::SearchNode`] wraps a
//! board with its search lineage; [`frontier`] defines the queue the
//! engine expands from; and [`engine::Bfs`] drives the whole search.

pub mod engine;
pub mod frontier;
pub mod grid;
pub mod node;
pub mod parse;
pub mod rules;
