#![deny(missing_docs)]
//! This crate provides an exhaustive breadth-first solver for N×N
//! Sudoku-style constraint grids, where N is a multiple of 3.

/// The `search` module implements the grid data model, the row/column/box
/// constraint rules, and the breadth-first search engine that completes a
/// partially filled grid.
pub mod search;
