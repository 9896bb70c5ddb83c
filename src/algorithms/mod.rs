//! Implementation of search algorithms.
//!
//! These algorithms can solve any `Puzzle`, they only ever ask a state for
//! its extensions and whether it's solved or hopeless.

pub mod bfs;
pub mod dfs;

pub use bfs::BreadthFirstSearch;
pub use bfs::breadth_first_solve;
pub use dfs::DepthFirstSearch;
pub use dfs::depth_first_solve;
