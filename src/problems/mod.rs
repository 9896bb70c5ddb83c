//! Implementation of puzzles.
//!
//! Each puzzle family describes a single configuration and how to reach the
//! next ones, searching is left to the algorithms.

pub mod peg_solitaire;
pub mod sliding_tile;
pub mod word_ladder;
