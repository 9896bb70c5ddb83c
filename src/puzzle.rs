use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

/// A single configuration of a puzzle.
///
/// Puzzles are values: a move never mutates a state, it builds the successor.
/// Any puzzle family can be searched by implementing this trait, the solvers
/// know nothing else about it.
pub trait Puzzle: Clone + Debug + Display + PartialEq + Eq {
    /// Canonical key used to recognise already visited states.
    ///
    /// Two states reachable from the same initial state must have equal keys
    /// iff they are equal.
    type Key: Clone + Debug + Eq + Hash;

    /// Every state one legal move away, in a deterministic order.
    ///
    /// Never contains `self`.
    fn extensions(&self) -> Vec<Self>;

    /// Whether this is a goal state.
    fn is_solved(&self) -> bool;

    /// Whether no sequence of moves can reach a goal from here.
    ///
    /// This is a cheap pruning test, it may answer `false` for hopeless states
    /// but never `true` for a state that can still be solved.
    fn fail_fast(&self) -> bool {
        false
    }

    fn key(&self) -> Self::Key;
}
