use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod error;
pub mod grid;

// Search space and problems
// -------------------------
pub mod path;
pub mod puzzle;
pub mod search;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
