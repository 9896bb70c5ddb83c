use thiserror::Error;

use crate::grid::Position;
use crate::problems::peg_solitaire::CellParseError;

/// Errors raised while building a puzzle from its initial configuration.
///
/// Solving never fails, an unsolvable puzzle simply has no `Path`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidConfiguration {
    #[error("Empty grid")]
    EmptyGrid,
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid cell {e} found at {position}")]
    InvalidCell {
        e: CellParseError,
        position: Position,
    },
    #[error("Marker '{marker}' at {position} is not in the allowed marker set")]
    UnknownMarker { marker: char, position: Position },
    #[error("Marker '{marker}' is not a peg, empty or unused marker")]
    InvalidMarkerSet { marker: char },
    #[error("Current grid is {current:?} but goal grid is {goal:?}")]
    DimensionMismatch {
        current: (usize, usize),
        goal: (usize, usize),
    },
    #[error("No empty marker in the {grid} grid")]
    MissingEmptyMarker { grid: &'static str },
    #[error("More than one empty marker in the {grid} grid")]
    DuplicateEmptyMarker { grid: &'static str },
}
