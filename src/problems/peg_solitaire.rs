//! Peg solitaire on a rectangular grid.
//!
//! A peg jumps over an orthogonally adjacent peg into the empty cell right
//! behind it, removing the jumped peg. The puzzle is solved when a single peg
//! remains.

use thiserror::Error;

use crate::error::InvalidConfiguration;
use crate::grid::Direction;
use crate::grid::Grid;
use crate::grid::Position;
use crate::grid::char_rows;
use crate::puzzle::Puzzle;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Peg = 0,
    Empty = 1,
    Unused = 2,
}

impl Cell {
    pub const ALL: [Cell; 3] = [Cell::Peg, Cell::Empty, Cell::Unused];

    /// The character a board uses for this cell.
    pub fn symbol(&self) -> char {
        match self {
            Cell::Peg => '*',
            Cell::Empty => '.',
            Cell::Unused => '#',
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Cell {
    type Error = CellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Cell::ALL
            .into_iter()
            .find(|c| c.symbol() == ch)
            .ok_or(CellParseError::InvalidCharacter(ch))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The markers a board is allowed to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MarkerSet {
    bits: u8,
}

impl MarkerSet {
    pub const ALL: MarkerSet = MarkerSet { bits: 0b111 };

    #[inline(always)]
    pub fn contains(&self, c: Cell) -> bool {
        self.bits & (1 << c as u8) != 0
    }

    pub fn insert(&mut self, c: Cell) {
        self.bits |= 1 << c as u8;
    }

    /// Reads a marker set such as `"*.#"`.
    pub fn parse(markers: &str) -> Result<Self, InvalidConfiguration> {
        let mut set = MarkerSet { bits: 0 };
        for marker in markers.chars() {
            let c = Cell::try_from(marker)
                .map_err(|_| InvalidConfiguration::InvalidMarkerSet { marker })?;
            set.insert(c);
        }
        Ok(set)
    }
}

impl FromIterator<Cell> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = MarkerSet { bits: 0 };
        for c in iter {
            set.insert(c);
        }
        set
    }
}

/// A single jump: the peg at `from` jumps over `over` landing on `to`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Jump {
    pub from: Position,
    pub over: Position,
    pub to: Position,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridPegSolitaireState {
    grid: Grid<Cell>,
    markers: MarkerSet,
}

impl GridPegSolitaireState {
    /// Builds a board, every cell must use one of the allowed `markers`.
    pub fn new(grid: Grid<Cell>, markers: MarkerSet) -> Result<Self, InvalidConfiguration> {
        for (position, cell) in grid.cells() {
            if !markers.contains(*cell) {
                return Err(InvalidConfiguration::UnknownMarker {
                    marker: cell.symbol(),
                    position,
                });
            }
        }
        Ok(Self { grid, markers })
    }

    /// Reads a board written with `*` for pegs, `.` for holes and `#` for
    /// unused cells, one row per line.
    pub fn parse(board: &str, markers: &str) -> Result<Self, InvalidConfiguration> {
        let markers = MarkerSet::parse(markers)?;

        let mut rows = Vec::new();
        for (row, line) in char_rows(board).into_iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (column, ch) in line.into_iter().enumerate() {
                let cell = Cell::try_from(ch).map_err(|e| InvalidConfiguration::InvalidCell {
                    e,
                    position: Position::new(row, column),
                })?;
                cells.push(cell);
            }
            rows.push(cells);
        }

        Self::new(Grid::from_rows(rows)?, markers)
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    pub fn pegs(&self) -> usize {
        self.grid.find(&Cell::Peg).count()
    }

    /// Every legal jump, peg by peg in row order, directions in
    /// `Direction::ALL` order.
    pub fn jumps(&self) -> impl Iterator<Item = Jump> + '_ {
        self.grid.find(&Cell::Peg).flat_map(move |from| {
            Direction::ALL.into_iter().filter_map(move |direction| {
                let over = self.grid.step(from, direction, 1)?;
                let to = self.grid.step(from, direction, 2)?;
                (self.grid[over] == Cell::Peg && self.grid[to] == Cell::Empty).then_some(Jump {
                    from,
                    over,
                    to,
                    direction,
                })
            })
        })
    }

    /// The board after `jump`.
    pub fn apply(&self, jump: &Jump) -> Self {
        debug_assert_eq!(self.grid[jump.from], Cell::Peg);
        debug_assert_eq!(self.grid[jump.over], Cell::Peg);
        debug_assert_eq!(self.grid[jump.to], Cell::Empty);

        let mut grid = self.grid.clone();
        grid.set(jump.from, Cell::Empty);
        grid.set(jump.over, Cell::Empty);
        grid.set(jump.to, Cell::Peg);
        Self {
            grid,
            markers: self.markers,
        }
    }
}

impl Puzzle for GridPegSolitaireState {
    type Key = Grid<Cell>;

    fn extensions(&self) -> Vec<Self> {
        self.jumps().map(|jump| self.apply(&jump)).collect()
    }

    fn is_solved(&self) -> bool {
        let mut pegs = self.grid.find(&Cell::Peg);
        pegs.next().is_some() && pegs.next().is_none()
    }

    /// Stuck with more than one peg left.
    fn fail_fast(&self) -> bool {
        self.grid.find(&Cell::Peg).nth(1).is_some() && self.jumps().next().is_none()
    }

    fn key(&self) -> Self::Key {
        self.grid.clone()
    }
}

impl std::fmt::Display for GridPegSolitaireState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        crate::grid::write_rows(f, &self.grid, "")
    }
}
