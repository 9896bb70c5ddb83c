//! Rectangular grids shared by the grid-based puzzles.

use std::fmt::Display;
use std::hash::Hash;

use derive_more::Display;
use smallvec::SmallVec;

use crate::error::InvalidConfiguration;

/// A cell coordinate, rows grow downwards and columns to the right.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("({row},{column})")]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    #[inline(always)]
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// The four axis-aligned directions. Diagonals are never legal moves.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Direction {
    #[display("↑")]
    Up,
    #[display("↓")]
    Down,
    #[display("←")]
    Left,
    #[display("→")]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// A non-empty rectangular grid stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    cells: Vec<T>,
    rows: usize,
    columns: usize,
}

impl<T> Grid<T> {
    /// Builds a grid, rejecting empty inputs and rows of different lengths.
    pub fn from_rows<R, I>(rows: R) -> Result<Self, InvalidConfiguration>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut num_rows = 0usize;
        let mut columns = 0usize;

        for (row, line) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(line);
            let found = cells.len() - before;
            if row == 0 {
                columns = found;
            } else if found != columns {
                return Err(InvalidConfiguration::RaggedRow {
                    row,
                    expected: columns,
                    found,
                });
            }
            num_rows += 1;
        }

        if num_rows == 0 || columns == 0 {
            return Err(InvalidConfiguration::EmptyGrid);
        }

        Ok(Self {
            cells,
            rows: num_rows,
            columns,
        })
    }

    /// `(rows, columns)`
    #[inline(always)]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    #[inline(always)]
    pub fn contains(&self, p: Position) -> bool {
        p.row < self.rows && p.column < self.columns
    }

    #[inline(always)]
    fn offset(&self, p: Position) -> usize {
        debug_assert!(self.contains(p));
        p.row * self.columns + p.column
    }

    #[inline(always)]
    pub fn get(&self, p: Position) -> Option<&T> {
        if self.contains(p) {
            Some(&self.cells[self.offset(p)])
        } else {
            None
        }
    }

    /// Swaps the contents of two cells.
    pub fn swap(&mut self, a: Position, b: Position) {
        let (a, b) = (self.offset(a), self.offset(b));
        self.cells.swap(a, b);
    }

    /// Overwrites a cell.
    pub fn set(&mut self, p: Position, value: T) {
        let i = self.offset(p);
        self.cells[i] = value;
    }

    /// The cell `steps` away from `p` towards `d`, if it's still on the grid.
    ///
    /// Boundaries are checked explicitly so moving off an edge is just `None`.
    pub fn step(&self, p: Position, d: Direction, steps: usize) -> Option<Position> {
        let next = match d {
            Direction::Up => Position::new(p.row.checked_sub(steps)?, p.column),
            Direction::Down => Position::new(p.row.checked_add(steps)?, p.column),
            Direction::Left => Position::new(p.row, p.column.checked_sub(steps)?),
            Direction::Right => Position::new(p.row, p.column.checked_add(steps)?),
        };
        self.contains(next).then_some(next)
    }

    /// On-grid orthogonal neighbours of `p`, 2 at corners, 3 on edges, 4 inside.
    pub fn neighbours(&self, p: Position) -> SmallVec<[(Position, Direction); 4]> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.step(p, d, 1).map(|n| (n, d)))
            .collect()
    }

    /// Every position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| Position::new(row, column))
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, &T)> {
        self.positions().zip(self.cells.iter())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.columns)
    }
}

impl<T: PartialEq> Grid<T> {
    /// Positions holding `value`.
    pub fn find<'a>(&'a self, value: &'a T) -> impl Iterator<Item = Position> + 'a {
        self.cells()
            .filter_map(move |(p, cell)| (cell == value).then_some(p))
    }
}

impl<T> std::ops::Index<Position> for Grid<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, p: Position) -> &Self::Output {
        &self.cells[self.offset(p)]
    }
}

/// Renders one row per line, cells joined by `separator`.
pub(crate) fn write_rows<T: Display>(
    f: &mut std::fmt::Formatter,
    grid: &Grid<T>,
    separator: &str,
) -> std::fmt::Result {
    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        for (j, cell) in row.iter().enumerate() {
            if j > 0 {
                write!(f, "{separator}")?;
            }
            write!(f, "{cell}")?;
        }
    }
    Ok(())
}

/// Splits textual grids into rows of characters.
///
/// Rows are separated by newlines or `/`, surrounding blank lines and
/// indentation are ignored.
pub(crate) fn char_rows(s: &str) -> Vec<Vec<char>> {
    s.split(['\n', '/'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_rejected() {
        let e = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5]]).unwrap_err();
        assert_eq!(
            e,
            InvalidConfiguration::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn empty_grids_are_rejected() {
        let rows: Vec<Vec<u8>> = vec![];
        assert_eq!(
            Grid::from_rows(rows).unwrap_err(),
            InvalidConfiguration::EmptyGrid
        );
        assert_eq!(
            Grid::<u8>::from_rows(vec![vec![]]).unwrap_err(),
            InvalidConfiguration::EmptyGrid
        );
    }

    #[test]
    fn neighbours_respect_edges() {
        let g = Grid::from_rows(vec![vec![0; 3]; 3]).unwrap();
        assert_eq!(g.neighbours(Position::new(0, 0)).len(), 2);
        assert_eq!(g.neighbours(Position::new(0, 1)).len(), 3);
        assert_eq!(g.neighbours(Position::new(1, 1)).len(), 4);
        assert_eq!(g.neighbours(Position::new(2, 2)).len(), 2);
    }

    #[test]
    fn step_stays_on_grid() {
        let g = Grid::from_rows(vec![vec![0; 4]; 2]).unwrap();
        let p = Position::new(1, 1);
        assert_eq!(g.step(p, Direction::Up, 1), Some(Position::new(0, 1)));
        assert_eq!(g.step(p, Direction::Up, 2), None);
        assert_eq!(g.step(p, Direction::Right, 2), Some(Position::new(1, 3)));
        assert_eq!(g.step(p, Direction::Down, 1), None);
        assert_eq!(g.step(p, Direction::Left, 2), None);
    }

    #[test]
    fn positions_are_row_major() {
        let g = Grid::from_rows(vec![vec![0; 3]; 2]).unwrap();
        let positions: Vec<Position> = g.positions().collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[2], Position::new(0, 2));
        assert_eq!(positions[3], Position::new(1, 0));
    }

    #[test]
    fn char_rows_accept_both_separators() {
        assert_eq!(char_rows("12/3*"), char_rows("\n  12\n  3*\n"));
    }
}
