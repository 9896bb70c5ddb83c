//! Sliding-tile (M×N) puzzles, like the 15-puzzle.
//!
//! A move slides a tile orthogonally adjacent to the empty cell into it.

use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;

use crate::error::InvalidConfiguration;
use crate::grid::Grid;
use crate::grid::Position;
use crate::grid::char_rows;
use crate::puzzle::Puzzle;

/// Anything that can be written on a tile.
pub trait Tile: Clone + Debug + Display + Eq + Hash {}
impl<T> Tile for T where T: Clone + Debug + Display + Eq + Hash {}

#[derive(Clone, Debug)]
pub struct SlidingTileState<T: Tile = char> {
    current: Grid<T>,
    goal: Arc<Grid<T>>,
    /// Where the empty marker is in `current`.
    empty: Position,
}

/// Finds the single `empty` marker in `grid`.
fn find_empty<T: Tile>(
    grid: &Grid<T>,
    empty: &T,
    name: &'static str,
) -> Result<Position, InvalidConfiguration> {
    let mut found = grid.find(empty);
    let position = found
        .next()
        .ok_or(InvalidConfiguration::MissingEmptyMarker { grid: name })?;
    if found.next().is_some() {
        return Err(InvalidConfiguration::DuplicateEmptyMarker { grid: name });
    }
    Ok(position)
}

impl<T: Tile> SlidingTileState<T> {
    /// Builds a puzzle at `current` that has to reach `goal`.
    ///
    /// Both grids need the same shape and exactly one `empty` marker each. A
    /// goal holding different tiles is accepted, it's just unreachable.
    pub fn new(current: Grid<T>, goal: Grid<T>, empty: &T) -> Result<Self, InvalidConfiguration> {
        if current.dimensions() != goal.dimensions() {
            return Err(InvalidConfiguration::DimensionMismatch {
                current: current.dimensions(),
                goal: goal.dimensions(),
            });
        }
        let empty_position = find_empty(&current, empty, "current")?;
        find_empty(&goal, empty, "goal")?;

        Ok(Self {
            current,
            goal: Arc::new(goal),
            empty: empty_position,
        })
    }

    /// A solvable puzzle obtained by making `moves` random moves from `goal`.
    ///
    /// The walk only undoes its previous move when it's the only one left, as
    /// at the ends of a single row. A 1×1 board can't move at all.
    pub fn scrambled<R: rand::Rng>(
        goal: Grid<T>,
        empty: &T,
        moves: usize,
        r: &mut R,
    ) -> Result<Self, InvalidConfiguration> {
        let mut state = Self::new(goal.clone(), goal, empty)?;
        let mut previous: Option<Position> = None;

        for _ in 0..moves {
            let neighbours: Vec<Position> = state
                .current
                .neighbours(state.empty)
                .into_iter()
                .map(|(n, _)| n)
                .collect();
            let forward: Vec<Position> = neighbours
                .iter()
                .copied()
                .filter(|n| Some(*n) != previous)
                .collect();
            let candidates = if forward.is_empty() { neighbours } else { forward };
            if candidates.is_empty() {
                break;
            }
            let next = candidates[r.random_range(0..candidates.len())];
            previous = Some(state.empty);
            state = state.slide(next);
        }

        Ok(state)
    }

    pub fn current(&self) -> &Grid<T> {
        &self.current
    }

    pub fn goal(&self) -> &Grid<T> {
        &self.goal
    }

    pub fn empty(&self) -> Position {
        self.empty
    }

    /// The puzzle after sliding the tile at `tile` into the empty cell.
    fn slide(&self, tile: Position) -> Self {
        debug_assert!(self.current.neighbours(self.empty).iter().any(|(n, _)| *n == tile));

        let mut current = self.current.clone();
        current.swap(self.empty, tile);
        Self {
            current,
            goal: Arc::clone(&self.goal),
            empty: tile,
        }
    }
}

impl SlidingTileState<char> {
    /// The empty marker used by textual puzzles.
    pub const EMPTY: char = '*';

    /// Reads a puzzle from rows of characters, `*` being the empty cell.
    ///
    /// Rows are separated by newlines or `/`, so `"123/45*"` is a 2×3 grid.
    pub fn parse(current: &str, goal: &str) -> Result<Self, InvalidConfiguration> {
        Self::new(
            Grid::from_rows(char_rows(current))?,
            Grid::from_rows(char_rows(goal))?,
            &Self::EMPTY,
        )
    }
}

impl<T: Tile> PartialEq for SlidingTileState<T> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
            && (Arc::ptr_eq(&self.goal, &other.goal) || self.goal == other.goal)
    }
}
impl<T: Tile> Eq for SlidingTileState<T> {}

impl<T: Tile> Puzzle for SlidingTileState<T> {
    type Key = Grid<T>;

    fn extensions(&self) -> Vec<Self> {
        self.current
            .neighbours(self.empty)
            .into_iter()
            .map(|(n, _)| self.slide(n))
            .collect()
    }

    fn is_solved(&self) -> bool {
        self.current == *self.goal
    }

    fn key(&self) -> Self::Key {
        self.current.clone()
    }
}

impl<T: Tile> std::fmt::Display for SlidingTileState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "===Current Stage===")?;
        crate::grid::write_rows(f, &self.current, " ")?;
        writeln!(f)?;
        writeln!(f, "====Goal Board=====")?;
        crate::grid::write_rows(f, &self.goal, " ")
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::algorithms::breadth_first_solve;
    use crate::algorithms::depth_first_solve;

    fn grid(s: &str) -> Grid<char> {
        Grid::from_rows(char_rows(s)).unwrap()
    }

    #[test]
    fn identical_grids_are_solved() {
        let p = SlidingTileState::parse("123/45*", "123/45*").unwrap();
        assert!(p.is_solved());
        assert!(!SlidingTileState::parse("*23/145", "123/45*").unwrap().is_solved());
    }

    #[test]
    fn extensions_slide_into_the_empty_cell() {
        let p = SlidingTileState::parse("1*3/456/789", "*13/456/789").unwrap();
        let currents: Vec<String> = p
            .extensions()
            .iter()
            .map(|e| {
                e.current()
                    .rows()
                    .map(|row| row.iter().collect::<String>())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect();

        assert_eq!(currents.len(), 3);
        for expected in ["153/4*6/789", "*13/456/789", "13*/456/789"] {
            assert!(currents.contains(&expected.to_string()), "{expected} missing");
        }
    }

    #[test]
    fn extensions_swap_exactly_two_cells() {
        let goal = grid("1234/5678/9ab*");
        for (current, count) in [
            ("*234/5678/9ab1", 2),
            ("1*34/5678/9ab2", 3),
            ("1234/5*78/9ab6", 4),
            ("1234/567*/9ab8", 3),
        ] {
            let p = SlidingTileState::new(grid(current), goal.clone(), &'*').unwrap();
            let extensions = p.extensions();
            assert_eq!(extensions.len(), count, "{current}");

            for e in extensions {
                let changed: Vec<Position> = p
                    .current()
                    .cells()
                    .filter(|(pos, t)| e.current()[*pos] != **t)
                    .map(|(pos, _)| pos)
                    .collect();
                assert_eq!(changed.len(), 2);
                assert!(changed.contains(&p.empty()));
                assert!(changed.contains(&e.empty()));
                assert_eq!(e.goal(), p.goal());
            }
        }
    }

    #[test]
    fn arbitrary_tile_symbols() {
        let current = Grid::from_rows(vec![vec![1u8, 0], vec![2, 3]]).unwrap();
        let goal = Grid::from_rows(vec![vec![0u8, 1], vec![2, 3]]).unwrap();
        let p = SlidingTileState::new(current, goal, &0u8).unwrap();
        assert!(p.extensions().iter().any(Puzzle::is_solved));
    }

    #[test]
    fn rejects_invalid_configurations() {
        assert_eq!(
            SlidingTileState::parse("123/45*", "12/3*").unwrap_err(),
            InvalidConfiguration::DimensionMismatch {
                current: (2, 3),
                goal: (2, 2)
            }
        );
        assert_eq!(
            SlidingTileState::parse("123/456", "123/45*").unwrap_err(),
            InvalidConfiguration::MissingEmptyMarker { grid: "current" }
        );
        assert_eq!(
            SlidingTileState::parse("123/45*", "123/456").unwrap_err(),
            InvalidConfiguration::MissingEmptyMarker { grid: "goal" }
        );
        assert_eq!(
            SlidingTileState::parse("12*/45*", "123/45*").unwrap_err(),
            InvalidConfiguration::DuplicateEmptyMarker { grid: "current" }
        );
        assert_eq!(
            SlidingTileState::parse("123/4*", "123/45*").unwrap_err(),
            InvalidConfiguration::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn scrambles_are_reproducible() {
        let goal = grid("123/456/78*");
        let scramble = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            SlidingTileState::scrambled(goal.clone(), &'*', 20, &mut rng).unwrap()
        };
        let a = scramble(7);
        let b = scramble(7);
        assert_eq!(a, b);
        assert_eq!(a.goal(), &goal);
        assert_eq!(a.current()[a.empty()], '*');
    }

    #[test]
    fn goals_with_other_tiles_are_unsolvable() {
        let start = SlidingTileState::parse("12/3*", "12/4*").unwrap();
        assert!(!start.is_solved());
        assert!(depth_first_solve(start.clone()).is_none());
        assert!(breadth_first_solve(start).is_none());

        let start = SlidingTileState::parse("123/45*", "123/46*").unwrap();
        assert!(depth_first_solve(start).is_none());
    }

    #[test]
    fn scrambles_on_a_single_row_bounce_at_the_ends() {
        let goal = grid("12*");
        let p = SlidingTileState::scrambled(goal, &'*', 3, &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();
        // 12* -> 1*2 -> *12 -> 1*2, the only moves available.
        assert_eq!(p.current(), &grid("1*2"));
        assert_eq!(p.empty(), Position::new(0, 1));
    }

    #[test]
    fn scrambles_of_a_single_cell_stay_put() {
        let goal = grid("*");
        let p = SlidingTileState::scrambled(goal, &'*', 5, &mut ChaCha8Rng::seed_from_u64(3))
            .unwrap();
        assert!(p.is_solved());
        assert!(p.extensions().is_empty());
    }

    #[test]
    fn never_fails_fast() {
        assert!(!SlidingTileState::parse("213/45*", "123/45*").unwrap().fail_fast());
        assert!(!SlidingTileState::parse("12/3*", "12/4*").unwrap().fail_fast());
    }

    #[test]
    fn display_shows_both_boards() {
        let p = SlidingTileState::parse("123/45*", "*23/145").unwrap();
        assert_eq!(
            p.to_string(),
            indoc! {"
                ===Current Stage===
                1 2 3
                4 5 *
                ====Goal Board=====
                * 2 3
                1 4 5"}
        );
    }
}
