#![no_main]

use libfuzzer_sys::fuzz_target;

use puzzle_search::problems::peg_solitaire::GridPegSolitaireState;
use puzzle_search::problems::sliding_tile::SlidingTileState;
use puzzle_search::puzzle::Puzzle;

// Boards are split on the first '|' as `current|goal` or `board|markers`.
fuzz_target!(|data: &str| {
    let (a, b) = data.split_once('|').unwrap_or((data, "*.#"));

    if let Ok(p) = GridPegSolitaireState::parse(a, b) {
        for e in p.extensions() {
            assert_eq!(e.pegs() + 1, p.pegs());
        }
    }
    if let Ok(p) = SlidingTileState::parse(a, b) {
        for e in p.extensions() {
            assert_eq!(e.goal(), p.goal());
        }
    }
});
