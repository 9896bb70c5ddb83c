//! Exhaustive depth-first search.
//!
//! The search is iterative, pending siblings live in an explicit stack of
//! frames, so deep puzzles only cost heap memory instead of call stack.

use log::debug;
use log::trace;
use rustc_hash::FxHashSet;

use crate::path::Path;
use crate::puzzle::Puzzle;
use crate::search::NodeIndex;
use crate::search::SearchTree;
use crate::search::SearchTreeNode;

/// A node being explored and the next of its children to visit.
#[derive(Copy, Clone, Debug)]
struct Frame {
    node: NodeIndex,
    next_child: usize,
}

/// Depth-first search with memoization of expanded states.
///
/// Visits children in `Puzzle::extensions()` order, skipping children that
/// `fail_fast()` or whose state was already expanded, and backtracks on dead
/// ends. The first solved state found is returned, which is not necessarily
/// the closest one.
#[derive(Debug)]
pub struct DepthFirstSearch<P: Puzzle> {
    tree: SearchTree<P>,
    root: NodeIndex,
    stack: Vec<Frame>,
    /// Keys of expanded states.
    visited: FxHashSet<P::Key>,
    expanded: usize,
    finished: bool,
}

impl<P: Puzzle> DepthFirstSearch<P> {
    /// Initialises the Search
    #[must_use]
    pub fn new(start: P) -> Self {
        let mut tree = SearchTree::new();
        let root = tree.push(SearchTreeNode::new(start, None));

        Self {
            tree,
            root,
            stack: Vec::with_capacity(256),
            visited: FxHashSet::default(),
            expanded: 0,
            finished: false,
        }
    }

    /// Runs the search until a solved state is found or every reachable state
    /// was explored.
    ///
    /// Returns `None` if the puzzle has no solution, and on any call after the
    /// first.
    #[must_use]
    pub fn find_solution(&mut self) -> Option<Path<P>> {
        if self.finished {
            return None;
        }
        self.finished = true;

        debug!("DFS starting from\n{}", self.tree[self.root].state());
        match self.search() {
            Some(leaf) => {
                let root = self.tree.isolate(leaf);
                debug_assert_eq!(root, self.root);
                let path = self.tree.path(leaf);
                debug!(
                    "DFS found a {}-move path after {} expansions",
                    path.len(),
                    self.expanded
                );
                Some(path)
            }
            None => {
                debug!("DFS exhausted the puzzle after {} expansions", self.expanded);
                None
            }
        }
    }

    /// Number of expanded states.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn search(&mut self) -> Option<NodeIndex> {
        if self.enter(self.root) {
            return Some(self.root);
        }

        while let Some(frame) = self.stack.last_mut() {
            let node = frame.node;
            match self.tree[node].children().get(frame.next_child) {
                Some(&child) => {
                    frame.next_child += 1;

                    let state = self.tree[child].state();
                    if state.fail_fast() || self.visited.contains(&state.key()) {
                        continue;
                    }
                    if self.enter(child) {
                        return Some(child);
                    }
                }
                None => {
                    // Every child was explored, nothing below this node matters.
                    self.stack.pop();
                    self.tree.drop_children(node);
                }
            }
        }

        None
    }

    /// Visits a node, expanding it unless it's solved.
    ///
    /// Returns whether the node is solved.
    fn enter(&mut self, node: NodeIndex) -> bool {
        if self.tree[node].state().is_solved() {
            return true;
        }

        trace!("DFS expanding\n{}", self.tree[node].state());
        self.tree.expand(node);
        self.expanded += 1;
        self.visited.insert(self.tree[node].state().key());
        self.stack.push(Frame {
            node,
            next_child: 0,
        });

        false
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "DepthFirstSearch Stats:")?;
        self.tree.write_memory_stats(&mut out)?;

        let s = size_of::<P::Key>();
        let l = self.visited.len();
        writeln!(
            out,
            "  - |Visited|: {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - Expanded nodes: {}",
            self.expanded.separate_with_commas()
        )?;

        Ok(())
    }
    pub fn print_memory_stats(&self) -> std::io::Result<()> {
        self.write_memory_stats(std::io::stdout().lock())
    }
}

/// Searches depth-first from `start`.
///
/// Returns the path to the first solved state found, or `None` when no
/// solved state is reachable.
#[must_use]
pub fn depth_first_solve<P: Puzzle>(start: P) -> Option<Path<P>> {
    DepthFirstSearch::new(start).find_solution()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indoc::indoc;

    use super::*;
    use crate::problems::peg_solitaire::GridPegSolitaireState;
    use crate::problems::sliding_tile::SlidingTileState;
    use crate::problems::word_ladder::Dictionary;
    use crate::problems::word_ladder::WordLadderState;

    #[test]
    fn solve_peg_solitaire_5x5() {
        let start = GridPegSolitaireState::parse(
            indoc! {"
                *****
                *****
                *****
                **.**
                *****
            "},
            "*.#",
        )
        .unwrap();

        let path = depth_first_solve(start.clone()).unwrap();
        assert_eq!(path.start(), &start);
        assert_eq!(path.end().pegs(), 1);
        assert!(path.end().is_solved());
        // Every jump removes a single peg.
        assert_eq!(path.len(), 23);
        assert!(path.is_valid());
    }

    #[test]
    #[ignore = "exhausts ~1.2M boards"]
    fn peg_solitaire_5x5_with_central_hole_is_unsolvable() {
        let start = GridPegSolitaireState::parse(
            indoc! {"
                *****
                *****
                **.**
                *****
                *****
            "},
            "*.#",
        )
        .unwrap();

        assert!(depth_first_solve(start).is_none());
    }

    #[test]
    fn solved_start_is_a_single_state_path() {
        let start = SlidingTileState::parse("123/45*", "123/45*").unwrap();
        let mut search = DepthFirstSearch::new(start.clone());
        let path = search.find_solution().unwrap();

        assert_eq!(path.states(), &[start]);
        assert!(path.is_empty());
        assert_eq!(search.expanded(), 0);
    }

    #[test]
    fn solve_sliding_tile() {
        let start = SlidingTileState::parse("*23/145", "123/45*").unwrap();
        let path = depth_first_solve(start).unwrap();
        assert!(path.is_valid());
    }

    #[test]
    fn unsolvable_sliding_tile() {
        // Swapping two tiles changes the permutation parity.
        let start = SlidingTileState::parse("213/45*", "123/45*").unwrap();
        let mut search = DepthFirstSearch::new(start);
        assert!(search.find_solution().is_none());
        // 2×3 boards have 6!/2 reachable configurations.
        assert_eq!(search.expanded(), 360);
    }

    #[test]
    fn unsolvable_word_ladder() {
        let words = Arc::new(Dictionary::from_iter(["same", "cost", "came", "case"]));
        let start = WordLadderState::new("same", "cost", words);
        assert!(depth_first_solve(start).is_none());
    }

    #[test]
    fn finds_a_solution_only_once() {
        let words = Arc::new(Dictionary::from_iter(["cat", "cot", "cog", "dog"]));
        let mut search = DepthFirstSearch::new(WordLadderState::new("cat", "dog", words));

        let path = search.find_solution().unwrap();
        let words: Vec<&str> = path.states().iter().map(|s| s.word()).collect();
        assert_eq!(words, vec!["cat", "cot", "cog", "dog"]);
        assert!(search.find_solution().is_none());
    }

    #[test]
    fn memory_stats() {
        let start = SlidingTileState::parse("*23/145", "123/45*").unwrap();
        let mut search = DepthFirstSearch::new(start);
        assert!(search.find_solution().is_some());

        let mut out = Vec::new();
        search.write_memory_stats(&mut out).unwrap();
        let report = String::from_utf8(out).unwrap();
        assert!(report.starts_with("DepthFirstSearch Stats:"));
        assert!(report.contains("Expanded nodes"));
    }
}
