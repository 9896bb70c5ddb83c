//! Exhaustive breadth-first search.

use std::collections::VecDeque;

use log::debug;
use log::trace;
use rustc_hash::FxHashSet;

use crate::path::Path;
use crate::puzzle::Puzzle;
use crate::search::NodeIndex;
use crate::search::SearchTree;
use crate::search::SearchTreeNode;

/// Breadth-first search.
///
/// Nodes are expanded in non-decreasing depth, so the first solved state found
/// is one with the fewest moves among those not pruned by `fail_fast()`.
///
/// With memoization (the default) a state is queued only the first time it's
/// generated. Without it the search still terminates on solvable puzzles but
/// may expand the same state many times, and never terminates on unsolvable
/// puzzles with cycles.
#[derive(Debug)]
pub struct BreadthFirstSearch<P: Puzzle> {
    tree: SearchTree<P>,
    root: NodeIndex,
    open: VecDeque<NodeIndex>,
    /// Keys of every state ever queued.
    seen: FxHashSet<P::Key>,
    memoize: bool,
    expanded: usize,
    finished: bool,
}

impl<P: Puzzle> BreadthFirstSearch<P> {
    /// Initialises the Search
    #[must_use]
    pub fn new(start: P) -> Self {
        let mut tree = SearchTree::new();
        let root = tree.push(SearchTreeNode::new(start, None));

        Self {
            tree,
            root,
            open: VecDeque::with_capacity(1024),
            seen: FxHashSet::default(),
            memoize: true,
            expanded: 0,
            finished: false,
        }
    }

    /// Enables or disables skipping already generated states.
    #[must_use]
    pub fn with_memoization(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
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

        debug!(
            "BFS starting from\n{} (memoization: {})",
            self.tree[self.root].state(),
            self.memoize
        );
        match self.search() {
            Some(leaf) => {
                let root = self.tree.isolate(leaf);
                debug_assert_eq!(root, self.root);
                self.open.clear();
                let path = self.tree.path(leaf);
                debug!(
                    "BFS found a {}-move path after {} expansions",
                    path.len(),
                    self.expanded
                );
                Some(path)
            }
            None => {
                debug!("BFS exhausted the puzzle after {} expansions", self.expanded);
                None
            }
        }
    }

    /// Number of expanded states.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn search(&mut self) -> Option<NodeIndex> {
        if self.tree[self.root].state().is_solved() {
            return Some(self.root);
        }
        if self.memoize {
            self.seen.insert(self.tree[self.root].state().key());
        }
        self.expand(self.root);

        while let Some(node) = self.open.pop_front() {
            let state = self.tree[node].state();
            if state.is_solved() {
                return Some(node);
            }
            if state.fail_fast() {
                self.tree.prune_dead_end(node);
                continue;
            }
            self.expand(node);
        }

        None
    }

    /// Expands `node` and queues its children.
    fn expand(&mut self, node: NodeIndex) {
        trace!("BFS expanding\n{}", self.tree[node].state());
        self.expanded += 1;

        let memoize = self.memoize;
        let seen = &mut self.seen;
        let children = self
            .tree
            .expand_with(node, |s| !memoize || seen.insert(s.key()));
        self.open.extend(children.iter().copied());

        if children.is_empty() && node != self.root {
            self.tree.prune_dead_end(node);
        }
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "BreadthFirstSearch Stats:")?;
        self.tree.write_memory_stats(&mut out)?;

        let s = size_of::<NodeIndex>();
        let l = self.open.len();
        let c = self.open.capacity();
        writeln!(
            out,
            "  - |Open|:    {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Open|*:   {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<P::Key>();
        let l = self.seen.len();
        writeln!(
            out,
            "  - |Seen|:    {} ({})",
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

/// Searches breadth-first from `start`, with memoization.
///
/// Returns a path with the fewest moves to a solved state, or `None` when no
/// solved state is reachable.
#[must_use]
pub fn breadth_first_solve<P: Puzzle>(start: P) -> Option<Path<P>> {
    BreadthFirstSearch::new(start).find_solution()
}
