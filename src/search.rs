use nonmax::NonMaxUsize;

use crate::path::Path;
use crate::puzzle::Puzzle;

/// A reference to a `SearchTreeNode<P>` within its `SearchTree<P>`.
///
/// `NonMaxUsize` lets `Option<NodeIndex>` stay as narrow as a `usize`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex {
    index: NonMaxUsize,
}

impl NodeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        match NonMaxUsize::new(index) {
            Some(index) => Self { index },
            None => unreachable!("The SearchTree can't hold usize::MAX nodes"),
        }
    }

    #[inline(always)]
    fn get(&self) -> usize {
        self.index.get()
    }
}

/// A puzzle state together with the states expanded from it.
///
/// Children are owned exclusively by their parent, the parent link is just a
/// back-reference used to rebuild the path.
#[derive(Debug)]
pub struct SearchTreeNode<P: Puzzle> {
    pub(crate) state: P,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,
}

impl<P: Puzzle> SearchTreeNode<P> {
    pub fn new(state: P, parent: Option<NodeIndex>) -> Self {
        Self {
            state,
            parent,
            children: vec![],
        }
    }

    pub fn state(&self) -> &P {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }
}

/// Arena of search nodes.
///
/// Dropping a subtree returns its slots to a free-list so long searches reuse
/// the memory of exhausted branches.
pub(crate) struct SearchTree<P: Puzzle> {
    nodes: Vec<Option<SearchTreeNode<P>>>,
    free: Vec<NodeIndex>,
    live: usize,
}

impl<P: Puzzle> SearchTree<P> {
    #[inline(always)]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(1024),
            free: vec![],
            live: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, node: SearchTreeNode<P>) -> NodeIndex {
        self.live += 1;
        match self.free.pop() {
            Some(i) => {
                debug_assert!(self.nodes[i.get()].is_none());
                self.nodes[i.get()] = Some(node);
                i
            }
            None => {
                self.nodes.push(Some(node));
                NodeIndex::new(self.nodes.len() - 1)
            }
        }
    }

    /// Number of live nodes.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Number of slots ever allocated.
    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Creates a child node for every extension of `index`.
    ///
    /// Any previous children are dropped first.
    pub(crate) fn expand(&mut self, index: NodeIndex) -> &[NodeIndex] {
        self.expand_with(index, |_| true)
    }

    /// Creates a child node for every extension of `index` that passes `keep`.
    ///
    /// Any previous children are dropped first.
    pub(crate) fn expand_with<F>(&mut self, index: NodeIndex, mut keep: F) -> &[NodeIndex]
    where
        F: FnMut(&P) -> bool,
    {
        self.drop_children(index);

        let extensions = self[index].state.extensions();
        let mut children = Vec::with_capacity(extensions.len());
        for s in extensions {
            debug_assert!(s != self[index].state, "A state can't extend itself");
            if keep(&s) {
                children.push(self.push(SearchTreeNode::new(s, Some(index))));
            }
        }
        self[index].children = children;
        self.verify(index);

        &self[index].children
    }

    /// Removes a leaf that leads nowhere.
    ///
    /// Ancestors left without children are dead ends too and get removed as
    /// well. The root is always kept.
    pub(crate) fn prune_dead_end(&mut self, mut index: NodeIndex) {
        debug_assert!(self[index].children.is_empty());

        while let Some(parent) = self[index].parent {
            self.drop_subtree(index);
            self[parent].children.retain(|&c| c != index);
            if !self[parent].children.is_empty() {
                return;
            }
            index = parent;
        }
    }

    /// Frees every descendant of `index`, leaving it as a leaf.
    pub(crate) fn drop_children(&mut self, index: NodeIndex) {
        let mut pending = std::mem::take(&mut self[index].children);
        while let Some(i) = pending.pop() {
            match self.nodes[i.get()].take() {
                Some(node) => pending.extend(node.children),
                None => unreachable!("Dropped a SearchTreeNode twice"),
            }
            self.free.push(i);
            self.live -= 1;
        }
    }

    /// Keeps only the branch leading to `leaf`.
    ///
    /// Walking up to the root, every ancestor's children are replaced by the
    /// single child on the way to `leaf`. The leaf loses its own children.
    /// Returns the root.
    pub(crate) fn isolate(&mut self, leaf: NodeIndex) -> NodeIndex {
        self.drop_children(leaf);

        let mut node = leaf;
        while let Some(parent) = self[node].parent {
            let siblings = std::mem::replace(&mut self[parent].children, vec![node]);
            for sibling in siblings {
                if sibling != node {
                    self.drop_subtree(sibling);
                }
            }
            node = parent;
        }
        node
    }

    /// Frees `index` and all its descendants.
    fn drop_subtree(&mut self, index: NodeIndex) {
        self.drop_children(index);
        self.nodes[index.get()] = None;
        self.free.push(index);
        self.live -= 1;
    }

    /// The Path from the root to `leaf`, following parent links.
    #[must_use]
    pub fn path(&self, mut index: NodeIndex) -> Path<P> {
        let mut path = Path::new_from_start(self[index].state.clone());

        while let Some(parent) = self[index].parent {
            debug_assert!(index != parent);
            debug_assert!(self[parent].children.contains(&index));
            path.append(self[parent].state.clone());
            index = parent;
        }

        path.reverse();
        path
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify(&self, _index: NodeIndex) {
        // All good... (hopefully)
    }
    /// Checks that the children of `index` are reachable in one move.
    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify(&self, index: NodeIndex) {
        let node = &self[index];
        let extensions = node.state.extensions();
        for &child in &node.children {
            assert_eq!(self[child].parent, Some(index));
            assert!(
                extensions.contains(&self[child].state),
                "{:?} is not an extension of {:?}",
                self[child].state,
                node.state,
            );
        }
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        let s = size_of::<Option<SearchTreeNode<P>>>();
        let l = self.len();
        let c = self.capacity();
        writeln!(
            out,
            "  - |Nodes|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Nodes|*:  {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        Ok(())
    }
}

impl<P: Puzzle> Default for SearchTree<P> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Puzzle> std::ops::Index<NodeIndex> for SearchTree<P> {
    type Output = SearchTreeNode<P>;

    #[inline(always)]
    fn index(&self, index: NodeIndex) -> &Self::Output {
        match &self.nodes[index.get()] {
            Some(node) => node,
            None => unreachable!("Accessed a dropped SearchTreeNode"),
        }
    }
}

impl<P: Puzzle> std::ops::IndexMut<NodeIndex> for SearchTree<P> {
    #[inline(always)]
    fn index_mut(&mut self, index: NodeIndex) -> &mut SearchTreeNode<P> {
        match &mut self.nodes[index.get()] {
            Some(node) => node,
            None => unreachable!("Accessed a dropped SearchTreeNode"),
        }
    }
}

impl<P: Puzzle> std::fmt::Debug for SearchTree<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::problems::word_ladder::Dictionary;
    use crate::problems::word_ladder::WordLadderState;

    fn ladder(from: &str) -> WordLadderState {
        let words = Arc::new(Dictionary::from_iter(["cat", "cot", "cog", "dog", "bat", "hat"]));
        WordLadderState::new(from, "dog", words)
    }

    #[test]
    fn expand_links_children_to_parent() {
        let mut tree = SearchTree::new();
        let root = tree.push(SearchTreeNode::new(ladder("cat"), None));
        let children = tree.expand(root).to_vec();

        // cat -> bat, hat, cot
        assert_eq!(children.len(), 3);
        for c in &children {
            assert_eq!(tree[*c].parent(), Some(root));
        }
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn isolate_drops_siblings_and_reuses_slots() {
        let mut tree = SearchTree::new();
        let root = tree.push(SearchTreeNode::new(ladder("cat"), None));
        let children = tree.expand(root).to_vec();
        let cot = *children
            .iter()
            .find(|&&c| tree[c].state().word() == "cot")
            .unwrap();
        let grandchildren = tree.expand(cot).to_vec();
        let cog = *grandchildren
            .iter()
            .find(|&&c| tree[c].state().word() == "cog")
            .unwrap();
        tree.expand(cog);
        let before = tree.capacity();

        assert_eq!(tree.isolate(cog), root);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree[root].children(), &[cot]);
        assert_eq!(tree[cot].children(), &[cog]);
        assert!(tree[cog].children().is_empty());

        let words: Vec<_> = tree
            .path(cog)
            .states()
            .iter()
            .map(|s| s.word().to_string())
            .collect();
        assert_eq!(words, vec!["cat", "cot", "cog"]);

        // Freed slots get reused.
        tree.expand(cog);
        assert_eq!(tree.capacity(), before);
    }

    #[test]
    fn dead_ends_are_pruned_upwards() {
        let mut tree = SearchTree::new();
        let root = tree.push(SearchTreeNode::new(ladder("cat"), None));
        let children = tree.expand(root).to_vec();
        let bat = *children
            .iter()
            .find(|&&c| tree[c].state().word() == "bat")
            .unwrap();
        // bat -> cat, hat; keep only hat.
        let grandchildren = tree
            .expand_with(bat, |s| s.word() == "hat")
            .to_vec();
        assert_eq!(grandchildren.len(), 1);
        assert_eq!(tree.len(), 5);

        tree.prune_dead_end(grandchildren[0]);
        assert_eq!(tree.len(), 3);
        assert!(!tree[root].children().contains(&bat));
        assert_eq!(tree[root].children().len(), 2);
    }
}
