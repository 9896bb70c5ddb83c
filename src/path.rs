use crate::puzzle::Puzzle;

/// The chain of states from an initial configuration to a solved one.
///
/// Always holds at least one state. A puzzle that starts solved has a Path of
/// a single state and no moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<P: Puzzle> {
    states: Vec<P>,
}

impl<P: Puzzle> Path<P> {
    #[inline(always)]
    pub fn new_from_start(start: P) -> Self {
        Self {
            states: vec![start],
        }
    }

    #[inline(always)]
    pub fn append(&mut self, s: P) {
        self.states.push(s);
    }

    /// Reverses the Path.
    ///
    /// Useful when naturally reconstructing paths from the end.
    pub fn reverse(&mut self) {
        self.states.reverse();
    }

    #[inline(always)]
    pub fn start(&self) -> &P {
        &self.states[0]
    }

    #[inline(always)]
    pub fn end(&self) -> &P {
        &self.states[self.states.len() - 1]
    }

    /// Number of moves, one less than the number of states.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.states.len() - 1
    }

    /// Whether the Path has no moves.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn states(&self) -> &[P] {
        &self.states
    }

    pub fn into_states(self) -> Vec<P> {
        self.states
    }

    /// Checks that every step is a legal move and that the Path ends solved.
    pub fn is_valid(&self) -> bool {
        self.end().is_solved()
            && self
                .states
                .windows(2)
                .all(|w| w[0].extensions().contains(&w[1]))
    }
}

impl<P: Puzzle> std::fmt::Display for Path<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Path({} moves):", self.len())?;
        for (i, s) in self.states.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{s}")?;
        }
        Ok(())
    }
}
