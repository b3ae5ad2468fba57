//! Index-keyed symmetric adjacency relation.

use thiserror::Error;

/// First broken invariant found by [`AdjacencyGraph::check_invariants`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("region {index} lists itself")]
    SelfLoop { index: usize },
    #[error("region {index} lists {neighbor} more than once")]
    Duplicate { index: usize, neighbor: usize },
    #[error("region {from} lists {to} but not the reverse")]
    Asymmetric { from: usize, to: usize },
    #[error("region {index} lists unknown region {neighbor}")]
    OutOfRange { index: usize, neighbor: usize },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    lists: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    pub fn new(len: usize) -> Self {
        AdjacencyGraph { lists: vec![Vec::new(); len] }
    }

    /// Wrap existing lists as-is; use `check_invariants` to validate them.
    pub fn from_lists(lists: Vec<Vec<usize>>) -> Self {
        AdjacencyGraph { lists }
    }

    #[inline] pub fn len(&self) -> usize { self.lists.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.lists.is_empty() }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.lists.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Record `a ~ b` on both sides. Returns false for self pairs, unknown
    /// indices, or pairs already present.
    pub fn link(&mut self, a: usize, b: usize) -> bool {
        if a == b || a >= self.lists.len() || b >= self.lists.len() || self.contains(a, b) {
            return false;
        }
        self.lists[a].push(b);
        if !self.lists[b].contains(&a) {
            self.lists[b].push(a);
        }
        true
    }

    /// Number of unordered adjacent pairs.
    pub fn pair_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let n = self.lists.len();
        for (index, list) in self.lists.iter().enumerate() {
            for (k, &neighbor) in list.iter().enumerate() {
                if neighbor == index {
                    return Err(InvariantViolation::SelfLoop { index });
                }
                if neighbor >= n {
                    return Err(InvariantViolation::OutOfRange { index, neighbor });
                }
                if list[..k].contains(&neighbor) {
                    return Err(InvariantViolation::Duplicate { index, neighbor });
                }
                if !self.lists[neighbor].contains(&index) {
                    return Err(InvariantViolation::Asymmetric { from: index, to: neighbor });
                }
            }
        }
        Ok(())
    }
}
