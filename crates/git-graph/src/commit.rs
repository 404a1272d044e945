//! Input records consumed by the layout engine.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Identifier type usable as a commit id.
///
/// Blanket-implemented for anything hashable, cloneable and printable, so
/// `String`, `&str`, integers and fixed-size hash arrays all work.
pub trait CommitId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> CommitId for T {}

/// One commit as seen by the layout engine.
///
/// The record's row is its position in the slice handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord<I> {
    /// Unique identifier of this commit.
    pub id: I,
    /// Parent ids. Index 0 is the first parent (the line this commit
    /// continues); the rest are merge parents.
    pub parents: Vec<I>,
}

impl<I: CommitId> CommitRecord<I> {
    /// Create a record from an id and its parents.
    pub fn new(id: I, parents: impl IntoIterator<Item = I>) -> Self {
        Self {
            id,
            parents: parents.into_iter().collect(),
        }
    }

    /// The first parent, if any.
    pub fn first_parent(&self) -> Option<&I> {
        self.parents.first()
    }

    /// Parents at index 1 and above.
    pub fn merge_parents(&self) -> &[I] {
        self.parents.get(1..).unwrap_or(&[])
    }

    /// True for root commits.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// True when the commit has more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}
