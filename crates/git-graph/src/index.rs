//! Reverse-adjacency index over a commit sequence.
//!
//! Maps every commit to the commits naming it as a parent and classifies
//! each such child as a first-parent continuation or a merge reference.
//! All lookups after construction are by row, so the allocators never
//! clone or hash ids on the hot path.

use std::collections::HashMap;

use crate::commit::{CommitId, CommitRecord};
use crate::LayoutError;

/// Children of one commit, as rows in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children {
    /// Children whose first parent is this commit.
    pub primary: Vec<usize>,
    /// Children that reference this commit only as a merge parent.
    pub merge: Vec<usize>,
}

impl Children {
    /// True when nothing references the commit.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.merge.is_empty()
    }

}

/// Parents of one commit resolved to rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parents {
    /// Row of the first parent, `None` for roots and for first parents
    /// outside the input window.
    pub first: Option<usize>,
    /// Rows of the merge parents present in the input, in parent order.
    pub merges: Vec<usize>,
    /// Number of parent ids that did not resolve to any row.
    pub missing: usize,
}

/// Child/parent index built once per layout run.
#[derive(Debug, Clone)]
pub struct CommitIndex<I> {
    ids: Vec<I>,
    rows: HashMap<I, usize>,
    children: Vec<Children>,
    parents: Vec<Parents>,
}

impl<I: CommitId> CommitIndex<I> {
    /// Build the index and validate it.
    ///
    /// Fails when the parent edges contain a cycle, or when a parent does
    /// not come after its child in the sequence.
    pub fn build(commits: &[CommitRecord<I>]) -> Result<Self, LayoutError> {
        let index = Self::build_unchecked(commits);
        index.check_acyclic()?;
        index.check_order()?;
        Ok(index)
    }

    /// Build the index without structural validation.
    pub fn build_unchecked(commits: &[CommitRecord<I>]) -> Self {
        let mut rows: HashMap<I, usize> = HashMap::with_capacity(commits.len());
        // Owner rows whose id shows up again further down.
        let mut repeated = vec![false; commits.len()];
        for (row, commit) in commits.iter().enumerate() {
            if let Some(&owner) = rows.get(&commit.id) {
                log::warn!(
                    "duplicate commit {:?} at row {row}; laid out as an unreferenced commit",
                    commit.id
                );
                repeated[owner] = true;
                continue;
            }
            rows.insert(commit.id.clone(), row);
        }

        let mut children = vec![Children::default(); commits.len()];
        let mut parents = Vec::with_capacity(commits.len());

        for (row, commit) in commits.iter().enumerate() {
            let mut resolved = Parents::default();
            let duplicate = rows.get(&commit.id) != Some(&row);

            for (pi, parent) in commit.parents.iter().enumerate() {
                if commit.parents[..pi].contains(parent) {
                    continue;
                }
                let Some(&prow) = rows.get(parent) else {
                    log::debug!("commit {:?}: parent {parent:?} not in input", commit.id);
                    resolved.missing += 1;
                    continue;
                };
                // Repeated ids only link downwards; an edge pointing back up
                // through a duplicate is dropped like a missing parent.
                if prow <= row && (duplicate || repeated[prow]) {
                    log::debug!(
                        "commit {:?} at row {row}: parent {parent:?} is a repeated id above it",
                        commit.id
                    );
                    resolved.missing += 1;
                    continue;
                }

                if pi == 0 {
                    resolved.first = Some(prow);
                    children[prow].primary.push(row);
                } else {
                    resolved.merges.push(prow);
                    children[prow].merge.push(row);
                }
            }
            parents.push(resolved);
        }

        Self {
            ids: commits.iter().map(|c| c.id.clone()).collect(),
            rows,
            children,
            parents,
        }
    }

    /// Number of commits indexed.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when the index holds no commits.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Row of the commit owning `id`.
    pub fn row_of(&self, id: &I) -> Option<usize> {
        self.rows.get(id).copied()
    }

    /// Id of the commit at `row`.
    pub fn id_at(&self, row: usize) -> &I {
        &self.ids[row]
    }

    /// Children of the commit at `row`.
    pub fn children(&self, row: usize) -> &Children {
        &self.children[row]
    }

    /// Parents of the commit at `row`.
    pub fn parents(&self, row: usize) -> &Parents {
        &self.parents[row]
    }

    /// Rows of all present parents, first parent first.
    pub fn parent_rows(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        let parents = &self.parents[row];
        parents.first.into_iter().chain(parents.merges.iter().copied())
    }

    /// Children of the commit with the given id.
    pub fn children_of(&self, id: &I) -> Option<&Children> {
        self.row_of(id).map(|row| self.children(row))
    }

    /// Fail on the first cycle among present parent edges.
    ///
    /// Iterative depth-first walk; a commit reached again while still on
    /// the walk stack closes a cycle.
    fn check_acyclic(&self) -> Result<(), LayoutError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            OnStack,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.len()];
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for start in 0..self.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            marks[start] = Mark::OnStack;
            stack.push((start, 0));

            while let Some(&(row, next)) = stack.last() {
                match self.parent_rows(row).nth(next) {
                    Some(parent) => {
                        if let Some(top) = stack.last_mut() {
                            top.1 += 1;
                        }
                        match marks[parent] {
                            Mark::OnStack => {
                                return Err(LayoutError::Cycle {
                                    id: format!("{:?}", self.ids[parent]),
                                });
                            }
                            Mark::Unvisited => {
                                marks[parent] = Mark::OnStack;
                                stack.push((parent, 0));
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        marks[row] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }

    /// Every present parent must sit below its child.
    fn check_order(&self) -> Result<(), LayoutError> {
        for row in 0..self.len() {
            for prow in self.parent_rows(row) {
                if prow <= row {
                    return Err(LayoutError::OutOfOrder {
                        child: format!("{:?}", self.ids[row]),
                        parent: format!("{:?}", self.ids[prow]),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &'static str, parents: &[&'static str]) -> CommitRecord<&'static str> {
        CommitRecord::new(id, parents.iter().copied())
    }

    #[test]
    fn classifies_primary_and_merge_children() {
        let commits = vec![
            rec("m", &["a", "b"]),
            rec("a", &["base"]),
            rec("b", &["base"]),
            rec("base", &[]),
        ];
        let index = CommitIndex::build(&commits).unwrap();

        assert_eq!(index.children(1).primary, vec![0]);
        assert!(index.children(1).merge.is_empty());
        assert_eq!(index.children(2).merge, vec![0]);
        assert!(index.children(2).primary.is_empty());
        assert_eq!(index.children(3).primary, vec![1, 2]);
        assert!(index.children(0).is_empty());
    }

    #[test]
    fn every_commit_has_an_entry() {
        let commits = vec![rec("a", &[]), rec("b", &[])];
        let index = CommitIndex::build(&commits).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.children_of(&"a").unwrap().is_empty());
        assert!(index.children_of(&"b").unwrap().is_empty());
    }

    #[test]
    fn missing_parents_are_counted_not_linked() {
        let commits = vec![rec("a", &["gone", "b"]), rec("b", &[])];
        let index = CommitIndex::build(&commits).unwrap();
        let parents = index.parents(0);
        assert_eq!(parents.first, None);
        assert_eq!(parents.merges, vec![1]);
        assert_eq!(parents.missing, 1);
        assert_eq!(index.children(1).merge, vec![0]);
    }

    #[test]
    fn repeated_parent_counts_once() {
        let commits = vec![rec("a", &["b", "b"]), rec("b", &[])];
        let index = CommitIndex::build(&commits).unwrap();
        assert_eq!(index.children(1).primary, vec![0]);
        assert!(index.children(1).merge.is_empty());
        assert!(index.parents(0).merges.is_empty());
    }

    #[test]
    fn duplicate_id_keeps_first_row() {
        let commits = vec![rec("a", &["b"]), rec("b", &[]), rec("a", &[])];
        let index = CommitIndex::build(&commits).unwrap();
        assert_eq!(index.row_of(&"a"), Some(0));
        assert_eq!(index.len(), 3);
        assert_eq!(index.id_at(2), &"a");
    }

    #[test]
    fn duplicate_drops_parents_already_laid_out() {
        let commits = vec![
            rec("c", &["a"]),
            rec("a", &[]),
            rec("c", &["a", "z"]),
            rec("z", &[]),
        ];
        let index = CommitIndex::build(&commits).unwrap();

        let parents = index.parents(2);
        assert_eq!(parents.first, None);
        assert_eq!(parents.merges, vec![3]);
        assert_eq!(parents.missing, 1);
        assert_eq!(index.children(1).primary, vec![0]);
        assert_eq!(index.children(3).merge, vec![2]);
    }

    #[test]
    fn reference_to_repeated_id_above_is_dropped() {
        // "a" is first listed above "c", then again below it.
        let commits = vec![rec("a", &[]), rec("c", &["a"]), rec("a", &[])];
        let index = CommitIndex::build(&commits).unwrap();
        assert_eq!(index.parents(1).first, None);
        assert_eq!(index.parents(1).missing, 1);
        assert!(index.children(0).is_empty());
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let commits = vec![rec("a", &["a"])];
        let err = CommitIndex::build(&commits).unwrap_err();
        assert!(matches!(err, LayoutError::Cycle { .. }));
    }

    #[test]
    fn two_commit_cycle_is_reported_before_order() {
        let commits = vec![rec("a", &["b"]), rec("b", &["a"])];
        let err = CommitIndex::build(&commits).unwrap_err();
        assert!(matches!(err, LayoutError::Cycle { .. }), "got {err:?}");
    }

    #[test]
    fn cycle_through_merge_parent() {
        let commits = vec![
            rec("a", &["b"]),
            rec("b", &["c", "a"]),
            rec("c", &[]),
        ];
        let err = CommitIndex::build(&commits).unwrap_err();
        assert!(matches!(err, LayoutError::Cycle { .. }), "got {err:?}");
    }

    #[test]
    fn parent_before_child_is_out_of_order() {
        let commits = vec![rec("a", &[]), rec("b", &["a"])];
        let err = CommitIndex::build(&commits).unwrap_err();
        match err {
            LayoutError::OutOfOrder { child, parent } => {
                assert_eq!(child, "\"b\"");
                assert_eq!(parent, "\"a\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unchecked_build_accepts_bad_order() {
        let commits = vec![rec("a", &[]), rec("b", &["a"])];
        let index = CommitIndex::build_unchecked(&commits);
        assert_eq!(index.children(0).primary, vec![1]);
    }
}
