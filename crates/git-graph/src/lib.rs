//! Commit graph layout for history views.
//!
//! Turns a sequence of commits (each with an id and ordered parent ids)
//! into per-row drawing instructions: a lane (column) and a color for every
//! commit, plus the vertical, merge and branch segments a renderer needs to
//! connect neighboring rows, in the style of `git log --graph`.
//!
//! The input must already be topologically sorted with children before
//! parents (the order `git rev-list` prints). Use
//! [`InputOrder::OldestFirst`] for the reverse direction. The crate never
//! computes coordinates or touches I/O.
//!
//! ```
//! use git_graph::{layout, CommitRecord, SegmentKind};
//!
//! let commits = vec![
//!     CommitRecord::new("merge", ["main", "topic"]),
//!     CommitRecord::new("main", ["base"]),
//!     CommitRecord::new("topic", ["base"]),
//!     CommitRecord::new("base", []),
//! ];
//! let rows = layout(&commits).unwrap();
//! assert_eq!(rows[0].lane, rows[1].lane);
//! assert!(rows[0].segments.iter().any(|s| s.kind == SegmentKind::Merge));
//! ```

mod color;
mod commit;
mod index;
mod lane;
mod layout;
mod segment;

pub use commit::{CommitId, CommitRecord};
pub use index::{Children, CommitIndex, Parents};
pub use lane::{ColumnSegment, SegmentEnd};
pub use layout::{InputOrder, Layout, LayoutEngine, LayoutOptions, LayoutResult};
pub use segment::{Segment, SegmentKind};

/// Errors produced by graph layout.
///
/// Ids are rendered with their `Debug` form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("commit graph contains a cycle through {id}")]
    Cycle { id: String },

    #[error("parent {parent} does not follow its child {child} in the commit order")]
    OutOfOrder { child: String, parent: String },
}

/// Lay out `commits` with default options, newest first.
///
/// Returns one result per commit, in input order.
pub fn layout<I: CommitId>(commits: &[CommitRecord<I>]) -> Result<Vec<LayoutResult>, LayoutError> {
    LayoutEngine::default().run(commits).map(|layout| layout.rows)
}
