//! Per-row connection segments.
//!
//! Emission runs once every commit has a lane and a color, since a row's
//! vertical lines depend on whether a column segment starts, ends or
//! passes through that row.

use serde::Serialize;

use crate::commit::CommitId;
use crate::index::CommitIndex;
use crate::lane::LaneTable;

/// Kind of connection drawn in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// A straight line through the row in one lane.
    Vertical,
    /// From a merge commit's lane to one of its merge parents' lanes.
    Merge,
    /// From a forked child's lane back to the commit it forked from.
    Branch,
}

/// One connection a renderer draws for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub from_lane: usize,
    pub to_lane: usize,
    pub color: usize,
    /// The lineage's line begins in this row.
    pub is_lineage_start: bool,
    /// The lineage's line ends in this row.
    pub is_lineage_end: bool,
}

impl Segment {
    fn vertical(lane: usize, color: usize, start: bool, end: bool) -> Self {
        Self {
            kind: SegmentKind::Vertical,
            from_lane: lane,
            to_lane: lane,
            color,
            is_lineage_start: start,
            is_lineage_end: end,
        }
    }

    fn connector(kind: SegmentKind, from_lane: usize, to_lane: usize, color: usize) -> Self {
        Self {
            kind,
            from_lane,
            to_lane,
            color,
            is_lineage_start: false,
            is_lineage_end: false,
        }
    }
}

/// Build the segments of `row`.
///
/// Verticals come first in lane order, then merge connectors in parent
/// order, then branch connectors in child order.
pub(crate) fn emit_row<I: CommitId>(
    row: usize,
    index: &CommitIndex<I>,
    lanes: &LaneTable,
    lane_of: &[usize],
    color_of: &[usize],
) -> Vec<Segment> {
    let mut segments = Vec::new();

    for lane in 0..lanes.lane_count() {
        if let Some(column) = lanes.segment_at(lane, row) {
            segments.push(Segment::vertical(
                lane,
                column.color,
                column.start_row == row,
                column.end_row() == Some(row),
            ));
        }
    }

    let lane = lane_of[row];

    for &parent in &index.parents(row).merges {
        if lane_of[parent] != lane {
            segments.push(Segment::connector(
                SegmentKind::Merge,
                lane,
                lane_of[parent],
                color_of[parent],
            ));
        }
    }

    // Merge children connect through the `Merge` on their own row.
    for &child in &index.children(row).primary {
        if lane_of[child] != lane {
            segments.push(Segment::connector(
                SegmentKind::Branch,
                lane_of[child],
                lane,
                color_of[child],
            ));
        }
    }

    segments
}
