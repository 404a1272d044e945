//! Lane bookkeeping and lane assignment.
//!
//! Each lane holds a list of column segments in increasing row order. A
//! lineage occupies a lane from the row its segment starts at until the
//! segment closes; after that the lane may host an unrelated lineage.

use serde::Serialize;

/// Where a column segment stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentEnd {
    /// Still extending towards older rows.
    Open,
    /// Last occupied row.
    ClosedAt(usize),
}

/// A row interval during which one lineage occupies a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSegment {
    pub start_row: usize,
    pub end: SegmentEnd,
    pub color: usize,
}

impl ColumnSegment {
    /// True if the segment occupies `row`.
    pub fn covers(&self, row: usize) -> bool {
        self.start_row <= row
            && match self.end {
                SegmentEnd::Open => true,
                SegmentEnd::ClosedAt(end) => end >= row,
            }
    }

    pub fn is_open(&self) -> bool {
        self.end == SegmentEnd::Open
    }

    /// Last occupied row of a closed segment.
    pub fn end_row(&self) -> Option<usize> {
        match self.end {
            SegmentEnd::Open => None,
            SegmentEnd::ClosedAt(end) => Some(end),
        }
    }

    /// True if the segment is closed before `row`, leaving the lane free there.
    fn closed_before(&self, row: usize) -> bool {
        matches!(self.end, SegmentEnd::ClosedAt(end) if end < row)
    }
}

/// How a commit got its lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The commit continues the open segment of a first-parent child.
    Continue {
        lane: usize,
        color: usize,
        /// Segments of losing first-parent children closed for this commit,
        /// as `(color, end_row)`.
        closed: Vec<(usize, usize)>,
    },
    /// The commit starts a new lineage; the caller picks a color and opens
    /// the segment at `start_row`.
    Start { lane: usize, start_row: usize },
}

/// Column segments of every lane.
#[derive(Debug, Clone, Default)]
pub struct LaneTable {
    lanes: Vec<Vec<ColumnSegment>>,
}

impl LaneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lanes allocated so far.
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Column segments of `lane`, oldest row range first.
    pub fn segments(&self, lane: usize) -> &[ColumnSegment] {
        self.lanes.get(lane).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The segment of `lane` covering `row`, if any.
    pub fn segment_at(&self, lane: usize, row: usize) -> Option<&ColumnSegment> {
        let segments = self.segments(lane);
        let after = segments.partition_point(|s| s.start_row <= row);
        segments[..after].last().filter(|s| s.covers(row))
    }

    /// The still-extending segment of `lane`, if any.
    pub fn open_segment(&self, lane: usize) -> Option<&ColumnSegment> {
        self.segments(lane).last().filter(|s| s.is_open())
    }

    /// Decide the lane for the commit at `row`.
    ///
    /// `primary` and `merge` are `(row, lane)` pairs of the commit's
    /// children, all of which have been placed already.
    pub(crate) fn place(
        &mut self,
        row: usize,
        primary: &[(usize, usize)],
        merge: &[(usize, usize)],
    ) -> Placement {
        if let Some(winner) = primary.iter().map(|&(_, lane)| lane).min() {
            let open_color = self.open_segment(winner).map(|s| s.color);
            debug_assert!(
                open_color.is_some(),
                "first-parent child lane {winner} has no open segment"
            );
            if let Some(color) = open_color {
                let mut closed = Vec::new();
                for &(_, lane) in primary {
                    if lane == winner {
                        continue;
                    }
                    // Leave a one-row gap so the converging curve lands on
                    // this commit instead of a still-running line.
                    if let Some(color) = self.close(lane, row - 1) {
                        closed.push((color, row - 1));
                    }
                }
                log::debug!("row {row}: continues lane {winner}");
                return Placement::Continue {
                    lane: winner,
                    color,
                    closed,
                };
            }
        }

        let children = primary.iter().chain(merge);
        match children.clone().map(|&(child_row, _)| child_row).min() {
            Some(first_child) => {
                let start_row = first_child + 1;
                let max_lane = children.map(|&(_, lane)| lane).max().unwrap_or(0);
                let lane = self
                    .find_free(max_lane + 1, start_row)
                    .unwrap_or_else(|| self.push_lane());
                log::debug!("row {row}: merge-only lineage on lane {lane} from row {start_row}");
                Placement::Start { lane, start_row }
            }
            None => {
                let lane = self.find_free(0, row).unwrap_or_else(|| self.push_lane());
                log::debug!("row {row}: new tip on lane {lane}");
                Placement::Start {
                    lane,
                    start_row: row,
                }
            }
        }
    }

    /// Open a new segment on `lane` starting at `start_row`.
    pub(crate) fn open(&mut self, lane: usize, start_row: usize, color: usize) {
        while self.lanes.len() <= lane {
            self.lanes.push(Vec::new());
        }
        let segments = &mut self.lanes[lane];
        debug_assert!(
            segments.last().map_or(true, |s| s.closed_before(start_row)),
            "lane {lane} still occupied at row {start_row}"
        );
        segments.push(ColumnSegment {
            start_row,
            end: SegmentEnd::Open,
            color,
        });
    }

    /// Close the open segment of `lane` at `row`, returning its color.
    pub(crate) fn close(&mut self, lane: usize, row: usize) -> Option<usize> {
        let segment = self.lanes.get_mut(lane)?.last_mut()?;
        if !segment.is_open() {
            return None;
        }
        debug_assert!(segment.start_row <= row);
        segment.end = SegmentEnd::ClosedAt(row);
        Some(segment.color)
    }

    /// First lane at or after `from` whose last segment closed before `row`.
    fn find_free(&self, from: usize, row: usize) -> Option<usize> {
        (from..self.lanes.len()).find(|&lane| {
            self.lanes[lane]
                .last()
                .map_or(true, |s| s.closed_before(row))
        })
    }

    fn push_lane(&mut self) -> usize {
        self.lanes.push(Vec::new());
        self.lanes.len() - 1
    }

    /// Consume the table, returning every lane's segments.
    pub fn into_columns(self) -> Vec<Vec<ColumnSegment>> {
        self.lanes
    }
}
