//! The layout engine: one placement pass, one emission pass.

use serde::{Deserialize, Serialize};

use crate::color::ColorTable;
use crate::commit::{CommitId, CommitRecord};
use crate::index::CommitIndex;
use crate::lane::{ColumnSegment, LaneTable, Placement};
use crate::segment::{emit_row, Segment};
use crate::LayoutError;

/// Direction of the input sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputOrder {
    /// Children before parents, as `git log` prints them (default).
    #[default]
    NewestFirst,
    /// Parents before children.
    OldestFirst,
}

/// Options for a layout run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub input_order: InputOrder,
    /// Rows a released color must stay unused before another lineage may
    /// take it.
    pub color_gap: usize,
    /// Palette size. When set, color indices stay below it.
    pub max_colors: Option<usize>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            input_order: InputOrder::NewestFirst,
            color_gap: 1,
            max_colors: None,
        }
    }
}

impl LayoutOptions {
    pub fn with_input_order(mut self, order: InputOrder) -> Self {
        self.input_order = order;
        self
    }

    pub fn with_color_gap(mut self, gap: usize) -> Self {
        self.color_gap = gap;
        self
    }

    pub fn with_max_colors(mut self, max: Option<usize>) -> Self {
        self.max_colors = max;
        self
    }
}

/// Layout of one commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LayoutResult {
    pub lane: usize,
    pub color: usize,
    pub segments: Vec<Segment>,
}

/// Full result of a layout run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// One entry per input commit, in input order.
    pub rows: Vec<LayoutResult>,
    pub lane_count: usize,
    pub color_count: usize,
    /// Column segments of every lane. Rows here count newest first,
    /// whatever the input order was.
    pub columns: Vec<Vec<ColumnSegment>>,
}

/// Lays out commit sequences.
///
/// The engine only holds options; every call to [`LayoutEngine::run`]
/// works on fresh state, so one engine can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out `commits`.
    ///
    /// Fails only on structural errors: a cycle, or a parent that does not
    /// follow its child in processing order.
    pub fn run<I: CommitId>(&self, commits: &[CommitRecord<I>]) -> Result<Layout, LayoutError> {
        match self.options.input_order {
            InputOrder::NewestFirst => self.run_newest_first(commits),
            InputOrder::OldestFirst => {
                let reversed: Vec<CommitRecord<I>> = commits.iter().rev().cloned().collect();
                let mut layout = self.run_newest_first(&reversed)?;
                layout.rows.reverse();
                Ok(layout)
            }
        }
    }

    fn run_newest_first<I: CommitId>(
        &self,
        commits: &[CommitRecord<I>],
    ) -> Result<Layout, LayoutError> {
        let index = CommitIndex::build(commits)?;
        let mut state = LayoutState::new(&self.options, index.len());

        for row in 0..index.len() {
            state.place(row, &index);
        }
        debug_assert!(
            (0..state.lanes.lane_count()).all(|lane| state.lanes.open_segment(lane).is_none()),
            "open column segment left after the last row"
        );

        let rows = (0..index.len())
            .map(|row| LayoutResult {
                lane: state.lane_of[row],
                color: state.color_of[row],
                segments: emit_row(row, &index, &state.lanes, &state.lane_of, &state.color_of),
            })
            .collect();

        log::debug!(
            "laid out {} commits on {} lanes with {} colors",
            index.len(),
            state.lanes.lane_count(),
            state.colors.color_count()
        );

        Ok(Layout {
            rows,
            lane_count: state.lanes.lane_count(),
            color_count: state.colors.color_count(),
            columns: state.lanes.into_columns(),
        })
    }
}

/// Mutable state of one run.
struct LayoutState {
    lanes: LaneTable,
    colors: ColorTable,
    lane_of: Vec<usize>,
    color_of: Vec<usize>,
}

impl LayoutState {
    fn new(options: &LayoutOptions, len: usize) -> Self {
        Self {
            lanes: LaneTable::new(),
            colors: ColorTable::new(options.color_gap, options.max_colors),
            lane_of: Vec::with_capacity(len),
            color_of: Vec::with_capacity(len),
        }
    }

    /// Assign lane and color to the commit at `row`. Every child must
    /// already be placed.
    fn place<I: CommitId>(&mut self, row: usize, index: &CommitIndex<I>) {
        debug_assert_eq!(self.lane_of.len(), row);
        let children = index.children(row);
        let placed = |rows: &[usize]| -> Vec<(usize, usize)> {
            rows.iter()
                .map(|&child| {
                    debug_assert!(child < row, "child at row {child} not placed before row {row}");
                    (child, self.lane_of[child])
                })
                .collect()
        };
        let primary = placed(children.primary.as_slice());
        let merge = placed(children.merge.as_slice());

        let (lane, color) = match self.lanes.place(row, &primary, &merge) {
            Placement::Continue {
                lane,
                color,
                closed,
            } => {
                for (color, end_row) in closed {
                    self.colors.release(color, end_row);
                }
                (lane, color)
            }
            Placement::Start { lane, start_row } => {
                let color = self.colors.acquire(start_row);
                self.lanes.open(lane, start_row, color);
                (lane, color)
            }
        };

        // Roots and commits whose first parent lies outside the input end
        // their lineage here.
        if index.parents(row).first.is_none() {
            if let Some(color) = self.lanes.close(lane, row) {
                self.colors.release(color, row);
            }
        }

        self.lane_of.push(lane);
        self.color_of.push(color);
    }
}
