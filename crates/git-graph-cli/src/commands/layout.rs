//! `gitgraph layout` — print the layout of a commit list.

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use git_graph::{ColumnSegment, CommitRecord, Layout, LayoutResult, Segment, SegmentKind};

use super::{run_engine, InputArgs};
use crate::paint::{paint, use_color_stdout, ColorMode};

#[derive(Args)]
pub struct LayoutArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Paint commit ids in their lane color (text format only)
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Tab-separated `row lane color id segments`
    Text,
    /// One JSON document with every row and column segment
    Json,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    id: &'a str,
    #[serde(flatten)]
    result: &'a LayoutResult,
}

#[derive(Serialize)]
struct JsonLayout<'a> {
    lane_count: usize,
    color_count: usize,
    commits: Vec<JsonRow<'a>>,
    columns: &'a [Vec<ColumnSegment>],
}

pub fn run(args: &LayoutArgs) -> Result<i32> {
    let commits = args.input.read()?;
    let layout = match run_engine(&args.input.engine(), &commits) {
        Ok(layout) => layout,
        Err(code) => return Ok(code),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            write_text(&mut out, &commits, &layout, use_color_stdout(args.color))?
        }
        OutputFormat::Json => write_json(&mut out, &commits, &layout)?,
    }
    out.flush()?;
    Ok(0)
}

/// Compact notation for one segment.
///
/// `|L@C` is a vertical in lane L with color C, suffixed `^` where the
/// lineage starts and `$` where it ends. `M` and `B` connectors read
/// `from>to@color`.
fn format_segment(segment: &Segment) -> String {
    match segment.kind {
        SegmentKind::Vertical => {
            let mut text = format!("|{}@{}", segment.from_lane, segment.color);
            if segment.is_lineage_start {
                text.push('^');
            }
            if segment.is_lineage_end {
                text.push('$');
            }
            text
        }
        SegmentKind::Merge => format!(
            "M{}>{}@{}",
            segment.from_lane, segment.to_lane, segment.color
        ),
        SegmentKind::Branch => format!(
            "B{}>{}@{}",
            segment.from_lane, segment.to_lane, segment.color
        ),
    }
}

fn write_text(
    out: &mut impl Write,
    commits: &[CommitRecord<String>],
    layout: &Layout,
    color: bool,
) -> io::Result<()> {
    for (row, (commit, result)) in commits.iter().zip(&layout.rows).enumerate() {
        let segments: Vec<String> = result.segments.iter().map(format_segment).collect();
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            row,
            result.lane,
            result.color,
            paint(&commit.id, result.color, color),
            segments.join(" ")
        )?;
    }
    Ok(())
}

fn write_json(
    out: &mut impl Write,
    commits: &[CommitRecord<String>],
    layout: &Layout,
) -> Result<()> {
    let doc = JsonLayout {
        lane_count: layout.lane_count,
        color_count: layout.color_count,
        commits: commits
            .iter()
            .zip(&layout.rows)
            .map(|(commit, result)| JsonRow {
                id: &commit.id,
                result,
            })
            .collect(),
        columns: &layout.columns,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}
