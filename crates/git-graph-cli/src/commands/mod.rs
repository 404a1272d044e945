pub mod check;
pub mod layout;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use git_graph::{CommitRecord, InputOrder, Layout, LayoutEngine, LayoutError, LayoutOptions};

use crate::input::{read_commits, InputFormat};
use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Compute lanes, colors and segments for a commit list
    Layout(layout::LayoutArgs),
    /// Validate a commit list without printing the layout
    Check(check::CheckArgs),
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Layout(args) => layout::run(args),
        Commands::Check(args) => check::run(args),
    }
}

/// Run the engine, turning structural errors into exit code 1.
pub(crate) fn run_engine(
    engine: &LayoutEngine,
    commits: &[CommitRecord<String>],
) -> std::result::Result<Layout, i32> {
    engine.run(commits).map_err(|e: LayoutError| {
        eprintln!("error: {e}");
        1
    })
}

/// Input and layout options shared by every subcommand.
#[derive(Args)]
pub struct InputArgs {
    /// Commit list, one `<id> <parent>...` line per commit, newest first;
    /// stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Encoding of the commit list
    #[arg(long, value_enum, default_value_t = InputFormat::Lines)]
    input_format: InputFormat,

    /// The list is ordered parents before children
    #[arg(long)]
    oldest_first: bool,

    /// Rows a released color stays unused before it can be reused
    #[arg(long, default_value_t = 1)]
    color_gap: usize,

    /// Cap the number of distinct colors
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    max_colors: Option<usize>,
}

impl InputArgs {
    pub(crate) fn read(&self) -> Result<Vec<CommitRecord<String>>> {
        Ok(read_commits(self.file.as_deref(), self.input_format)?)
    }

    pub(crate) fn engine(&self) -> LayoutEngine {
        let order = if self.oldest_first {
            InputOrder::OldestFirst
        } else {
            InputOrder::NewestFirst
        };
        LayoutEngine::new(
            LayoutOptions::default()
                .with_input_order(order)
                .with_color_gap(self.color_gap)
                .with_max_colors(self.max_colors),
        )
    }
}
