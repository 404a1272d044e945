//! `gitgraph check` — validate a commit list.

use anyhow::Result;
use clap::Args;

use super::{run_engine, InputArgs};

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    input: InputArgs,
}

pub fn run(args: &CheckArgs) -> Result<i32> {
    let commits = args.input.read()?;
    let layout = match run_engine(&args.input.engine(), &commits) {
        Ok(layout) => layout,
        Err(code) => return Ok(code),
    };

    println!(
        "ok: {} commits, {} lanes, {} colors",
        commits.len(),
        layout.lane_count,
        layout.color_count
    );
    Ok(0)
}
