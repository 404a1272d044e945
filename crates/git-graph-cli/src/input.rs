//! Reading commit lists from files or stdin.
//!
//! The line format is what `git rev-list --parents` and
//! `git log --format='%H %P'` print: the commit id followed by its parent
//! ids, separated by whitespace. Blank lines and `#` comments are skipped.

use std::io::Read;
use std::path::Path;

use bstr::ByteSlice;
use clap::ValueEnum;
use git_graph::CommitRecord;

/// Errors produced while reading commit input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("line {line}: commit ids must be valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Input encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One commit per line: `<id> <parent>...`
    Lines,
    /// A JSON array of `{"id": ..., "parents": [...]}` objects
    Json,
}

/// Read commits from `source`, or stdin when it is `None` or `-`.
pub fn read_commits(
    source: Option<&Path>,
    format: InputFormat,
) -> Result<Vec<CommitRecord<String>>, InputError> {
    let data = match source {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).map_err(|source| InputError::Read {
                path: path.display().to_string(),
                source,
            })?
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|source| InputError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            buf
        }
    };

    let commits = match format {
        InputFormat::Lines => parse_lines(&data)?,
        InputFormat::Json => serde_json::from_slice(&data)?,
    };
    log::debug!("read {} commits", commits.len());
    Ok(commits)
}

/// Parse the line format.
pub fn parse_lines(data: &[u8]) -> Result<Vec<CommitRecord<String>>, InputError> {
    let mut commits = Vec::new();
    for (i, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(b"#") {
            continue;
        }
        let mut fields = line.fields().map(|field| {
            field
                .to_str()
                .map(str::to_string)
                .map_err(|_| InputError::InvalidUtf8 { line: i + 1 })
        });
        let Some(id) = fields.next().transpose()? else {
            continue;
        };
        let parents = fields.collect::<Result<Vec<_>, _>>()?;
        commits.push(CommitRecord { id, parents });
    }
    Ok(commits)
}
