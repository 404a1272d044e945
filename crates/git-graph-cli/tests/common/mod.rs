//! Shared helpers for gitgraph integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Captured output from running the binary.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

pub fn gitgraph_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gitgraph"))
}

fn finish(output: std::process::Output) -> CommandResult {
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}

/// Run gitgraph with the given arguments and no stdin.
pub fn gitgraph(args: &[&str]) -> CommandResult {
    let output = Command::new(gitgraph_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run gitgraph");
    finish(output)
}

/// Run gitgraph feeding `input` on stdin.
pub fn gitgraph_stdin(args: &[&str], input: &str) -> CommandResult {
    let mut child = Command::new(gitgraph_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn gitgraph");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    finish(child.wait_with_output().expect("failed to wait for gitgraph"))
}

/// Write `contents` to `name` inside `dir` and return the path as a string.
pub fn write_input(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

/// `git rev-list --parents` style text for a merge of a topic branch.
pub const MERGE_HISTORY: &str = "\
m a b
a base
b base
base
";
