//! End-to-end tests driving the `gitgraph` binary.

mod common;
use common::*;

// ── layout ──

#[test]
fn layout_text_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_input(dir.path(), "history.txt", MERGE_HISTORY);

    let result = gitgraph(&["layout", &path]);
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(
        result.stdout,
        "0\t0\t0\tm\t|0@0^ M0>1@1\n\
         1\t0\t0\ta\t|0@0 |1@1^\n\
         2\t1\t1\tb\t|0@0 |1@1$\n\
         3\t0\t0\tbase\t|0@0$ B1>0@1\n"
    );
}

#[test]
fn layout_reads_stdin() {
    let result = gitgraph_stdin(&["layout"], "b a\na\n");
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(result.stdout.lines().count(), 2);
}

#[test]
fn layout_dash_means_stdin() {
    let result = gitgraph_stdin(&["layout", "-"], "# comment\n\nb a\na\n");
    assert_eq!(result.exit_code, 0);
    assert!(result.stdout.starts_with("0\t0\t0\tb\t"));
}

#[test]
fn layout_json_output() {
    let result = gitgraph_stdin(&["layout", "--format", "json"], MERGE_HISTORY);
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);

    let doc: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(doc["lane_count"], 2);
    assert_eq!(doc["color_count"], 2);
    assert_eq!(doc["commits"][0]["id"], "m");
    assert_eq!(doc["commits"][0]["lane"], 0);
    assert_eq!(doc["commits"][0]["segments"][1]["kind"], "merge");
    assert_eq!(doc["commits"][2]["lane"], 1);
    assert_eq!(doc["columns"][1][0]["start_row"], 1);
}

#[test]
fn layout_json_input() {
    let input = r#"[{"id": "b", "parents": ["a"]}, {"id": "a", "parents": []}]"#;
    let result = gitgraph_stdin(&["layout", "--input-format", "json"], input);
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);
    assert_eq!(result.stdout, "0\t0\t0\tb\t|0@0^\n1\t0\t0\ta\t|0@0$\n");
}

#[test]
fn layout_oldest_first_keeps_input_order() {
    let result = gitgraph_stdin(&["layout", "--oldest-first"], "base\na base\nb base\nm a b\n");
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);

    let ids: Vec<&str> = result
        .stdout
        .lines()
        .map(|l| l.split('\t').nth(3).unwrap())
        .collect();
    assert_eq!(ids, ["base", "a", "b", "m"]);
    assert!(result.stdout.lines().last().unwrap().contains("M0>1@1"));
}

#[test]
fn layout_color_always_paints_ids() {
    let result = gitgraph_stdin(&["layout", "--color", "always"], "a\n");
    assert_eq!(result.exit_code, 0);
    assert!(result.stdout.contains("\x1b[31ma\x1b[0m"));
}

#[test]
fn layout_max_colors() {
    let input = "t1 base\nt2 base\nt3 base\nbase\n";
    let result = gitgraph_stdin(&["layout", "--format", "json", "--max-colors", "1"], input);
    assert_eq!(result.exit_code, 0, "stderr: {}", result.stderr);

    let doc: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(doc["color_count"], 1);
}

#[test]
fn layout_rejects_zero_max_colors() {
    let result = gitgraph(&["layout", "--max-colors", "0"]);
    assert_eq!(result.exit_code, 128);
    assert!(result.stderr.contains("--max-colors"), "stderr: {}", result.stderr);
}

// ── check ──

#[test]
fn check_reports_summary() {
    let result = gitgraph_stdin(&["check"], MERGE_HISTORY);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "ok: 4 commits, 2 lanes, 2 colors\n");
}

#[test]
fn check_rejects_cycle() {
    let result = gitgraph_stdin(&["check"], "a b\nb a\n");
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("cycle"), "stderr: {}", result.stderr);
}

#[test]
fn check_rejects_wrong_direction() {
    let result = gitgraph_stdin(&["check"], "a\nb a\n");
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("does not follow"), "stderr: {}", result.stderr);

    let result = gitgraph_stdin(&["check", "--oldest-first"], "a\nb a\n");
    assert_eq!(result.exit_code, 0);
}

// ── errors and usage ──

#[test]
fn missing_file_is_fatal() {
    let result = gitgraph(&["layout", "/nonexistent/history.txt"]);
    assert_eq!(result.exit_code, 128);
    assert!(result.stderr.starts_with("fatal: cannot read"), "stderr: {}", result.stderr);
}

#[test]
fn invalid_json_is_fatal() {
    let result = gitgraph_stdin(&["layout", "--input-format", "json"], "{not json");
    assert_eq!(result.exit_code, 128);
    assert!(result.stderr.contains("invalid JSON"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let result = gitgraph(&["draw"]);
    assert_eq!(result.exit_code, 128);
}

#[test]
fn verbose_logs_to_stderr() {
    let result = gitgraph_stdin(&["-v", "layout"], "a\n");
    assert_eq!(result.exit_code, 0);
    assert!(result.stderr.contains("new tip on lane 0"), "stderr: {}", result.stderr);
}
