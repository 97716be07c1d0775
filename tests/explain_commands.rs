mod common;

use assert_fs::TempDir;
use common::command::{run_bit_search_command, snapshot_dir};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn explain(dir: &TempDir, query: &[&str]) -> serde_json::Value {
    let mut args = vec!["explain", "--"];
    args.extend_from_slice(query);

    let output = run_bit_search_command(dir.path(), &args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    serde_json::from_slice(&output).expect("explain output is not JSON")
}

#[rstest]
fn explains_qualifiers_and_negations(snapshot_dir: TempDir) {
    let value = explain(&snapshot_dir, &["fix", "author:alice", "-hash:dead", "branch:main"]);

    assert_eq!(value["text"]["positive"], serde_json::json!(["fix"]));
    assert_eq!(value["authors"]["positive"], serde_json::json!(["alice"]));
    assert_eq!(value["hashes"]["negated"], serde_json::json!(["dead"]));
    assert_eq!(value["branch"], "main");
    assert_eq!(value["negate_branch"], false);
    assert_eq!(value["is_empty"], false);
    assert_eq!(
        value["active"],
        serde_json::json!(["text", "author", "hash", "branch"])
    );
}

#[rstest]
fn explains_empty_query(snapshot_dir: TempDir) {
    let value = explain(&snapshot_dir, &[]);

    assert_eq!(value["raw"], "");
    assert_eq!(value["is_empty"], true);
    assert_eq!(value["errors"], serde_json::json!([]));
}

#[rstest]
fn invalid_date_is_reported_on_stderr(snapshot_dir: TempDir) {
    run_bit_search_command(snapshot_dir.path(), &["explain", "--", "before:yesterday"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "hint: before:yesterday: invalid date \"yesterday\"",
        ))
        .stdout(predicate::str::contains("\"before\": null"));
}
