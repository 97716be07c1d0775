use crate::common::{redirect_temp_dir, sample_history};
use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use rstest::fixture;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILE: &str = "history.json";

#[fixture]
pub fn snapshot_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn sample_snapshot_dir(snapshot_dir: TempDir) -> TempDir {
    write_snapshot(snapshot_dir.path(), &sample_history());
    snapshot_dir
}

pub fn write_snapshot(dir: &Path, content: &str) -> PathBuf {
    let dir = assert_fs::fixture::ChildPath::new(dir);
    let snapshot = dir.child(SNAPSHOT_FILE);
    snapshot
        .write_str(content)
        .expect("Failed to write snapshot");
    snapshot.path().to_path_buf()
}

pub fn run_bit_search_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bit-search").expect("Failed to find bit-search binary");
    cmd.current_dir(dir)
        .env_remove("BIT_SEARCH_SNAPSHOT")
        .args(args);
    cmd
}

/// Run `search --oneline` against the snapshot in `dir`
pub fn search_oneline(dir: &Path, query: &[&str]) -> Command {
    let mut args = vec!["search", "--snapshot", SNAPSHOT_FILE, "--oneline", "--"];
    args.extend_from_slice(query);
    run_bit_search_command(dir, &args)
}
