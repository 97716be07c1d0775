mod common;

use assert_fs::TempDir;
use common::command::{
    SNAPSHOT_FILE, run_bit_search_command, search_oneline, sample_snapshot_dir, snapshot_dir,
    write_snapshot,
};
use common::{CommitFixture, snapshot_json};
use fake::Fake;
use fake::faker::internet::en::FreeEmail;
use fake::faker::lorem::en::Words;
use fake::faker::name::en::Name;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn empty_query_shows_every_commit(sample_snapshot_dir: TempDir) {
    search_oneline(sample_snapshot_dir.path(), &[])
        .assert()
        .success()
        .stdout(
            "5555eee wip: try new parser\n\
             4444ddd Merge branch 'ui'\n\
             3333ccc Add UI button\n\
             2222bbb fix login bug\n\
             1111aaa Initial commit\n",
        );
}

#[rstest]
#[case::text_and_author(&["fix", "author:bob"], "2222bbb fix login bug\n")]
#[case::negated_hash(&["author:alice", "-hash:1111"], "3333ccc Add UI button\n")]
#[case::merges_only(&["merge:only"], "4444ddd Merge branch 'ui'\n")]
#[case::tag_name_fragment(&["tag:v1.0"], "2222bbb fix login bug\n")]
#[case::path_prefix(&["path:src/ui"], "3333ccc Add UI button\n")]
#[case::file_basename(&["file:LOGIN.rs"], "2222bbb fix login bug\n")]
#[case::quoted_message(&[r#"message:"login bug""#], "2222bbb fix login bug\n")]
#[case::orphan_branch(&["branch:experiment"], "5555eee wip: try new parser\n")]
#[case::date_window(
    &["after:2024-03-08", "before:2024-03-16"],
    "4444ddd Merge branch 'ui'\n3333ccc Add UI button\n"
)]
fn filters_commits(sample_snapshot_dir: TempDir, #[case] query: &[&str], #[case] expected: &str) {
    search_oneline(sample_snapshot_dir.path(), query)
        .assert()
        .success()
        .stdout(expected.to_string());
}

#[rstest]
fn branch_excludes_unreachable_commits(sample_snapshot_dir: TempDir) {
    search_oneline(sample_snapshot_dir.path(), &["branch:main", "-merge:only"])
        .assert()
        .success()
        .stdout(
            "3333ccc Add UI button\n\
             2222bbb fix login bug\n\
             1111aaa Initial commit\n",
        );
}

#[rstest]
fn negated_date_prints_hint_and_is_ignored(sample_snapshot_dir: TempDir) {
    search_oneline(sample_snapshot_dir.path(), &["-after:7d"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "hint: -after:7d: negating date qualifiers is not supported",
        ))
        .stdout(predicate::str::contains("1111aaa Initial commit"))
        .stdout(predicate::str::contains("5555eee wip: try new parser"));
}

#[rstest]
fn invalid_merge_value_prints_hint(sample_snapshot_dir: TempDir) {
    search_oneline(sample_snapshot_dir.path(), &["merge:maybe", "login"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "hint: merge:maybe: unknown merge value \"maybe\"",
        ))
        .stdout("2222bbb fix login bug\n");
}

#[rstest]
fn count_prints_number_of_matches(sample_snapshot_dir: TempDir) {
    run_bit_search_command(
        sample_snapshot_dir.path(),
        &["search", "--snapshot", SNAPSHOT_FILE, "--count", "--", "author:alice"],
    )
    .assert()
    .success()
    .stdout("2\n");
}

#[rstest]
fn medium_format_shows_author_and_date(sample_snapshot_dir: TempDir) {
    run_bit_search_command(
        sample_snapshot_dir.path(),
        &["search", "--snapshot", SNAPSHOT_FILE, "--no-pager", "--", "hash:2222"],
    )
    .assert()
    .success()
    .stdout(
        "commit 2222bbbb\n\
         Author: Bob <bob@corp.io>\n\
         Date:   Tue Mar 5 12:00:00 2024 +0000\n\
         \n\
         \x20   fix login bug\n",
    );
}

#[rstest]
fn snapshot_path_from_environment(sample_snapshot_dir: TempDir) {
    run_bit_search_command(
        sample_snapshot_dir.path(),
        &["search", "--oneline", "--", "merge:only"],
    )
    .env("BIT_SEARCH_SNAPSHOT", SNAPSHOT_FILE)
    .assert()
    .success()
    .stdout("4444ddd Merge branch 'ui'\n");
}

#[rstest]
fn missing_snapshot_fails(snapshot_dir: TempDir) {
    search_oneline(snapshot_dir.path(), &["fix"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to read snapshot"));
}

#[rstest]
fn malformed_snapshot_fails(snapshot_dir: TempDir) {
    write_snapshot(snapshot_dir.path(), "{ \"commits\": [ ");

    search_oneline(snapshot_dir.path(), &["fix"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid snapshot"));
}

#[rstest]
fn counts_commits_of_generated_author(snapshot_dir: TempDir) {
    let authors: Vec<String> = (0..4).map(|_| Name().fake()).collect();
    let commits: Vec<_> = (0..20)
        .map(|i| {
            let words: Vec<String> = Words(2..6).fake();
            CommitFixture::new(
                format!("{i:040x}"),
                words.join(" "),
                authors[i % authors.len()].clone(),
                FreeEmail().fake(),
                format!("2024-01-{:02}T08:00:00Z", i + 1),
                if i == 0 {
                    vec![]
                } else {
                    vec![format!("{:040x}", i - 1)]
                },
            )
        })
        .collect();
    write_snapshot(snapshot_dir.path(), &snapshot_json(&commits, &[], &[]));

    let needle = authors[0].to_lowercase();
    let expected = commits
        .iter()
        .filter(|c| c.author.to_lowercase().contains(&needle) || c.email.to_lowercase().contains(&needle))
        .count();
    let author_query = format!("author:\"{}\"", authors[0]);

    run_bit_search_command(
        snapshot_dir.path(),
        &["search", "--snapshot", SNAPSHOT_FILE, "--count", "--", &author_query],
    )
    .assert()
    .success()
    .stdout(format!("{expected}\n"));
}

#[rstest]
#[case("search")]
#[case("explain")]
fn help_explains_quoting_values_with_spaces(snapshot_dir: TempDir, #[case] subcommand: &str) {
    run_bit_search_command(snapshot_dir.path(), &[subcommand, "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("need inner double quotes"));
}

#[rstest]
fn shell_quoted_words_are_split_without_inner_quotes(sample_snapshot_dir: TempDir) {
    search_oneline(sample_snapshot_dir.path(), &["message:login bug"])
        .assert()
        .success()
        .stdout("2222bbb fix login bug\n");
}
