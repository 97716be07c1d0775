use crate::areas::snapshot::HistorySnapshot;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::search::matcher::{CommitPredicate, SearchMatcher};
use crate::artifacts::search::query::SearchQuery;
use crate::CommitDisplayFormat;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub format: CommitDisplayFormat,
    pub abbrev_commit: bool,
    pub count: bool,
    pub color: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            format: CommitDisplayFormat::Medium,
            abbrev_commit: false,
            count: false,
            color: false,
        }
    }
}

impl HistorySnapshot {
    /// Print the commits matching `query`, in snapshot order
    ///
    /// An empty query filters nothing and shows the whole snapshot.
    ///
    /// # Returns
    ///
    /// The number of matching commits
    pub fn search(
        &self,
        query: &SearchQuery,
        opts: &SearchOptions,
        writer: &mut impl Write,
    ) -> anyhow::Result<usize> {
        let matcher = SearchMatcher::compile(query, self.context());
        let show_all = |_: &Commit| true;
        let predicate: &dyn CommitPredicate = match &matcher {
            Some(matcher) => matcher,
            None => &show_all,
        };

        let mut matches = 0;
        for commit in self.commits().filter(|commit| predicate.is_match(commit)) {
            matches += 1;
            if opts.count {
                continue;
            }

            match opts.format {
                CommitDisplayFormat::Medium => {
                    if matches > 1 {
                        writeln!(writer)?;
                    }
                    show_commit_medium(commit, opts, writer)?;
                }
                CommitDisplayFormat::OneLine => show_commit_oneline(commit, opts, writer)?,
            }
        }

        if opts.count {
            writeln!(writer, "{matches}")?;
        }

        Ok(matches)
    }
}

fn show_commit_medium(
    commit: &Commit,
    opts: &SearchOptions,
    writer: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(writer, "commit {}", commit_id(commit, opts))?;
    writeln!(writer, "Author: {}", commit.author().display_name())?;
    writeln!(writer, "Date:   {}", commit.author().readable_timestamp())?;
    writeln!(writer)?;
    for message_line in commit.message().lines() {
        writeln!(writer, "    {}", message_line)?;
    }

    Ok(())
}

fn show_commit_oneline(
    commit: &Commit,
    opts: &SearchOptions,
    writer: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(
        writer,
        "{} {}",
        commit_id(commit, opts),
        commit.short_message()
    )?;

    Ok(())
}

fn commit_id(commit: &Commit, opts: &SearchOptions) -> String {
    let id = if opts.abbrev_commit {
        commit.short_hash()
    } else {
        commit.hash()
    };

    if opts.color {
        id.yellow().to_string()
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn snapshot() -> HistorySnapshot {
        HistorySnapshot::from_json(
            r#"{
                "commits": [
                    {
                        "hash": "aabbccddeeff00112233",
                        "message": "fix bug\n\nlonger explanation",
                        "author": { "name": "Alice", "email": "alice@example.com", "when": "2024-03-01T10:00:00Z" },
                        "parents": ["1122334455667788"]
                    },
                    {
                        "hash": "1122334455667788",
                        "message": "initial",
                        "author": { "Name": "Bob", "Email": "bob@example.com", "When": "2024-02-01T09:30:00Z" },
                        "parents": []
                    }
                ],
                "branches": { "main": "aabbccddeeff00112233" }
            }"#,
        )
        .unwrap()
    }

    fn run(snapshot: &HistorySnapshot, raw: &str, opts: SearchOptions) -> (usize, String) {
        let mut out = Vec::new();
        let matches = snapshot
            .search(&SearchQuery::parse(raw), &opts, &mut out)
            .unwrap();
        (matches, String::from_utf8(out).unwrap())
    }

    #[rstest]
    fn medium_format(snapshot: HistorySnapshot) {
        let (matches, output) = run(&snapshot, "author:alice", SearchOptions::default());

        assert_eq!(matches, 1);
        assert_eq!(
            output,
            "commit aabbccddeeff00112233\n\
             Author: Alice <alice@example.com>\n\
             Date:   Fri Mar 1 10:00:00 2024 +0000\n\
             \n\
             \x20   fix bug\n\
             \x20   \n\
             \x20   longer explanation\n"
        );
    }

    #[rstest]
    fn oneline_abbrev_format(snapshot: HistorySnapshot) {
        let opts = SearchOptions {
            format: CommitDisplayFormat::OneLine,
            abbrev_commit: true,
            ..Default::default()
        };
        let (matches, output) = run(&snapshot, "", opts);

        assert_eq!(matches, 2);
        assert_eq!(output, "aabbccd fix bug\n1122334 initial\n");
    }

    #[rstest]
    fn count_only(snapshot: HistorySnapshot) {
        let opts = SearchOptions {
            count: true,
            ..Default::default()
        };
        let (matches, output) = run(&snapshot, "branch:main -merge:only", opts);

        assert_eq!(matches, 2);
        assert_eq!(output, "2\n");
    }

    #[rstest]
    fn medium_entries_are_separated_by_blank_line(snapshot: HistorySnapshot) {
        let (_, output) = run(&snapshot, "example.com", SearchOptions::default());

        assert!(output.contains("    longer explanation\n\ncommit 1122334455667788\n"));
    }

    #[rstest]
    fn no_matches_prints_nothing(snapshot: HistorySnapshot) {
        let (matches, output) = run(&snapshot, "hash:ffff", SearchOptions::default());

        assert_eq!(matches, 0);
        assert_eq!(output, "");
    }
}
