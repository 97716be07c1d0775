use anyhow::Result;
use bit_search::CommitDisplayFormat;
use bit_search::areas::snapshot::HistorySnapshot;
use bit_search::artifacts::core::OutputWriter;
use bit_search::artifacts::search::query::SearchQuery;
use bit_search::commands::porcelain::search::SearchOptions;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bit-search",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Filter commit history with a compact query language",
    long_about = "Search a commit history snapshot with free text, qualifiers such as \
    author:, hash:, after:, before:, merge:, branch:, message:, tag:, file: and path:, \
    and per-term negation with a leading '-'.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "search",
        about = "Show the commits matching a query",
        long_about = "This command prints the commits of a history snapshot that match the query, \
        in snapshot order. An empty query shows every commit."
    )]
    Search {
        #[arg(
            short,
            long,
            env = "BIT_SEARCH_SNAPSHOT",
            help = "The JSON history snapshot to search"
        )]
        snapshot: PathBuf,
        #[arg(long, help = "Show each commit on a single line")]
        oneline: bool,
        #[arg(long, help = "Show abbreviated commit hashes")]
        abbrev_commit: bool,
        #[arg(long, value_enum, default_value_t = CommitDisplayFormat::Medium, help = "Commit display format")]
        format: CommitDisplayFormat,
        #[arg(short, long, help = "Only print the number of matching commits")]
        count: bool,
        #[arg(long, help = "Do not page the output")]
        no_pager: bool,
        #[arg(
            index = 1,
            num_args = 0..,
            help = "The search query; words are joined with spaces, so values containing \
            spaces need inner double quotes, e.g. 'message:\"login bug\"'"
        )]
        query: Vec<String>,
    },
    #[command(
        name = "explain",
        about = "Show how a query is parsed",
        long_about = "This command prints the structured form of a query as JSON, \
        including parse errors and the criteria the matcher would evaluate."
    )]
    Explain {
        #[arg(
            index = 1,
            num_args = 0..,
            help = "The search query; words are joined with spaces, so values containing \
            spaces need inner double quotes, e.g. 'message:\"login bug\"'"
        )]
        query: Vec<String>,
    },
}

fn print_hints(query: &SearchQuery) {
    for error in &query.errors {
        eprintln!("hint: {error}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Search {
            snapshot,
            oneline,
            abbrev_commit,
            format,
            count,
            no_pager,
            query,
        } => {
            let snapshot = HistorySnapshot::load(snapshot)?;
            let query = SearchQuery::parse(&query.join(" "));
            print_hints(&query);

            let opts = SearchOptions {
                format: if *oneline {
                    CommitDisplayFormat::OneLine
                } else {
                    *format
                },
                abbrev_commit: *abbrev_commit || *oneline,
                count: *count,
                color: std::io::stdout().is_terminal(),
            };

            let mut writer = OutputWriter::for_stdout(!*no_pager && !*count);
            snapshot.search(&query, &opts, &mut writer)?;
            writer.finish()?
        }
        Commands::Explain { query } => {
            let query = SearchQuery::parse(&query.join(" "));
            print_hints(&query);

            let mut writer = OutputWriter::for_stdout(false);
            query.explain(&mut writer)?;
            writer.finish()?
        }
    }

    Ok(())
}
