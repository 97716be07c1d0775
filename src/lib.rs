//! Commit history search
//!
//! A compact query language for filtering commit history: free text, typed
//! qualifiers (`author:`, `hash:`, `after:`, `before:`, `merge:`, `branch:`,
//! `message:`, `tag:`, `file:`, `path:`) and per-term negation.
//!
//! ```rust,ignore
//! let query = SearchQuery::parse("fix author:alice -hash:dead");
//! if let Some(matcher) = SearchMatcher::compile(&query, snapshot.context()) {
//!     let hits = matcher.filter(snapshot.commits()).count();
//! }
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use artifacts::search::matcher::{CommitPredicate, SearchContext, SearchMatcher};
pub use artifacts::search::query::{ParseError, SearchQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CommitDisplayFormat {
    #[default]
    Medium,
    #[value(name = "oneline")]
    OneLine,
}
