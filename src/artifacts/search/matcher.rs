//! Search matcher compilation
//!
//! `SearchMatcher::compile` turns a parsed [`SearchQuery`] plus read-only
//! snapshots of the repository (branch tips, commits, tags, touched files)
//! into a predicate over commits.
//!
//! ## Algorithm
//!
//! Everything that does not depend on the commit being tested is computed
//! once, up front:
//! - the set of criteria categories that are active
//! - the effective merge mode (negation folded in)
//! - the set of commits reachable from the `branch:` tip
//! - the commit sets pointed at by matching `tag:` names
//! - the `path:` tries
//!
//! Testing a commit then walks the active categories in a fixed order and
//! stops at the first one that fails. Categories are ANDed; values inside a
//! category are ORed, except bare text terms which must all match.
//!
//! ## Missing snapshots
//!
//! A qualifier whose snapshot was not supplied never errors: positive
//! criteria match nothing and negated criteria exclude nothing.

use crate::artifacts::branch::reachability::ReachableSet;
use crate::artifacts::core::debug_log;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::search::path_filter::PathFilter;
use crate::artifacts::search::query::{MergeFilter, SearchQuery, TermList};
use bitflags::bitflags;
use chrono::Utc;
use std::collections::{HashMap, HashSet};

bitflags! {
    /// Criteria categories carried by a compiled query
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ActiveCriteria: u16 {
        const TEXT = 1 << 0;
        const AUTHOR = 1 << 1;
        const HASH = 1 << 2;
        const MESSAGE = 1 << 3;
        const TAG = 1 << 4;
        const FILE = 1 << 5;
        const PATH = 1 << 6;
        const AFTER = 1 << 7;
        const BEFORE = 1 << 8;
        const MERGE = 1 << 9;
        const BRANCH = 1 << 10;
        /// Categories that look at lowercased message, author or hash
        const FIELDS = Self::TEXT.bits() | Self::AUTHOR.bits() | Self::HASH.bits() | Self::MESSAGE.bits();
    }
}

impl ActiveCriteria {
    pub fn from_query(query: &SearchQuery) -> Self {
        let mut active = ActiveCriteria::empty();
        for (terms, flag) in [
            (&query.text, ActiveCriteria::TEXT),
            (&query.authors, ActiveCriteria::AUTHOR),
            (&query.hashes, ActiveCriteria::HASH),
            (&query.messages, ActiveCriteria::MESSAGE),
            (&query.tags, ActiveCriteria::TAG),
            (&query.files, ActiveCriteria::FILE),
            (&query.paths, ActiveCriteria::PATH),
        ] {
            active.set(flag, !terms.is_empty());
        }
        active.set(ActiveCriteria::AFTER, query.after.is_some());
        active.set(ActiveCriteria::BEFORE, query.before.is_some());
        active.set(ActiveCriteria::MERGE, query.merge.is_some());
        active.set(ActiveCriteria::BRANCH, query.branch.is_some());

        active
    }
}

/// Read-only repository snapshots a matcher is compiled against
///
/// Any of them may be absent; see the module documentation for how missing
/// snapshots degrade.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchContext<'s> {
    /// Branch or ref name to tip hash
    pub branches: Option<&'s HashMap<String, String>>,
    /// Commit hash to commit
    pub commits: Option<&'s HashMap<String, Commit>>,
    /// Tag name to pointed-at commit hash
    pub tags: Option<&'s HashMap<String, String>>,
    /// Commit hash to the file paths it touched
    pub file_index: Option<&'s HashMap<String, Vec<String>>>,
}

impl<'s> SearchContext<'s> {
    pub fn with_branches(mut self, branches: &'s HashMap<String, String>) -> Self {
        self.branches = Some(branches);
        self
    }

    pub fn with_commits(mut self, commits: &'s HashMap<String, Commit>) -> Self {
        self.commits = Some(commits);
        self
    }

    pub fn with_tags(mut self, tags: &'s HashMap<String, String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_file_index(mut self, file_index: &'s HashMap<String, Vec<String>>) -> Self {
        self.file_index = Some(file_index);
        self
    }
}

/// A predicate over commits
pub trait CommitPredicate {
    fn is_match(&self, commit: &Commit) -> bool;
}

impl<F> CommitPredicate for F
where
    F: Fn(&Commit) -> bool,
{
    fn is_match(&self, commit: &Commit) -> bool {
        self(commit)
    }
}

/// Commit hashes pointed at by tags whose names contain a query value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TagSets {
    positive: HashSet<String>,
    negated: HashSet<String>,
}

impl TagSets {
    fn collect(terms: &TermList, tags: Option<&HashMap<String, String>>) -> Self {
        let mut sets = TagSets::default();

        for (name, hash) in tags.into_iter().flatten() {
            let name = name.to_lowercase();
            let hash = hash.to_ascii_lowercase();
            if terms.positive.iter().any(|value| name.contains(value.as_str())) {
                sets.positive.insert(hash.clone());
            }
            if terms.negated.iter().any(|value| name.contains(value.as_str())) {
                sets.negated.insert(hash);
            }
        }

        sets
    }
}

/// Lowercased commit fields shared by text, author, hash and message criteria
struct Haystack {
    hash: String,
    message: String,
    name: String,
    email: String,
}

impl Haystack {
    fn new(commit: &Commit) -> Self {
        Self {
            hash: commit.hash().to_ascii_lowercase(),
            message: commit.message().to_lowercase(),
            name: commit.author().name().to_lowercase(),
            email: commit.author().email().to_lowercase(),
        }
    }

    fn author_contains(&self, value: &str) -> bool {
        self.name.contains(value) || self.email.contains(value)
    }

    fn text_contains(&self, value: &str) -> bool {
        self.message.contains(value) || self.author_contains(value) || self.hash.starts_with(value)
    }
}

/// Compiled search query
///
/// Holds the precomputed reachability and tag sets and borrows the query and
/// the snapshots it needs per commit. Matching performs no mutation, so one
/// matcher can be shared across threads.
#[derive(Debug, Clone)]
pub struct SearchMatcher<'a> {
    query: &'a SearchQuery,
    active: ActiveCriteria,
    merge: Option<MergeFilter>,
    reachable: ReachableSet,
    tags: TagSets,
    paths: PathFilter,
    negated_paths: PathFilter,
    commits: Option<&'a HashMap<String, Commit>>,
    file_index: Option<&'a HashMap<String, Vec<String>>>,
}

impl<'a> SearchMatcher<'a> {
    /// Compile `query` against `context`
    ///
    /// # Returns
    ///
    /// `None` when the query carries no criteria, meaning no filtering should
    /// be applied at all; otherwise the compiled matcher.
    pub fn compile(query: &'a SearchQuery, context: SearchContext<'a>) -> Option<Self> {
        if query.is_empty() {
            debug_log!("Query {:?} is empty, nothing to compile", query.raw);
            return None;
        }

        let active = ActiveCriteria::from_query(query);
        debug_log!("Compiling query {:?} with criteria {:?}", query.raw, active);

        let reachable = match &query.branch {
            Some(branch) => ReachableSet::for_branch(branch, context.branches, context.commits),
            None => ReachableSet::empty(),
        };

        let tags = if active.contains(ActiveCriteria::TAG) {
            let tags = TagSets::collect(&query.tags, context.tags);
            debug_log!(
                "Tag criteria select {} commits and exclude {} commits",
                tags.positive.len(),
                tags.negated.len()
            );
            tags
        } else {
            TagSets::default()
        };

        Some(Self {
            query,
            active,
            merge: query.effective_merge(),
            reachable,
            tags,
            paths: PathFilter::new(query.paths.positive.iter().map(String::as_str)),
            negated_paths: PathFilter::new(query.paths.negated.iter().map(String::as_str)),
            commits: context.commits,
            file_index: context.file_index,
        })
    }

    pub fn query(&self) -> &SearchQuery {
        self.query
    }

    pub fn active(&self) -> ActiveCriteria {
        self.active
    }

    /// Look a commit up by hash and test it; unknown hashes never match
    pub fn matches_hash(&self, hash: &str) -> bool {
        self.commits
            .and_then(|commits| commits.get(hash))
            .is_some_and(|commit| self.is_match(commit))
    }

    /// Keep the matching commits of `commits`, preserving order
    pub fn filter<'c, I>(&self, commits: I) -> impl Iterator<Item = &'c Commit>
    where
        I: IntoIterator<Item = &'c Commit>,
    {
        commits.into_iter().filter(|commit| self.is_match(commit))
    }

    fn matches_fields(&self, commit: &Commit) -> bool {
        if !self.active.intersects(ActiveCriteria::FIELDS) {
            return true;
        }

        let haystack = Haystack::new(commit);
        let query = self.query;

        if self.active.contains(ActiveCriteria::TEXT)
            && !(query.text.positive.iter().all(|term| haystack.text_contains(term))
                && !query.text.negated.iter().any(|term| haystack.text_contains(term)))
        {
            return false;
        }

        if self.active.contains(ActiveCriteria::AUTHOR)
            && !any_of(&query.authors, |value| haystack.author_contains(value))
        {
            return false;
        }

        if self.active.contains(ActiveCriteria::HASH)
            && !any_of(&query.hashes, |value| haystack.hash.starts_with(value))
        {
            return false;
        }

        if self.active.contains(ActiveCriteria::MESSAGE)
            && !any_of(&query.messages, |value| haystack.message.contains(value))
        {
            return false;
        }

        true
    }

    fn matches_tags(&self, commit: &Commit) -> bool {
        let hash = commit.hash().to_ascii_lowercase();

        (self.query.tags.positive.is_empty() || self.tags.positive.contains(&hash))
            && !self.tags.negated.contains(&hash)
    }

    fn touched_files(&self, commit: &Commit) -> &'a [String] {
        self.file_index
            .and_then(|file_index| file_index.get(commit.hash()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn matches_files(&self, commit: &Commit) -> bool {
        let basenames: Vec<String> = self
            .touched_files(commit)
            .iter()
            .map(|path| path.rsplit('/').next().unwrap_or_default().to_lowercase())
            .collect();

        any_of(&self.query.files, |value| {
            basenames.iter().any(|basename| basename == value)
        })
    }

    fn matches_paths(&self, commit: &Commit) -> bool {
        let files = self.touched_files(commit);

        (self.paths.is_empty() || self.paths.matches_any(files))
            && (self.negated_paths.is_empty() || !self.negated_paths.matches_any(files))
    }

    fn matches_dates(&self, commit: &Commit) -> bool {
        let timestamp = commit.timestamp().map(|ts| ts.with_timezone(&Utc));
        let after = self
            .query
            .after
            .is_none_or(|after| timestamp.is_some_and(|ts| ts >= after));
        let before = self
            .query
            .before
            .is_none_or(|before| timestamp.is_some_and(|ts| ts <= before));

        after && before
    }
}

impl CommitPredicate for SearchMatcher<'_> {
    fn is_match(&self, commit: &Commit) -> bool {
        if !self.matches_fields(commit) {
            return false;
        }

        if self.active.contains(ActiveCriteria::TAG) && !self.matches_tags(commit) {
            return false;
        }

        if self.active.contains(ActiveCriteria::FILE) && !self.matches_files(commit) {
            return false;
        }

        if self.active.contains(ActiveCriteria::PATH) && !self.matches_paths(commit) {
            return false;
        }

        if self
            .active
            .intersects(ActiveCriteria::AFTER | ActiveCriteria::BEFORE)
            && !self.matches_dates(commit)
        {
            return false;
        }

        if let Some(mode) = self.merge
            && !mode.accepts(commit)
        {
            return false;
        }

        if self.active.contains(ActiveCriteria::BRANCH)
            && self.reachable.contains(commit.hash()) == self.query.negate_branch
        {
            return false;
        }

        true
    }
}

/// OR over the positive values (vacuously true when there are none), and no
/// negated value may match
fn any_of(terms: &TermList, matches: impl Fn(&str) -> bool) -> bool {
    (terms.positive.is_empty() || terms.positive.iter().any(|value| matches(value)))
        && !terms.negated.iter().any(|value| matches(value))
}
