//! Structured search query
//!
//! `SearchQuery::parse` turns a raw, human-typed string into the criteria the
//! matcher compiles. Parsing never fails: malformed pieces are recorded as
//! [`ParseError`]s while the rest of the query keeps its meaning, so a half
//! typed query still filters by everything that is already valid.
//!
//! ## Negation
//!
//! A token starting with `-` is negated when the remainder is a known
//! qualifier (`-author:bob`) or plain text without a colon (`-wip`). A lone
//! `-` and `-unknown:value` are searched as bare text, dash included.
//!
//! Every value is lowercased at parse time.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::search::date_bound::{self, ACCEPTED_DATE_FORMATS};
use crate::artifacts::search::qualifier::Qualifier;
use crate::artifacts::search::tokenizer::tokenize;
use chrono::{DateTime, Utc};
use derive_new::new;
use serde::Serialize;

/// Positive and negated values of one criteria category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermList {
    pub positive: Vec<String>,
    pub negated: Vec<String>,
}

impl TermList {
    fn push(&mut self, value: String, negated: bool) {
        if negated {
            self.negated.push(value);
        } else {
            self.positive.push(value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negated.is_empty()
    }
}

/// Mode of the `merge:` qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeFilter {
    /// Only commits with more than one parent
    Only,
    /// Only commits with at most one parent
    Exclude,
}

impl MergeFilter {
    pub fn try_parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "only" => Some(MergeFilter::Only),
            "exclude" => Some(MergeFilter::Exclude),
            _ => None,
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            MergeFilter::Only => MergeFilter::Exclude,
            MergeFilter::Exclude => MergeFilter::Only,
        }
    }

    pub fn accepts(self, commit: &Commit) -> bool {
        match self {
            MergeFilter::Only => commit.is_merge(),
            MergeFilter::Exclude => !commit.is_merge(),
        }
    }
}

/// Non-fatal diagnostic attached to a parsed query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, new)]
pub struct ParseError {
    /// The offending token, as typed (negation dash included)
    pub token: String,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.token, self.message)
    }
}

/// Parsed search query
///
/// Categories combine with AND; values within a category combine with OR,
/// except bare text terms which must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Original input, unmodified
    pub raw: String,
    /// Bare words, matched against message, author and hash prefix
    pub text: TermList,
    pub authors: TermList,
    pub hashes: TermList,
    pub messages: TermList,
    pub tags: TermList,
    pub files: TermList,
    pub paths: TermList,
    /// Inclusive lower bound on the author timestamp
    pub after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the author timestamp
    pub before: Option<DateTime<Utc>>,
    pub merge: Option<MergeFilter>,
    pub negate_merge: bool,
    pub branch: Option<String>,
    pub negate_branch: bool,
    pub errors: Vec<ParseError>,
}

impl SearchQuery {
    /// Parse `raw`, resolving relative dates against the current time
    pub fn parse(raw: &str) -> Self {
        Self::parse_at(raw, Utc::now())
    }

    /// Parse an optional input; a missing query is an empty query
    pub fn parse_opt(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// Parse `raw`, resolving relative dates against `now`
    pub fn parse_at(raw: &str, now: DateTime<Utc>) -> Self {
        let mut query = SearchQuery {
            raw: raw.to_string(),
            ..Default::default()
        };

        for token in tokenize(raw) {
            query.apply_token(&token, now);
        }

        query
    }

    /// True when no criteria were parsed; errors alone do not count
    pub fn is_empty(&self) -> bool {
        [
            &self.text,
            &self.authors,
            &self.hashes,
            &self.messages,
            &self.tags,
            &self.files,
            &self.paths,
        ]
        .iter()
        .all(|terms| terms.is_empty())
            && self.after.is_none()
            && self.before.is_none()
            && self.merge.is_none()
            && self.branch.is_none()
    }

    /// The merge mode with `negate_merge` folded in
    pub fn effective_merge(&self) -> Option<MergeFilter> {
        self.merge.map(|mode| {
            if self.negate_merge {
                mode.inverted()
            } else {
                mode
            }
        })
    }

    fn apply_token(&mut self, token: &str, now: DateTime<Utc>) {
        if let Some(rest) = token.strip_prefix('-')
            && !rest.is_empty()
        {
            if let Some((qualifier, value)) = Qualifier::split_token(rest) {
                self.apply_qualifier(token, qualifier, value, true, now);
                return;
            }
            if !rest.contains(':') {
                self.text.push(rest.to_lowercase(), true);
                return;
            }
        }

        match Qualifier::split_token(token) {
            Some((qualifier, value)) => self.apply_qualifier(token, qualifier, value, false, now),
            None => self.text.push(token.to_lowercase(), false),
        }
    }

    fn apply_qualifier(
        &mut self,
        token: &str,
        qualifier: Qualifier,
        value: &str,
        negated: bool,
        now: DateTime<Utc>,
    ) {
        let value = value.to_lowercase();
        if value.is_empty() {
            return;
        }

        match qualifier {
            Qualifier::Author => self.authors.push(value, negated),
            Qualifier::Hash => self.hashes.push(value, negated),
            Qualifier::Message => self.messages.push(value, negated),
            Qualifier::Tag => self.tags.push(value, negated),
            Qualifier::File => self.files.push(value, negated),
            Qualifier::Path => self.paths.push(value, negated),
            Qualifier::After | Qualifier::Before => {
                self.apply_date(token, qualifier, &value, negated, now)
            }
            Qualifier::Merge => match MergeFilter::try_parse(&value) {
                Some(mode) => {
                    self.merge = Some(mode);
                    self.negate_merge = negated;
                }
                None => self.errors.push(ParseError::new(
                    token.to_string(),
                    format!("unknown merge value \"{value}\": expected only or exclude"),
                )),
            },
            Qualifier::Branch => {
                self.branch = Some(value);
                self.negate_branch = negated;
            }
        }
    }

    fn apply_date(
        &mut self,
        token: &str,
        qualifier: Qualifier,
        value: &str,
        negated: bool,
        now: DateTime<Utc>,
    ) {
        if negated {
            self.errors.push(ParseError::new(
                token.to_string(),
                format!("negating date qualifiers is not supported, use a different {qualifier}: date instead"),
            ));
            return;
        }

        let instant = match date_bound::resolve(value, now) {
            Ok(Some(instant)) => instant,
            Ok(None) => {
                self.errors.push(ParseError::new(
                    token.to_string(),
                    format!("invalid date \"{value}\": {ACCEPTED_DATE_FORMATS}"),
                ));
                return;
            }
            Err(err) => {
                self.errors
                    .push(ParseError::new(token.to_string(), err.to_string()));
                return;
            }
        };

        if qualifier == Qualifier::After {
            self.after = Some(instant);
        } else {
            self.before = Some(instant);
        }
    }
}
