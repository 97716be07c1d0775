//! Commit search query language
//!
//! This module implements the query front end used to filter commit history:
//!
//! - `tokenizer`: Splits raw input into tokens, honoring double quotes
//! - `qualifier`: The fixed `key:value` qualifier whitelist
//! - `date_bound`: Relative (`7d`) and absolute (`2024-01-15`) date resolution
//! - `query`: Parses tokens into a structured `SearchQuery`
//! - `path_filter`: Directory-prefix trie for `path:` criteria
//! - `matcher`: Compiles a `SearchQuery` into a reusable commit predicate
//!
//! ## Syntax
//!
//! ```text
//! fix author:alice -hash:dead after:2w branch:main path:src/ui "two words"
//! ```
//!
//! - Bare words match message, author name/email, or hash prefix
//! - Different qualifier kinds are ANDed; repeated qualifiers of one kind are ORed
//! - A leading `-` negates a bare word or a known qualifier

pub mod date_bound;
pub mod matcher;
pub mod path_filter;
pub mod qualifier;
pub mod query;
pub mod tokenizer;

/// Relative date: a count followed by a unit (`d`ays, `w`eeks, `m`onths, `y`ears)
pub const RELATIVE_DATE_REGEX: &str = r"(?i)^(\d+)([dwmy])$";
/// Absolute date: `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS][Z]`
pub const ABSOLUTE_DATE_REGEX: &str =
    r"(?i)^(\d{4})(?:-(\d{2})(?:-(\d{2})(?:T(\d{2}):(\d{2})(?::(\d{2}))?(Z)?)?)?)?$";
