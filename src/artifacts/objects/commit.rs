//! Commit snapshot
//!
//! Commits handed to the search matcher are read-only snapshots produced by
//! whatever backend walked the repository. They contain:
//! - The commit hash
//! - Parent commit hash(es) (for history)
//! - Author information
//! - Commit message
//!
//! ## Format
//!
//! As JSON:
//! ```text
//! {
//!   "hash": "<sha>",
//!   "message": "<commit message>",
//!   "author": { "name": "<name>", "email": "<email>", "when": "<rfc3339>" },
//!   "parents": ["<parent-sha>", ...]
//! }
//! ```
//!
//! Some producers emit the author sub-fields in `PascalCase`
//! (`Name`, `Email`, `When`). Both spellings are accepted; the accessors on
//! [`Author`] are the only place the two are reconciled.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Author information
///
/// Contains name, email, and timestamp with timezone information, each in
/// either casing convention.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, rename = "Name", skip_serializing_if = "Option::is_none")]
    pascal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, rename = "Email", skip_serializing_if = "Option::is_none")]
    pascal_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    when: Option<DateTime<FixedOffset>>,
    #[serde(default, rename = "When", skip_serializing_if = "Option::is_none")]
    pascal_when: Option<DateTime<FixedOffset>>,
}

impl Author {
    /// Create a new author with a specific timestamp
    ///
    /// # Arguments
    ///
    /// * `name` - Author's name
    /// * `email` - Author's email address
    /// * `when` - Authoring timestamp with timezone
    pub fn new(name: String, email: String, when: DateTime<FixedOffset>) -> Self {
        Author {
            name: Some(name),
            email: Some(email),
            when: Some(when),
            ..Default::default()
        }
    }

    /// Author's name, `camelCase` field first, then `PascalCase`, else empty
    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.pascal_name.as_deref())
            .unwrap_or_default()
    }

    /// Author's email, `camelCase` field first, then `PascalCase`, else empty
    pub fn email(&self) -> &str {
        self.email
            .as_deref()
            .or(self.pascal_email.as_deref())
            .unwrap_or_default()
    }

    /// Authoring timestamp, `camelCase` field first, then `PascalCase`
    pub fn when(&self) -> Option<DateTime<FixedOffset>> {
        self.when.or(self.pascal_when)
    }

    /// Format author name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name(), self.email())
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000", or an empty string when
    /// the producer did not record a timestamp
    pub fn readable_timestamp(&self) -> String {
        self.when()
            .map(|when| when.format("%a %b %-d %H:%M:%S %Y %z").to_string())
            .unwrap_or_default()
    }
}

/// Commit snapshot
///
/// Represents one commit of the history being searched.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit hash
    #[serde(alias = "Hash")]
    hash: String,
    /// Commit message
    #[serde(default, alias = "Message")]
    message: String,
    /// Author who wrote the changes
    #[serde(default, alias = "Author")]
    author: Author,
    /// Parent commit hashes (empty for initial commit, multiple for merge commits)
    #[serde(default, alias = "Parents")]
    parents: Vec<String>,
}

impl Commit {
    pub fn new(hash: String, message: String, author: Author, parents: Vec<String>) -> Self {
        Commit {
            hash,
            message,
            author,
            parents,
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// First 7 characters of the hash
    pub fn short_hash(&self) -> &str {
        self.hash
            .char_indices()
            .nth(7)
            .map_or(self.hash.as_str(), |(idx, _)| &self.hash[..idx])
    }

    /// Get the full commit message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    ///
    /// Useful for short-form display (e.g., `--oneline`)
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.author.when()
    }
}
