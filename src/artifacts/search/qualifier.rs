use serde::Serialize;
use std::fmt;

/// Qualifiers recognized in `key:value` tokens
///
/// Anything outside this set is not an error: the whole token is searched as
/// bare text instead, so colons in ordinary search text stay harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Qualifier {
    Author,
    Hash,
    After,
    Before,
    Merge,
    Branch,
    Message,
    Tag,
    File,
    Path,
}

pub const QUALIFIERS: phf::Map<&'static str, Qualifier> = phf::phf_map! {
    "author" => Qualifier::Author,
    "hash" => Qualifier::Hash,
    "after" => Qualifier::After,
    "before" => Qualifier::Before,
    "merge" => Qualifier::Merge,
    "branch" => Qualifier::Branch,
    "message" => Qualifier::Message,
    "tag" => Qualifier::Tag,
    "file" => Qualifier::File,
    "path" => Qualifier::Path,
};

impl Qualifier {
    /// Look up a qualifier name, case-insensitively
    pub fn lookup(name: &str) -> Option<Qualifier> {
        QUALIFIERS.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Split a token into a known qualifier and its (unmodified) value
    ///
    /// The qualifier name is the part before the first colon. Returns `None`
    /// for tokens without a colon or with an unknown name.
    pub fn split_token(token: &str) -> Option<(Qualifier, &str)> {
        let (name, value) = token.split_once(':')?;
        Self::lookup(name).map(|qualifier| (qualifier, value))
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Qualifier::After | Qualifier::Before)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Qualifier::Author => "author",
            Qualifier::Hash => "hash",
            Qualifier::After => "after",
            Qualifier::Before => "before",
            Qualifier::Merge => "merge",
            Qualifier::Branch => "branch",
            Qualifier::Message => "message",
            Qualifier::Tag => "tag",
            Qualifier::File => "file",
            Qualifier::Path => "path",
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
