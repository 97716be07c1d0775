use std::collections::HashMap;
use std::hash::Hash;

/// Filter for `path:` criteria
///
/// A file matches when one of the filter paths equals it or is one of its
/// parent directories. Matching is done per path component, so `src/ui`
/// matches `src/ui/button.rs` but not `src/uikit.rs`. Components are compared
/// lowercased; empty and `.` components are ignored. A filter path with no
/// components left (`/`, `.`) matches no file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFilter {
    path_trie: Trie<String>,
    is_empty: bool,
}

impl PathFilter {
    pub fn new<'p>(paths: impl IntoIterator<Item = &'p str>) -> Self {
        let mut trie = Trie::new();
        let mut is_empty = true;
        for path in paths {
            is_empty = false;
            let parts = components(path);
            if !parts.is_empty() {
                trie.insert(&parts);
            }
        }

        Self {
            path_trie: trie,
            is_empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn matches(&self, file_path: &str) -> bool {
        self.path_trie.contains_prefix_of(&components(file_path))
    }

    pub fn matches_any<'f>(&self, file_paths: impl IntoIterator<Item = &'f String>) -> bool {
        file_paths.into_iter().any(|file_path| self.matches(file_path))
    }
}

fn components(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .map(str::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie<T: Hash + Eq + Clone> {
    is_matching: bool,
    children: HashMap<T, Trie<T>>,
}

impl<T: Hash + Eq + Clone> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> Trie<T> {
    pub fn new() -> Self {
        Trie {
            is_matching: false,
            children: HashMap::new(),
        }
    }

    pub fn insert(&mut self, path: &[T]) {
        let mut node = self;
        for part in path {
            node = node.children.entry(part.clone()).or_insert_with(Trie::new);
        }
        node.is_matching = true;
    }

    /// True if some inserted path equals `path` or is a prefix of it
    pub fn contains_prefix_of(&self, path: &[T]) -> bool {
        let mut node = self;
        if node.is_matching {
            return true;
        }
        for part in path {
            match node.children.get(part) {
                Some(child) if child.is_matching => return true,
                Some(child) => node = child,
                None => return false,
            }
        }
        false
    }
}
