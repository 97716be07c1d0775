use crate::artifacts::objects::commit::Commit;
use crate::artifacts::search::matcher::SearchContext;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default, alias = "Commits")]
    commits: Vec<Commit>,
    #[serde(default, alias = "Branches")]
    branches: Option<HashMap<String, String>>,
    #[serde(default, alias = "Tags")]
    tags: Option<HashMap<String, String>>,
    #[serde(default, alias = "Files", alias = "fileIndex")]
    files: Option<HashMap<String, Vec<String>>>,
}

/// Read-only history snapshot loaded from a JSON file
///
/// Keeps the commits in file order (the order results are shown in) next to
/// the hash-keyed maps the matcher is compiled against. Maps missing from the
/// file stay `None` so the matcher can tell "not supplied" from "empty".
#[derive(Debug, Clone, Default)]
pub struct HistorySnapshot {
    order: Vec<String>,
    commits: HashMap<String, Commit>,
    branches: Option<HashMap<String, String>>,
    tags: Option<HashMap<String, String>>,
    files: Option<HashMap<String, Vec<String>>>,
}

impl HistorySnapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read snapshot {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("invalid snapshot {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let file: SnapshotFile =
            serde_json::from_str(content).context("snapshot is not valid JSON")?;

        let mut order = Vec::with_capacity(file.commits.len());
        let mut commits = HashMap::with_capacity(file.commits.len());
        for commit in file.commits {
            if commit.hash().is_empty() {
                anyhow::bail!("snapshot contains a commit without a hash");
            }
            let hash = commit.hash().to_string();
            if commits.insert(hash.clone(), commit).is_none() {
                order.push(hash);
            }
        }

        Ok(Self {
            order,
            commits,
            branches: file.branches,
            tags: file.tags,
            files: file.files,
        })
    }

    /// Snapshot maps as a matcher context
    pub fn context(&self) -> SearchContext<'_> {
        SearchContext {
            branches: self.branches.as_ref(),
            commits: Some(&self.commits),
            tags: self.tags.as_ref(),
            file_index: self.files.as_ref(),
        }
    }

    /// Commits in snapshot order
    pub fn commits(&self) -> impl Iterator<Item = &Commit> {
        self.order.iter().filter_map(|hash| self.commits.get(hash))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
