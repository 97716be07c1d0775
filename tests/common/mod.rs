#![allow(dead_code)]

pub mod command;

use derive_new::new;
use serde_json::json;

const TMPDIR: &str = "../playground";

pub fn redirect_temp_dir() {
    unsafe {
        std::env::set_var("TMPDIR", TMPDIR);
    }

    // Ensure the TMPDIR exists
    if !std::path::Path::new(TMPDIR).exists() {
        std::fs::create_dir_all(TMPDIR).expect("Failed to create TMPDIR");
    }
}

#[derive(Debug, Clone, new)]
pub struct CommitFixture {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub email: String,
    pub when: String,
    pub parents: Vec<String>,
    #[new(default)]
    pub files: Vec<String>,
}

impl CommitFixture {
    pub fn with_files(mut self, files: &[&str]) -> Self {
        self.files = files.iter().map(|f| f.to_string()).collect();
        self
    }
}

/// Build a history snapshot document
pub fn snapshot_json(
    commits: &[CommitFixture],
    branches: &[(&str, &str)],
    tags: &[(&str, &str)],
) -> String {
    let commit_values: Vec<_> = commits
        .iter()
        .map(|c| {
            json!({
                "hash": c.hash,
                "message": c.message,
                "author": { "name": c.author, "email": c.email, "when": c.when },
                "parents": c.parents,
            })
        })
        .collect();
    let files: serde_json::Map<_, _> = commits
        .iter()
        .filter(|c| !c.files.is_empty())
        .map(|c| (c.hash.clone(), json!(c.files)))
        .collect();
    let branches: serde_json::Map<_, _> = branches
        .iter()
        .map(|(name, tip)| (name.to_string(), json!(tip)))
        .collect();
    let tags: serde_json::Map<_, _> = tags
        .iter()
        .map(|(name, hash)| (name.to_string(), json!(hash)))
        .collect();

    json!({
        "commits": commit_values,
        "branches": branches,
        "tags": tags,
        "files": files,
    })
    .to_string()
}

/// A small history with a merge, an orphan branch and tags
///
/// ```text
///   1111 <- 2222 <- 4444 (main, v1.1.0)
///      \           /
///       3333 -----'         5555 (experiment)
/// ```
pub fn sample_history() -> String {
    let commits = vec![
        CommitFixture::new(
            "5555eeee".to_string(),
            "wip: try new parser".to_string(),
            "Bob".to_string(),
            "bob@corp.io".to_string(),
            "2024-03-20T12:00:00Z".to_string(),
            vec![],
        )
        .with_files(&["scratch/parser.rs"]),
        CommitFixture::new(
            "4444dddd".to_string(),
            "Merge branch 'ui'".to_string(),
            "Carol".to_string(),
            "carol@example.com".to_string(),
            "2024-03-15T12:00:00Z".to_string(),
            vec!["2222bbbb".to_string(), "3333cccc".to_string()],
        ),
        CommitFixture::new(
            "3333cccc".to_string(),
            "Add UI button".to_string(),
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "2024-03-10T12:00:00Z".to_string(),
            vec!["1111aaaa".to_string()],
        )
        .with_files(&["src/ui/button.rs"]),
        CommitFixture::new(
            "2222bbbb".to_string(),
            "fix login bug".to_string(),
            "Bob".to_string(),
            "bob@corp.io".to_string(),
            "2024-03-05T12:00:00Z".to_string(),
            vec!["1111aaaa".to_string()],
        )
        .with_files(&["src/auth/login.rs"]),
        CommitFixture::new(
            "1111aaaa".to_string(),
            "Initial commit".to_string(),
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "2024-03-01T12:00:00Z".to_string(),
            vec![],
        )
        .with_files(&["README.md", "src/main.rs"]),
    ];

    snapshot_json(
        &commits,
        &[("main", "4444dddd"), ("refs/heads/experiment", "5555eeee")],
        &[("v1.0.0", "2222bbbb"), ("v1.1.0", "4444dddd")],
    )
}
