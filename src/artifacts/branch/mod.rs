pub mod reachability;

/// Prefixes tried, in order, after the bare branch name when resolving a
/// `branch:` qualifier against the branch map
pub const REF_PREFIXES: [&str; 2] = ["refs/heads/", "refs/remotes/"];
