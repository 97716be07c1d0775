//! Branch reachability for the `branch:` qualifier
//!
//! A commit is "on" a branch when it can be reached from the branch tip by
//! following parent edges. The reachable set is computed once per compiled
//! matcher with an explicit work-list and a visited set, so every commit is
//! expanded at most once no matter how many merges lead back to it and deep
//! histories never grow the call stack.
//!
//! ## Branch resolution
//!
//! The branch name is looked up in the branch map as:
//! 1. the bare name (`main`)
//! 2. `refs/heads/<name>`
//! 3. `refs/remotes/<name>` (e.g. `origin/main`)
//!
//! Each candidate is first matched exactly, then case-insensitively, since
//! query values are lowercased at parse time. An unresolvable branch yields an
//! empty set.

use crate::artifacts::branch::REF_PREFIXES;
use crate::artifacts::core::debug_log;
use crate::artifacts::objects::commit::Commit;
use std::collections::{HashMap, HashSet, VecDeque};

/// Resolve a branch name to its tip hash
///
/// # Returns
///
/// The tip hash of the first candidate ref present in `branches`, or `None`.
/// When several refs differ from a candidate only in case, the
/// lexicographically smallest one wins.
pub fn resolve_branch_tip<'b>(name: &str, branches: &'b HashMap<String, String>) -> Option<&'b str> {
    std::iter::once(name.to_string())
        .chain(REF_PREFIXES.iter().map(|prefix| format!("{prefix}{name}")))
        .find_map(|candidate| {
            branches.get(&candidate).or_else(|| {
                branches
                    .iter()
                    .filter(|(ref_name, _)| ref_name.eq_ignore_ascii_case(&candidate))
                    .min_by(|(left, _), (right, _)| left.cmp(right))
                    .map(|(_, tip)| tip)
            })
        })
        .map(String::as_str)
}

/// Set of commit hashes reachable from a tip (tip included)
///
/// Hashes are stored lowercased so membership tests are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReachableSet {
    hashes: HashSet<String>,
}

impl ReachableSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Walk the history backwards from `tip`
    ///
    /// # Arguments
    ///
    /// * `tip` - Hash to start from; always part of the result
    /// * `parents_of` - Loads the parent hashes of a commit, `None` for
    ///   commits unknown to the caller (treated as roots)
    pub fn walk<'c, ParentsFn>(tip: &str, parents_of: ParentsFn) -> Self
    where
        ParentsFn: Fn(&str) -> Option<&'c [String]>,
    {
        let mut hashes = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(tip.to_string());

        while let Some(current) = queue.pop_front() {
            if !hashes.insert(current.to_ascii_lowercase()) {
                continue;
            }

            for parent in parents_of(&current).unwrap_or_default() {
                if !hashes.contains(&parent.to_ascii_lowercase()) {
                    queue.push_back(parent.clone());
                }
            }
        }

        Self { hashes }
    }

    /// Resolve `branch` against the branch map and walk the commit map from its tip
    ///
    /// Without a branch map, or when the branch does not resolve, the set is
    /// empty. Without a commit map only the tip itself is reachable.
    pub fn for_branch(
        branch: &str,
        branches: Option<&HashMap<String, String>>,
        commits: Option<&HashMap<String, Commit>>,
    ) -> Self {
        let Some(tip) = branches.and_then(|branches| resolve_branch_tip(branch, branches)) else {
            debug_log!("Branch {} did not resolve to a tip", branch);
            return Self::empty();
        };

        debug_log!("Resolved branch {} to tip {}", branch, tip);

        let reachable = Self::walk(tip, |hash| {
            commits
                .and_then(|commits| commits.get(hash))
                .map(Commit::parents)
        });

        debug_log!("Branch {} reaches {} commits", branch, reachable.len());

        reachable
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(&hash.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
