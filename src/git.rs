//! Git gateway.
//!
//! [`Repository`] is the only place arbor spells out git command lines. The
//! rest of the crate works with [`Worktree`] records and the domain errors in
//! [`GitError`].

use std::path::PathBuf;

mod error;
mod repository;

pub use error::GitError;
pub use repository::{RebaseOutcome, Repository, StashOutcome};

/// The remote that base branches and sync state are compared against.
pub const REMOTE: &str = "origin";

/// Base branch names probed in priority order.
pub const DEFAULT_BASE_CANDIDATES: [&str; 3] = ["develop", "master", "main"];

/// Label shown in place of a branch name for detached worktrees.
pub const DETACHED_LABEL: &str = "(detached)";

/// Message attached to the stash created before an automatic rebase.
pub const STASH_MESSAGE: &str = "arbor: auto-stash before rebase";

/// One worktree as reported by `git worktree list --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worktree {
    pub path: PathBuf,
    /// Full commit id of HEAD (empty for bare or unborn entries).
    pub head: String,
    /// Branch name with `refs/heads/` stripped; `None` when detached.
    pub branch: Option<String>,
    pub detached: bool,
    pub bare: bool,
    /// The first-listed worktree, which holds the repository metadata.
    pub primary: bool,
    /// This worktree contains the gateway's working directory.
    pub current: bool,
    pub locked: Option<String>,
    /// Set when git has flagged the directory as missing.
    pub prunable: Option<String>,
}

impl Worktree {
    /// The 7-character abbreviated commit id.
    pub fn short_head(&self) -> &str {
        self.head.get(..7).unwrap_or(&self.head)
    }

    /// Branch name, or the detached label.
    pub fn branch_label(&self) -> &str {
        self.branch.as_deref().unwrap_or(DETACHED_LABEL)
    }

    /// Final path component of the worktree directory.
    pub fn dir_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// How a branch relates to its `origin/<branch>` counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum RemoteSyncState {
    Synced,
    Ahead,
    Behind,
    Diverged,
    NoRemote,
}

impl RemoteSyncState {
    /// Classify from commit counts: `ahead` are local-only commits, `behind`
    /// are remote-only commits.
    pub fn from_counts(ahead: usize, behind: usize) -> Self {
        match (ahead, behind) {
            (0, 0) => RemoteSyncState::Synced,
            (_, 0) => RemoteSyncState::Ahead,
            (0, _) => RemoteSyncState::Behind,
            _ => RemoteSyncState::Diverged,
        }
    }

    /// Compact symbol used in listings.
    pub fn symbol(self) -> &'static str {
        match self {
            RemoteSyncState::Synced => "✓",
            RemoteSyncState::Ahead => "↑",
            RemoteSyncState::Behind => "↓",
            RemoteSyncState::Diverged => "⇅",
            RemoteSyncState::NoRemote => "",
        }
    }
}

fn new_worktree(path: &str) -> Worktree {
    Worktree {
        path: PathBuf::from(path),
        head: String::new(),
        branch: None,
        detached: false,
        bare: false,
        primary: false,
        current: false,
        locked: None,
        prunable: None,
    }
}

/// Parse `git worktree list --porcelain` output.
///
/// Records start at a `worktree <path>` line and run until a blank line or
/// the next `worktree` line. The first record is the primary worktree.
pub(crate) fn parse_worktree_list(output: &str) -> Result<Vec<Worktree>, GitError> {
    let mut worktrees = Vec::new();
    let mut current: Option<Worktree> = None;

    for line in output.lines() {
        if line.is_empty() {
            if let Some(wt) = current.take() {
                worktrees.push(wt);
            }
            continue;
        }

        let (key, value) = match line.split_once(' ') {
            Some((k, v)) => (k, Some(v)),
            None => (line, None),
        };

        if key == "worktree" {
            let path = value
                .ok_or_else(|| GitError::ParseError("worktree line missing path".to_string()))?;
            if let Some(wt) = current.replace(new_worktree(path)) {
                worktrees.push(wt);
            }
            continue;
        }

        let Some(wt) = current.as_mut() else {
            continue;
        };

        match key {
            "HEAD" => {
                wt.head = value
                    .ok_or_else(|| GitError::ParseError("HEAD line missing SHA".to_string()))?
                    .to_string();
            }
            "branch" => {
                let branch_ref = value
                    .ok_or_else(|| GitError::ParseError("branch line missing ref".to_string()))?;
                let branch = branch_ref.strip_prefix("refs/heads/").unwrap_or(branch_ref);
                wt.branch = Some(branch.to_string());
            }
            "detached" => wt.detached = true,
            "bare" => wt.bare = true,
            "locked" => wt.locked = Some(value.unwrap_or("").to_string()),
            "prunable" => wt.prunable = Some(value.unwrap_or("").to_string()),
            // Ignore unknown attributes for forward compatibility
            _ => {}
        }
    }

    // Push the last worktree if the output doesn't end with a blank line
    if let Some(wt) = current {
        worktrees.push(wt);
    }

    if let Some(first) = worktrees.first_mut() {
        first.primary = true;
    }

    Ok(worktrees)
}
