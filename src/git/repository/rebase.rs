//! Rebase onto the base branch with stash protection.

use super::Repository;
use crate::git::{GitError, REMOTE, STASH_MESSAGE};

/// What happened to uncommitted changes around a rebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashOutcome {
    /// The tree was clean; nothing was stashed.
    NotNeeded,
    /// Changes were stashed and popped back after the rebase.
    Restored,
    /// Changes were stashed but `git stash pop` failed; they remain in the stash.
    Kept,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseOutcome {
    /// The ref rebased onto, e.g. `origin/main`.
    pub base: String,
    pub stash: StashOutcome,
}

impl Repository {
    /// Whether this context's worktree has uncommitted or untracked changes.
    pub fn is_dirty(&self) -> Result<bool, GitError> {
        self.has_uncommitted_changes(self.path())
    }

    /// Commit id of the newest stash entry, if any.
    pub fn stash_head(&self) -> Option<String> {
        self.run_command(&["rev-parse", "--verify", "--quiet", "refs/stash"])
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Stash everything including untracked files. Returns whether a stash
    /// entry was actually created.
    fn stash_changes(&self) -> Result<bool, GitError> {
        let before = self.stash_head();
        self.run_command(&[
            "stash",
            "push",
            "--include-untracked",
            "--message",
            STASH_MESSAGE,
        ])?;
        Ok(self.stash_head() != before)
    }

    /// Whether a rebase stopped partway in this worktree (e.g. on a conflict).
    pub fn rebase_in_progress(&self) -> bool {
        ["rebase-merge", "rebase-apply"].iter().any(|dir| {
            self.run_command(&["rev-parse", "--git-path", dir])
                .map(|out| self.path().join(out.trim()).exists())
                .unwrap_or(false)
        })
    }

    /// Pop the auto-stash. Returns whether the changes are back in the tree.
    fn restore_stash(&self) -> bool {
        match self.run_command(&["stash", "pop"]) {
            Ok(_) => true,
            Err(e) => {
                log::warn!(
                    "Could not restore stashed changes; they remain in the stash: {}",
                    e.into_detail()
                );
                false
            }
        }
    }

    /// Fetch origin and rebase this worktree onto `origin/<base>`.
    ///
    /// Uncommitted changes are stashed first and popped afterwards. If the
    /// fetch or rebase fails without leaving a rebase in progress, the stash
    /// is popped straight away; only a stopped rebase keeps it. The
    /// remote-tracking ref is used because the local base branch may be
    /// checked out in another worktree.
    pub fn rebase_onto_base(&self, base: Option<&str>) -> Result<RebaseOutcome, GitError> {
        let base = self.resolve_base(base)?;
        let target = format!("{REMOTE}/{base}");

        let stashed = if self.is_dirty()? {
            log::info!("Stashing uncommitted changes before rebase");
            self.stash_changes().map_err(|e| GitError::RebaseFailed {
                base: target.clone(),
                error: e.into_detail(),
                stashed: false,
                in_progress: false,
            })?
        } else {
            false
        };

        let result = self
            .run_command(&["fetch", REMOTE])
            .and_then(|_| self.run_command(&["rebase", &target]));

        if let Err(e) = result {
            let in_progress = self.rebase_in_progress();
            let still_stashed = stashed && (in_progress || !self.restore_stash());
            return Err(GitError::RebaseFailed {
                base: target,
                error: e.into_detail(),
                stashed: still_stashed,
                in_progress,
            });
        }

        let stash = if !stashed {
            StashOutcome::NotNeeded
        } else if self.restore_stash() {
            StashOutcome::Restored
        } else {
            StashOutcome::Kept
        };

        Ok(RebaseOutcome {
            base: target,
            stash,
        })
    }
}
