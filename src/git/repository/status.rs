//! Per-worktree status queries used by the listing.

use std::path::Path;

use super::Repository;
use crate::git::{GitError, REMOTE, RemoteSyncState};

impl Repository {
    /// First line of the commit message of `commit` (default `HEAD`).
    pub fn last_commit_subject(&self, commit: Option<&str>) -> Option<String> {
        let commit = commit.unwrap_or("HEAD");
        self.run_command(&["log", "-1", "--format=%s", commit, "--"])
            .ok()
            .and_then(|out| out.lines().next().map(str::to_string))
            .filter(|s| !s.is_empty())
    }

    /// Committer time of `commit` in Unix seconds, optionally resolved inside `worktree`.
    pub fn commit_timestamp(&self, commit: &str, worktree: Option<&Path>) -> Result<i64, GitError> {
        let args = ["log", "-1", "--format=%ct", commit, "--"];
        let stdout = match worktree {
            Some(dir) => self.run_in(dir, &args)?,
            None => self.run_command(&args)?,
        };
        stdout
            .trim()
            .parse()
            .map_err(|_| GitError::ParseError(format!("Invalid commit timestamp: {}", stdout.trim())))
    }

    /// Whether `worktree` has staged, unstaged or untracked changes.
    pub fn has_uncommitted_changes(&self, worktree: &Path) -> Result<bool, GitError> {
        let stdout = self.run_in(worktree, &["status", "--porcelain"])?;
        Ok(!stdout.trim().is_empty())
    }

    /// Compare `branch` with `origin/<branch>`.
    ///
    /// Detached worktrees (`None`), branches without a remote counterpart and
    /// any query failure all report [`RemoteSyncState::NoRemote`].
    pub fn remote_sync_state(&self, branch: Option<&str>, worktree: &Path) -> RemoteSyncState {
        let Some(branch) = branch else {
            return RemoteSyncState::NoRemote;
        };
        if !self.remote_branch_exists(branch) {
            return RemoteSyncState::NoRemote;
        }

        let range = format!("refs/heads/{branch}...refs/remotes/{REMOTE}/{branch}");
        match self.run_in(worktree, &["rev-list", "--left-right", "--count", &range]) {
            Ok(out) => match parse_left_right_counts(&out) {
                Some((ahead, behind)) => RemoteSyncState::from_counts(ahead, behind),
                None => {
                    log::debug!("Unexpected rev-list output for {branch}: {out:?}");
                    RemoteSyncState::NoRemote
                }
            },
            Err(e) => {
                log::debug!("Sync state for {branch} unavailable: {}", e.summary());
                RemoteSyncState::NoRemote
            }
        }
    }
}

/// Parse `rev-list --left-right --count` output: `<left>\t<right>`.
pub(crate) fn parse_left_right_counts(output: &str) -> Option<(usize, usize)> {
    let mut parts = output.split_whitespace();
    let left = parts.next()?.parse().ok()?;
    let right = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((left, right))
}
