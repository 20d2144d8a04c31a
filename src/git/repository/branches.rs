//! Branch-related operations for Repository.

use super::Repository;
use crate::git::{GitError, REMOTE};

impl Repository {
    /// Check if a local git branch exists.
    pub fn local_branch_exists(&self, branch: &str) -> bool {
        self.ref_exists(&format!("refs/heads/{branch}"))
    }

    /// Check if `origin/<branch>` exists.
    pub fn remote_branch_exists(&self, branch: &str) -> bool {
        self.ref_exists(&format!("refs/remotes/{REMOTE}/{branch}"))
    }

    /// Check if a git branch exists (local or remote).
    ///
    /// A missing branch is `Ok(false)`; only a name git can't accept is an error.
    pub fn branch_exists(&self, branch: &str) -> Result<bool, GitError> {
        if branch.trim().is_empty() {
            return Err(GitError::ValidationFailed {
                field: "branch".to_string(),
                message: "branch name cannot be empty".to_string(),
            });
        }

        // Try local branch first
        if self.local_branch_exists(branch) {
            return Ok(true);
        }

        Ok(self.remote_branch_exists(branch))
    }

    /// Branch checked out in this context's worktree.
    ///
    /// A detached HEAD and an unborn branch (no commits yet) are both
    /// [`GitError::DetachedHead`]: neither has a commit to branch from.
    pub fn current_branch(&self) -> Result<String, GitError> {
        let stdout = self.run_command(&["branch", "--show-current"])?;
        let branch = stdout.trim();
        if branch.is_empty() || !self.ref_exists("HEAD") {
            return Err(GitError::DetachedHead);
        }
        Ok(branch.to_string())
    }

    /// First base candidate (develop, master, main by default) that exists.
    pub fn base_branch(&self) -> Result<String, GitError> {
        for candidate in self.base_candidates() {
            if self.branch_exists(candidate)? {
                log::debug!("Detected base branch {candidate}");
                return Ok(candidate.clone());
            }
        }

        Err(GitError::NoBaseBranch {
            candidates: self.base_candidates().to_vec(),
        })
    }

    /// Use `base` when given (it must exist), otherwise probe for one.
    pub fn resolve_base(&self, base: Option<&str>) -> Result<String, GitError> {
        match base {
            Some(base) if self.branch_exists(base)? => Ok(base.to_string()),
            Some(base) => Err(GitError::BranchNotFound {
                branch: base.to_string(),
            }),
            None => self.base_branch(),
        }
    }

    /// Start point for a new branch: `origin/<base>`, or the local base when
    /// the remote-tracking ref is missing.
    pub fn default_start_point(&self, base: Option<&str>) -> Result<String, GitError> {
        let base = self.resolve_base(base)?;
        if self.remote_branch_exists(&base) {
            Ok(format!("{REMOTE}/{base}"))
        } else {
            log::info!("{REMOTE}/{base} not found; branching from local {base}");
            Ok(base)
        }
    }

    /// Reject names git would refuse as a branch.
    pub fn check_branch_name(&self, branch: &str) -> Result<(), GitError> {
        let invalid = |message: String| GitError::ValidationFailed {
            field: "branch".to_string(),
            message,
        };

        if branch.trim().is_empty() {
            return Err(invalid("branch name cannot be empty".to_string()));
        }
        if branch.starts_with('-') {
            return Err(invalid(format!("'{branch}' cannot start with '-'")));
        }
        self.run_command(&["check-ref-format", "--branch", branch])
            .map(|_| ())
            .map_err(|_| invalid(format!("'{branch}' is not a valid branch name")))
    }
}
