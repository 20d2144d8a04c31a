//! Worktree management operations for Repository.

use std::path::Path;

use super::Repository;
use crate::git::{GitError, REMOTE, Worktree, parse_worktree_list};
use crate::path::canonicalize_best_effort;

impl Repository {
    /// List all worktrees, flagging the one this context runs in as current.
    pub fn list_worktrees(&self) -> Result<Vec<Worktree>, GitError> {
        let stdout = self.run_command(&["worktree", "list", "--porcelain"])?;
        let mut worktrees = parse_worktree_list(&stdout)?;

        let here = self
            .worktree_root()
            .unwrap_or_else(|_| self.path().to_path_buf());
        let here = canonicalize_best_effort(&here);

        for wt in &mut worktrees {
            wt.current = canonicalize_best_effort(&wt.path) == here;
        }

        Ok(worktrees)
    }

    /// Add a worktree at `path` for `branch`.
    ///
    /// With `create_branch`, the branch is created from `start_point`
    /// (default: `origin/<base>`). Otherwise the existing branch is checked
    /// out; a branch that only exists on origin gets a local tracking branch.
    pub fn create_worktree(
        &self,
        path: &Path,
        branch: &str,
        create_branch: bool,
        start_point: Option<&str>,
    ) -> Result<(), GitError> {
        let path_str = path.to_string_lossy().into_owned();

        let result = if create_branch {
            let start = match start_point {
                Some(start) => start.to_string(),
                None => self.default_start_point(None)?,
            };
            self.run_command(&["worktree", "add", "-b", branch, "--", &path_str, &start])
        } else if self.local_branch_exists(branch) {
            self.run_command(&["worktree", "add", "--", &path_str, branch])
        } else {
            let remote = format!("{REMOTE}/{branch}");
            self.run_command(&[
                "worktree", "add", "--track", "-b", branch, "--", &path_str, &remote,
            ])
        };

        result
            .map(|_| ())
            .map_err(|e| GitError::WorktreeCreationFailed {
                branch: branch.to_string(),
                path: path.to_path_buf(),
                error: e.into_detail(),
            })
    }

    /// Remove a worktree; `force` discards uncommitted changes.
    pub fn remove_worktree(&self, path: &Path, force: bool) -> Result<(), GitError> {
        let path_str = path.to_string_lossy().into_owned();
        let mut args = vec!["worktree", "remove"];
        if force {
            args.push("--force");
        }
        args.extend(["--", path_str.as_str()]);

        self.run_command(&args)
            .map(|_| ())
            .map_err(|e| GitError::WorktreeRemovalFailed {
                path: path.to_path_buf(),
                error: e.into_detail(),
            })
    }

    /// Drop metadata for worktrees whose directories are gone.
    ///
    /// Returns git's own report of what was pruned (empty when nothing was).
    pub fn prune_worktrees(&self) -> Result<String, GitError> {
        self.run_combined(&["worktree", "prune", "--verbose"])
    }
}
