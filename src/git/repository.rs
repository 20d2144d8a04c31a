//! Repository handle and git command plumbing.

use std::path::{Path, PathBuf};

use super::{DEFAULT_BASE_CANDIDATES, GitError};
use crate::shell_exec::Cmd;

mod branches;
mod rebase;
mod status;
mod worktrees;

pub use rebase::{RebaseOutcome, StashOutcome};

/// Repository context for git operations.
///
/// Every command runs with `path` as its working directory. Operating "inside"
/// another worktree means building a second `Repository` with [`Repository::at`];
/// the process working directory is never changed.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
    base_candidates: Vec<String>,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base_candidates: DEFAULT_BASE_CANDIDATES.map(String::from).to_vec(),
        }
    }

    /// Create a repository context for the current directory.
    pub fn current() -> Self {
        Self::at(".")
    }

    /// Replace the base branch names probed by [`Repository::base_branch`].
    pub fn with_base_candidates(mut self, candidates: Vec<String>) -> Self {
        if !candidates.is_empty() {
            self.base_candidates = candidates;
        }
        self
    }

    /// A context for another directory of the same repository, keeping settings.
    pub fn scoped_to(&self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base_candidates: self.base_candidates.clone(),
        }
    }

    /// Get the path this repository context operates on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_candidates(&self) -> &[String] {
        &self.base_candidates
    }

    /// Top-level directory of the worktree containing `path`.
    pub fn worktree_root(&self) -> Result<PathBuf, GitError> {
        let stdout = self.run_command(&["rev-parse", "--show-toplevel"])?;
        Ok(PathBuf::from(stdout.trim()))
    }

    /// Check if a git reference resolves.
    pub fn ref_exists(&self, reference: &str) -> bool {
        self.run_command(&["rev-parse", "--verify", "--quiet", reference])
            .is_ok()
    }

    /// Run a git command in this repository's context, returning stdout.
    pub fn run_command(&self, args: &[&str]) -> Result<String, GitError> {
        run_git(&self.path, args, false)
    }

    /// Run a git command in another directory of this repository.
    pub(crate) fn run_in(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        run_git(dir, args, false)
    }

    /// Run a git command, returning stdout and stderr concatenated.
    pub(crate) fn run_combined(&self, args: &[&str]) -> Result<String, GitError> {
        run_git(&self.path, args, true)
    }
}

fn context_for(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

fn run_git(dir: &Path, args: &[&str], combined: bool) -> Result<String, GitError> {
    let command = args.join(" ");
    let output = Cmd::new("git")
        .args(args.iter().copied())
        .current_dir(dir)
        .context(context_for(dir))
        .run()
        .map_err(|e| GitError::CommandFailed {
            command: command.clone(),
            error: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        // Some git failures (e.g. rebase conflicts) explain themselves on stdout
        let error = [stderr.trim(), stdout.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(GitError::CommandFailed { command, error });
    }

    if combined {
        Ok(format!("{stdout}{stderr}"))
    } else {
        Ok(stdout.into_owned())
    }
}
