//! Arbor error types and formatting helpers
//!
//! Uses anyhow for error propagation. GitError is the domain error enum: every
//! failure the user is expected to act on is one of these variants, and
//! `main` prints them as a single styled message with exit code 1.

use std::path::PathBuf;

use crate::path::format_path_for_display;
use crate::styling::{
    ERROR, ERROR_BOLD, ERROR_EMOJI, HINT, HINT_BOLD, HINT_EMOJI, format_with_gutter,
};

/// Domain errors raised by the git gateway and the worktree coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitError {
    /// A git invocation exited non-zero (or could not be spawned).
    CommandFailed { command: String, error: String },
    /// None of the base branch candidates exist locally or on origin.
    NoBaseBranch { candidates: Vec<String> },
    /// A named branch doesn't exist.
    BranchNotFound { branch: String },
    /// The working directory isn't on a named branch.
    DetachedHead,
    /// `git worktree add` failed.
    WorktreeCreationFailed {
        branch: String,
        path: PathBuf,
        error: String,
    },
    /// `git worktree remove` failed.
    WorktreeRemovalFailed { path: PathBuf, error: String },
    /// Fetch or rebase onto the base branch failed.
    RebaseFailed {
        base: String,
        error: String,
        /// Uncommitted changes were stashed before the failure and remain stashed.
        stashed: bool,
        /// `git rebase` stopped partway and is waiting for resolution.
        in_progress: bool,
    },
    /// The target directory for a new worktree is already taken.
    WorktreeAlreadyExists { path: PathBuf },
    /// The primary worktree holds the repository metadata and can't be removed.
    CannotRemovePrimary { path: PathBuf },
    /// No worktree matched a branch name or path.
    WorktreeNotFound { target: String },
    /// A worktree is registered but its directory is gone.
    WorktreeMissing { path: PathBuf },
    /// User input failed validation.
    ValidationFailed { field: String, message: String },
    /// Unexpected output from git.
    ParseError(String),
}

impl GitError {
    /// The underlying git output for wrapping into a more specific error.
    pub(crate) fn into_detail(self) -> String {
        match self {
            GitError::CommandFailed { error, .. } => error,
            other => other.to_string(),
        }
    }

    /// Plain one-line summary without styling or hints, for warnings.
    pub fn summary(&self) -> String {
        match self {
            GitError::CommandFailed { command, .. } => format!("git {command} failed"),
            GitError::RebaseFailed { base, .. } => format!("Rebase onto {base} failed"),
            other => {
                let rendered = anstream::adapter::strip_str(&other.to_string()).to_string();
                rendered
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .trim_start_matches(ERROR_EMOJI)
                    .trim()
                    .to_string()
            }
        }
    }
}

/// Format an error with header and gutter content
fn format_error_block(header: String, error: &str) -> String {
    let trimmed = error.trim();
    if trimmed.is_empty() {
        header
    } else {
        format!("{header}\n{}", format_with_gutter(trimmed, None))
    }
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::CommandFailed { command, error } => {
                let header =
                    format!("{ERROR_EMOJI} {ERROR}git {ERROR_BOLD}{command}{ERROR_BOLD:#}{ERROR} failed{ERROR:#}");
                write!(f, "{}", format_error_block(header, error))
            }
            GitError::NoBaseBranch { candidates } => {
                write!(
                    f,
                    "{ERROR_EMOJI} {ERROR}No base branch found (tried {}){ERROR:#}\n\n{HINT_EMOJI} {HINT}Pass {HINT_BOLD}--base{HINT_BOLD:#}{HINT} or set {HINT_BOLD}base-branch{HINT_BOLD:#}{HINT} in the config{HINT:#}",
                    candidates.join(", ")
                )
            }
            GitError::BranchNotFound { branch } => {
                write!(
                    f,
                    "{ERROR_EMOJI} {ERROR}Branch {ERROR_BOLD}{branch}{ERROR_BOLD:#}{ERROR} not found{ERROR:#}"
                )
            }
            GitError::DetachedHead => {
                write!(
                    f,
                    "{ERROR_EMOJI} {ERROR}Not on a branch (detached HEAD){ERROR:#}\n\n{HINT_EMOJI} {HINT}Check out a branch first, or pass a branch name{HINT:#}"
                )
            }
            GitError::WorktreeCreationFailed {
                branch,
                path,
                error,
            } => {
                let header = format!(
                    "{ERROR_EMOJI} {ERROR}Failed to create worktree for {ERROR_BOLD}{branch}{ERROR_BOLD:#}{ERROR} at {ERROR_BOLD}{}{ERROR_BOLD:#}{ERROR:#}",
                    format_path_for_display(path)
                );
                write!(f, "{}", format_error_block(header, error))
            }
            GitError::WorktreeRemovalFailed { path, error } => {
                let header = format!(
                    "{ERROR_EMOJI} {ERROR}Failed to remove worktree at {ERROR_BOLD}{}{ERROR_BOLD:#}{ERROR:#}",
                    format_path_for_display(path)
                );
                let mut msg = format_error_block(header, error);
                msg.push_str(&format!(
                    "\n\n{HINT_EMOJI} {HINT}Use {HINT_BOLD}--force{HINT_BOLD:#}{HINT} to remove a worktree with uncommitted changes{HINT:#}"
                ));
                write!(f, "{msg}")
            }
            GitError::RebaseFailed {
                base,
                error,
                stashed,
                in_progress,
            } => {
                let header = format!(
                    "{ERROR_EMOJI} {ERROR}Rebase onto {ERROR_BOLD}{base}{ERROR_BOLD:#}{ERROR} failed{ERROR:#}"
                );
                let mut msg = format_error_block(header, error);
                let mut sep = "\n\n";
                if *in_progress {
                    msg.push_str(&format!(
                        "{sep}{HINT_EMOJI} {HINT}Resolve conflicts manually, then run 'git rebase --continue' (or 'git rebase --abort'){HINT:#}"
                    ));
                    sep = "\n";
                }
                if *stashed {
                    msg.push_str(&format!(
                        "{sep}{HINT_EMOJI} {HINT}Uncommitted changes are saved in the stash; restore them with 'git stash pop'{HINT:#}"
                    ));
                }
                write!(f, "{msg}")
            }
            GitError::WorktreeAlreadyExists { path } => {
                write!(
                    f,
                    "{ERROR_EMOJI} {ERROR}Directory already exists: {ERROR_BOLD}{}{ERROR_BOLD:#}{ERROR:#}\n\n{HINT_EMOJI} {HINT}Remove the directory or pass --path{HINT:#}",
                    format_path_for_display(path)
                )
            }
            GitError::CannotRemovePrimary { path } => {
                write!(
                    f,
                    "{ERROR_EMOJI} {ERROR}Cannot remove the primary worktree at {ERROR_BOLD}{}{ERROR_BOLD:#}{ERROR:#}",
                    format_path_for_display(path)
                )
            }
            GitError::WorktreeNotFound { target } => {
                write!(
                    f,
                    "{ERROR_EMOJI} {ERROR}No worktree found for {ERROR_BOLD}{target}{ERROR_BOLD:#}{ERROR:#}\n\n{HINT_EMOJI} {HINT}Run 'arbor list' to see available worktrees{HINT:#}"
                )
            }
            GitError::WorktreeMissing { path } => {
                write!(
                    f,
                    "{ERROR_EMOJI} {ERROR}Worktree directory missing: {ERROR_BOLD}{}{ERROR_BOLD:#}{ERROR:#}\n\n{HINT_EMOJI} {HINT}Run 'arbor prune' to clean up{HINT:#}",
                    format_path_for_display(path)
                )
            }
            GitError::ValidationFailed { field, message } => {
                write!(
                    f,
                    "{ERROR_EMOJI} {ERROR}Invalid {ERROR_BOLD}{field}{ERROR_BOLD:#}{ERROR}: {message}{ERROR:#}"
                )
            }
            GitError::ParseError(msg) => write!(f, "{ERROR_EMOJI} {ERROR}{msg}{ERROR:#}"),
        }
    }
}

impl std::error::Error for GitError {}
