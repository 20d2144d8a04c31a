pub(crate) mod add;
pub(crate) mod delete;
pub(crate) mod list;
pub(crate) mod prune;
pub(crate) mod setup;
pub(crate) mod shell;
pub(crate) mod switch;
pub(crate) mod sync;

use std::path::{Path, PathBuf};

use anyhow::Context;

use arbor::config::UserConfig;
use arbor::git::{GitError, StashOutcome, Worktree};
use arbor::path::{canonicalize_best_effort, format_path_for_display};
use arbor::worktree::WorktreeManager;

use crate::output;
use crate::prompt::Prompt;

/// Everything a handler needs: where arbor runs and with which settings.
pub(crate) struct CommandContext {
    pub manager: WorktreeManager,
}

impl CommandContext {
    /// Resolve the working directory (`-C` or the process cwd) and load config.
    pub fn load(directory: Option<&Path>) -> anyhow::Result<Self> {
        let cwd = working_directory(directory)?;
        let config = UserConfig::load().context("Failed to load config")?;
        log::debug!("Running in {}", cwd.display());
        Ok(Self {
            manager: WorktreeManager::new(cwd, config),
        })
    }

    /// Fail early with a domain error when not inside a git repository.
    pub fn require_repository(&self) -> Result<&WorktreeManager, GitError> {
        self.manager
            .repo()
            .run_command(&["rev-parse", "--git-dir"])
            .map_err(|_| GitError::ValidationFailed {
                field: "directory".to_string(),
                message: format!(
                    "{} is not inside a git repository",
                    format_path_for_display(self.manager.cwd())
                ),
            })?;
        Ok(&self.manager)
    }
}

fn working_directory(directory: Option<&Path>) -> anyhow::Result<PathBuf> {
    match directory {
        Some(dir) => dunce::canonicalize(dir).map_err(|e| {
            GitError::ValidationFailed {
                field: "directory".to_string(),
                message: format!("cannot use {}: {e}", format_path_for_display(dir)),
            }
            .into()
        }),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(canonicalize_best_effort(&cwd))
        }
    }
}

/// Let the user pick a worktree when no target was given.
///
/// Without a terminal there's nobody to ask, which is a usage error.
pub(crate) fn pick_worktree(
    prompt: &dyn Prompt,
    label: &str,
    worktrees: Vec<Worktree>,
) -> anyhow::Result<Option<Worktree>> {
    if !prompt.is_interactive() {
        return Err(GitError::ValidationFailed {
            field: "target".to_string(),
            message: "no worktree given and stdin is not a terminal".to_string(),
        }
        .into());
    }

    let items: Vec<String> = worktrees
        .iter()
        .map(|wt| {
            format!(
                "{}\t{}",
                wt.branch_label(),
                format_path_for_display(&wt.path)
            )
        })
        .collect();

    let choice = prompt.select(label, &items)?;
    Ok(choice.and_then(|index| worktrees.into_iter().nth(index)))
}

/// Tell the user where their uncommitted changes ended up after a rebase.
pub(crate) fn report_stash(stash: StashOutcome) {
    match stash {
        StashOutcome::NotNeeded => {}
        StashOutcome::Restored => output::info("Restored uncommitted changes"),
        StashOutcome::Kept => {
            output::warning("Uncommitted changes could not be reapplied and remain in the stash");
            output::hint("Resolve the conflict, then run 'git stash pop'");
        }
    }
}
