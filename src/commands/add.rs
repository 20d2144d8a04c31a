use std::path::PathBuf;

use color_print::cformat;

use arbor::git::GitError;
use arbor::path::format_path_for_display;
use arbor::worktree::{CreateOptions, EnvCopyReport, RebaseStatus, WorktreeManager};

use super::report_stash;
use crate::output;

#[derive(Debug, Default)]
pub(crate) struct AddArgs {
    pub branch: Option<String>,
    pub no_rebase: bool,
    pub no_env: bool,
    pub base: Option<String>,
    pub path: Option<PathBuf>,
    pub from: Option<String>,
}

pub(crate) fn handle_add(manager: &WorktreeManager, args: AddArgs) -> anyhow::Result<()> {
    let config = manager.config();
    let opts = CreateOptions {
        branch: args.branch,
        rebase: config.rebase && !args.no_rebase,
        copy_env: config.copy_env && !args.no_env,
        base: args.base,
        from: args.from,
        path: args.path,
    };

    let outcome = manager.create_worktree(opts)?;
    let display_path = format_path_for_display(&outcome.path);
    let branch = &outcome.branch;

    if outcome.created_branch {
        output::success(cformat!(
            "Created branch <bold>{branch}</> and worktree at <bold>{display_path}</>"
        ));
    } else {
        output::success(cformat!(
            "Created worktree for <bold>{branch}</> at <bold>{display_path}</>"
        ));
    }

    if let Some(report) = &outcome.env_files {
        report_env_files(report);
    }

    match outcome.rebase {
        RebaseStatus::Skipped => {}
        RebaseStatus::Rebased(rebase) => {
            output::success(cformat!("Rebased onto <bold>{}</>", rebase.base));
            report_stash(rebase.stash);
        }
        RebaseStatus::Failed(err) => report_rebase_failure(&err),
    }

    output::print_path(&outcome.path);
    Ok(())
}

fn report_env_files(report: &EnvCopyReport) {
    if report.is_empty() {
        output::info("No environment files to copy");
        return;
    }
    if !report.copied.is_empty() {
        output::info(format!("Copied {}", report.copied.join(", ")));
    }
    for (file, reason) in &report.failed {
        output::warning(format!("Could not copy {file}: {reason}"));
    }
}

/// The worktree exists; a failed rebase is only a warning.
fn report_rebase_failure(err: &GitError) {
    output::warning(err.summary());
    match err {
        GitError::RebaseFailed {
            error,
            stashed,
            in_progress,
            ..
        } => {
            output::gutter(error);
            if *in_progress {
                output::hint(
                    "The worktree was created mid-rebase; resolve conflicts there, then run 'git rebase --continue'",
                );
            } else {
                output::hint("The worktree was created; run 'arbor sync' inside it to retry");
            }
            if *stashed {
                output::hint("Uncommitted changes remain in the stash; run 'git stash pop'");
            }
        }
        other => log::debug!("{other:?}"),
    }
}
