use color_print::cformat;

use arbor::worktree::WorktreeManager;

use super::report_stash;
use crate::output;

pub(crate) fn handle_sync(manager: &WorktreeManager, base: Option<String>) -> anyhow::Result<()> {
    output::progress("Fetching origin and rebasing onto the base branch");
    let outcome = manager.sync(base.as_deref())?;
    output::success(cformat!("Rebased onto <bold>{}</>", outcome.base));
    report_stash(outcome.stash);
    Ok(())
}
