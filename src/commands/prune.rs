use arbor::worktree::WorktreeManager;

use crate::output;

pub(crate) fn handle_prune(manager: &WorktreeManager) -> anyhow::Result<()> {
    let report = manager.prune()?;
    if report.trim().is_empty() {
        output::info("No stale worktrees to prune");
    } else {
        output::success("Pruned stale worktrees");
        output::gutter(&report);
    }
    Ok(())
}
