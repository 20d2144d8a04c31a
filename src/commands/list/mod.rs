//! `arbor list`: every worktree with derived status, newest first.

mod render;

use arbor::worktree::WorktreeManager;

use crate::output;

pub(crate) fn handle_list(manager: &WorktreeManager) -> anyhow::Result<()> {
    let infos = manager.list_worktrees()?;
    for line in render::render_listing(&infos) {
        output::line(line);
    }

    let prunable = infos
        .iter()
        .filter(|info| info.worktree.prunable.is_some())
        .count();
    if prunable > 0 {
        output::hint(format!(
            "{prunable} worktree{} missing on disk; run 'arbor prune' to clean up",
            if prunable == 1 { " is" } else { "s are" }
        ));
    }
    Ok(())
}
