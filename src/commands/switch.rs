use color_print::cformat;

use arbor::worktree::WorktreeManager;

use super::pick_worktree;
use crate::output;
use crate::prompt::Prompt;

/// Print the path of the chosen worktree on stdout.
pub(crate) fn handle_switch(
    manager: &WorktreeManager,
    target: Option<String>,
    prompt: &dyn Prompt,
) -> anyhow::Result<()> {
    let worktree = match target {
        Some(target) => manager.resolve_target(&target)?,
        None => {
            let worktrees = manager.repo().list_worktrees()?;
            match pick_worktree(prompt, "switch> ", worktrees)? {
                Some(wt) => wt,
                None => {
                    output::info("Nothing selected");
                    return Ok(());
                }
            }
        }
    };

    let path = manager.switch_path(&worktree)?;
    if worktree.current {
        output::info(cformat!("Already in <bold>{}</>", worktree.branch_label()));
    } else {
        output::info(cformat!("Switching to <bold>{}</>", worktree.branch_label()));
    }
    output::print_path(&path);
    Ok(())
}
