use color_print::cformat;

use arbor::path::format_path_for_display;
use arbor::worktree::WorktreeManager;

use super::pick_worktree;
use crate::output;
use crate::prompt::Prompt;

pub(crate) fn handle_delete(
    manager: &WorktreeManager,
    target: Option<String>,
    force: bool,
    prompt: &dyn Prompt,
) -> anyhow::Result<()> {
    let worktree = match target {
        Some(target) => manager.resolve_target(&target)?,
        None => {
            let candidates: Vec<_> = manager
                .repo()
                .list_worktrees()?
                .into_iter()
                .filter(|wt| !wt.primary)
                .collect();
            if candidates.is_empty() {
                output::info("No worktrees to delete");
                return Ok(());
            }

            let Some(choice) = pick_worktree(prompt, "delete> ", candidates)? else {
                output::info("Nothing selected");
                return Ok(());
            };

            let question = cformat!(
                "Delete worktree <bold>{}</> at <bold>{}</>?",
                choice.branch_label(),
                format_path_for_display(&choice.path)
            );
            if !prompt.confirm(&question)? {
                output::info("Cancelled");
                return Ok(());
            }
            choice
        }
    };

    manager.delete_worktree(&worktree.path, force)?;
    output::success(cformat!(
        "Deleted worktree <bold>{}</> at <bold>{}</>",
        worktree.branch_label(),
        format_path_for_display(&worktree.path)
    ));
    Ok(())
}
