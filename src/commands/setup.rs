use anyhow::Context;
use color_print::cformat;

use arbor::git::GitError;
use arbor::shell_exec::Cmd;
use arbor::worktree::WorktreeManager;

use crate::output;

/// Installer looked up on PATH when `setup-command` isn't configured.
pub(crate) const SETUP_BINARY: &str = "arbor-setup";

/// Run the installer with the terminal attached; returns its exit code.
pub(crate) fn handle_setup(manager: &WorktreeManager) -> anyhow::Result<i32> {
    let cmd = installer_command(manager)?.current_dir(manager.cwd());

    output::progress(cformat!("Running <bold>{}</>", cmd.display()));
    let status = cmd.status().context("Failed to run installer")?;

    // Killed by a signal: no exit code to forward
    Ok(status.code().unwrap_or(1))
}

fn installer_command(manager: &WorktreeManager) -> Result<Cmd, GitError> {
    if let Some(command) = &manager.config().setup_command {
        return Ok(shell_command(command));
    }

    match which::which(SETUP_BINARY) {
        Ok(path) => Ok(Cmd::new(path.to_string_lossy())),
        Err(e) => {
            log::debug!("{SETUP_BINARY} not found: {e}");
            Err(GitError::ValidationFailed {
                field: "setup-command".to_string(),
                message: format!(
                    "no installer configured and {SETUP_BINARY} is not on PATH; for shell integration run 'arbor shell init <shell>'"
                ),
            })
        }
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Cmd {
    Cmd::new("sh").args(["-c", command])
}

#[cfg(windows)]
fn shell_command(command: &str) -> Cmd {
    Cmd::new("cmd").args(["/C", command])
}
