use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use arbor::shell::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    version,
    about = "Create, list, switch and remove git worktrees",
    long_about = None,
    arg_required_else_help = true
)]
pub(crate) struct Cli {
    /// Run as if arbor was started in PATH (like `git -C`).
    #[arg(short = 'C', long = "directory", global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Show more detail (-v info, -vv every git command).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Create a worktree for a branch and print its path.
    ///
    /// The branch is created from origin/<base> when it doesn't exist yet.
    /// Environment files are copied in and the worktree is rebased onto the
    /// base branch unless disabled.
    Add {
        /// Branch name (defaults to the current branch).
        branch: Option<String>,
        /// Skip the rebase onto the base branch.
        #[arg(long)]
        no_rebase: bool,
        /// Skip copying .env files.
        #[arg(long)]
        no_env: bool,
        /// Base branch (defaults to the first of develop, master, main that exists).
        #[arg(long, value_name = "BRANCH")]
        base: Option<String>,
        /// Worktree location (defaults to a sibling directory).
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
        /// Start point for a new branch instead of origin/<base>.
        #[arg(long, value_name = "REF")]
        from: Option<String>,
    },
    /// List worktrees with their status, most recent first.
    #[command(visible_alias = "ls")]
    List,
    /// Remove a worktree.
    #[command(visible_alias = "rm")]
    Delete {
        /// Branch name, path or directory name (prompts when omitted).
        target: Option<String>,
        /// Remove even with uncommitted changes.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the path of a worktree (the shell integration cds into it).
    #[command(visible_alias = "sw")]
    Switch {
        /// Branch name, path or directory name (prompts when omitted).
        target: Option<String>,
    },
    /// Rebase the current worktree onto its base branch.
    Sync {
        /// Base branch to rebase onto.
        #[arg(long, value_name = "BRANCH")]
        base: Option<String>,
    },
    /// Clean up metadata for worktrees whose directories were deleted.
    Prune,
    /// Run the configured installer.
    Setup,
    /// Shell integration.
    Shell {
        #[command(subcommand)]
        command: ShellCommand,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum ShellCommand {
    /// Print the shell function that lets add/switch change directory.
    Init { shell: Shell },
}
