pub mod config;
pub mod git;
pub mod path;
pub mod shell;
pub mod shell_exec;
pub mod styling;
pub mod utils;
pub mod worktree;
