use std::io::Write;
use std::process;

use clap::Parser;
use color_print::cformat;

use arbor::git::GitError;
use arbor::styling::eprintln;
use arbor::utils::env_flag;

mod cli;
mod commands;
mod output;
mod prompt;

use cli::{Cli, Commands, ShellCommand};
use commands::CommandContext;
use commands::add::{AddArgs, handle_add};
use prompt::TerminalPrompt;

fn init_logging(verbose: u8) {
    // RUST_LOG wins; otherwise -v/-vv pick the level
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let msg = record.args().to_string();

            // Commands start with $, make only the command bold (not $ or [worktree])
            if let Some(rest) = msg.strip_prefix("$ ") {
                if let Some(bracket_pos) = rest.find(" [") {
                    let command = &rest[..bracket_pos];
                    let worktree = &rest[bracket_pos..];
                    writeln!(buf, "{}", cformat!("$ <bold>{command}</><dim>{worktree}</>"))
                } else {
                    writeln!(buf, "{}", cformat!("$ <bold>{rest}</>"))
                }
            } else if msg.starts_with("[arbor-trace]") {
                writeln!(buf, "{}", cformat!("<dim>{msg}</>"))
            } else {
                match record.level() {
                    log::Level::Error => writeln!(buf, "{}", cformat!("<red>error</>: {msg}")),
                    log::Level::Warn => writeln!(buf, "{}", cformat!("<yellow>warning</>: {msg}")),
                    _ => writeln!(buf, "{msg}"),
                }
            }
        })
        .init();
}

/// Dispatch a parsed command; returns the process exit code.
fn run(cli: Cli) -> anyhow::Result<i32> {
    let Cli {
        directory,
        verbose: _,
        command,
    } = cli;

    if let Commands::Shell {
        command: ShellCommand::Init { shell },
    } = command
    {
        commands::shell::handle_shell_init(shell);
        return Ok(0);
    }

    let ctx = CommandContext::load(directory.as_deref())?;
    let prompt = TerminalPrompt;

    match command {
        Commands::Add {
            branch,
            no_rebase,
            no_env,
            base,
            path,
            from,
        } => handle_add(
            ctx.require_repository()?,
            AddArgs {
                branch,
                no_rebase,
                no_env,
                base,
                path,
                from,
            },
        )?,
        Commands::List => commands::list::handle_list(ctx.require_repository()?)?,
        Commands::Delete { target, force } => {
            commands::delete::handle_delete(ctx.require_repository()?, target, force, &prompt)?
        }
        Commands::Switch { target } => {
            commands::switch::handle_switch(ctx.require_repository()?, target, &prompt)?
        }
        Commands::Sync { base } => commands::sync::handle_sync(ctx.require_repository()?, base)?,
        Commands::Prune => commands::prune::handle_prune(ctx.require_repository()?)?,
        Commands::Setup => return commands::setup::handle_setup(&ctx.manager),
        // Handled above, before config is loaded
        Commands::Shell { .. } => {}
    }

    Ok(0)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(0) => Ok(()),
        Ok(code) => process::exit(code),
        Err(e) => match e.downcast_ref::<GitError>() {
            // Domain errors carry their own styling and hints
            Some(err) => {
                eprintln!("{err}");
                if env_flag("DEBUG") {
                    eprintln!();
                    eprintln!("{e:?}");
                }
                process::exit(1);
            }
            None => Err(e),
        },
    }
}
