//! Interactive selection and confirmation.

use std::io::{self, IsTerminal, Write};

use color_print::cformat;

use arbor::styling::{PROMPT_SYMBOL, eprint, eprintln};

pub(crate) trait Prompt {
    /// Whether a user is there to answer.
    fn is_interactive(&self) -> bool;

    /// Pick one of `items`; `None` when the user aborts.
    fn select(&self, prompt: &str, items: &[String]) -> anyhow::Result<Option<usize>>;

    /// Ask a `[y/N]` question.
    fn confirm(&self, question: &str) -> anyhow::Result<bool>;
}

/// Prompts on the controlling terminal: skim for selection, stdin for y/N.
pub(crate) struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn select(&self, prompt: &str, items: &[String]) -> anyhow::Result<Option<usize>> {
        skim_select(prompt, items)
    }

    fn confirm(&self, question: &str) -> anyhow::Result<bool> {
        eprint!("{}", cformat!("{PROMPT_SYMBOL} {question} <bold>[y/N]</> "));
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        eprintln!();

        Ok(is_yes(&input))
    }
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(not(unix))]
fn skim_select(_prompt: &str, _items: &[String]) -> anyhow::Result<Option<usize>> {
    anyhow::bail!("interactive picker is not supported on this platform; pass a branch or path");
}

#[cfg(unix)]
fn skim_select(prompt: &str, items: &[String]) -> anyhow::Result<Option<usize>> {
    use anyhow::Context;
    use skim::prelude::*;
    use std::io::Cursor;

    let options = SkimOptionsBuilder::default()
        .height("50%".into())
        .multi(false)
        .prompt(prompt.into())
        .build()
        .context("failed to build skim options")?;

    let source = SkimItemReader::default().of_bufread(Cursor::new(items.join("\n")));
    let Some(out) = Skim::run_with(&options, Some(source)) else {
        return Ok(None);
    };

    // Esc still reports the item under the cursor as selected
    let line = out.selected_items.first().map(|item| item.output().into_owned());
    Ok(chosen_index(items, out.is_abort, line.as_deref()))
}

/// Index of the picked line, or `None` when the picker was aborted.
#[cfg(any(unix, test))]
fn chosen_index(items: &[String], aborted: bool, line: Option<&str>) -> Option<usize> {
    if aborted {
        return None;
    }
    let line = line?;
    items.iter().position(|item| item.as_str() == line)
}
