//! User-facing status lines.
//!
//! Everything goes to stderr except [`print_path`]: the shell integration
//! captures stdout and `cd`s into it.

use std::fmt::Display;
use std::path::Path;

use arbor::styling::{
    HINT, HINT_EMOJI, INFO_EMOJI, PROGRESS, PROGRESS_EMOJI, SUCCESS, SUCCESS_EMOJI, WARNING,
    WARNING_EMOJI, eprintln, format_with_gutter, println,
};

pub(crate) fn success(msg: impl Display) {
    eprintln!("{SUCCESS_EMOJI} {SUCCESS}{msg}{SUCCESS:#}");
}

pub(crate) fn progress(msg: impl Display) {
    eprintln!("{PROGRESS_EMOJI} {PROGRESS}{msg}{PROGRESS:#}");
}

pub(crate) fn info(msg: impl Display) {
    eprintln!("{INFO_EMOJI} {msg}");
}

pub(crate) fn warning(msg: impl Display) {
    eprintln!("{WARNING_EMOJI} {WARNING}{msg}{WARNING:#}");
}

pub(crate) fn hint(msg: impl Display) {
    eprintln!("{HINT_EMOJI} {HINT}{msg}{HINT:#}");
}

/// Quoted output from git, shown under the preceding message.
pub(crate) fn gutter(content: &str) {
    if !content.trim().is_empty() {
        eprintln!("{}", format_with_gutter(content, None));
    }
}

/// A plain line on stderr (listing rows).
pub(crate) fn line(content: impl Display) {
    eprintln!("{content}");
}

/// The one stdout line of `add` and `switch`.
pub(crate) fn print_path(path: &Path) {
    println!("{}", path.display());
}
