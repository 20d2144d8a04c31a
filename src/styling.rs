//! Consolidated styling module for terminal output.
//!
//! This module uses the anstyle ecosystem:
//! - anstream for auto-detecting color support
//! - anstyle for composable styling
//! - Semantic style constants for domain-specific use

use anstyle::{AnsiColor, Color, Style};
use unicode_width::UnicodeWidthStr;

// ============================================================================
// Re-exports from anstream (auto-detecting output)
// ============================================================================

/// Auto-detecting println that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::println;

/// Auto-detecting eprintln that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::eprintln;

/// Auto-detecting eprint that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::eprint;

// ============================================================================
// Semantic Style Constants
// ============================================================================

/// Error style (red) - use as `{ERROR}text{ERROR:#}`
pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Error style with bold - use as `{ERROR_BOLD}text{ERROR_BOLD:#}`
pub const ERROR_BOLD: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Warning style (yellow) - use as `{WARNING}text{WARNING:#}`
pub const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Hint style (dimmed) - use as `{HINT}text{HINT:#}`
pub const HINT: Style = Style::new().dimmed();

/// Hint style with bold
pub const HINT_BOLD: Style = Style::new().dimmed().bold();

/// Success style (green)
pub const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Progress style (cyan)
pub const PROGRESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

/// Current worktree style (magenta + bold)
pub const CURRENT: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Magenta)));

/// Ahead-of-remote style (green)
pub const ADDITION: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Behind-remote style (red)
pub const DELETION: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Gutter style for quoted content (dimmed background bar)
pub const GUTTER: Style = Style::new().bg_color(Some(Color::Ansi(AnsiColor::BrightBlack)));

// ============================================================================
// Message Emojis
// ============================================================================

/// Progress emoji - use with PROGRESS style
pub const PROGRESS_EMOJI: &str = "🔄";

/// Success emoji - use with SUCCESS style
pub const SUCCESS_EMOJI: &str = "✅";

/// Error emoji - use with ERROR style
pub const ERROR_EMOJI: &str = "❌";

/// Warning emoji - use with WARNING style
pub const WARNING_EMOJI: &str = "🟡";

/// Hint emoji - use with HINT style
pub const HINT_EMOJI: &str = "💡";

/// Info emoji - use for neutral status lines
pub const INFO_EMOJI: &str = "⚪";

/// Prompt symbol for interactive questions
pub const PROMPT_SYMBOL: &str = "❓";

// ============================================================================
// Layout helpers
// ============================================================================

/// Visual width of a string, ignoring ANSI escape codes.
pub fn visual_width(s: &str) -> usize {
    anstream::adapter::strip_str(s).to_string().width()
}

/// Pad `s` with trailing spaces to `width` visual columns.
pub fn pad_to(s: &str, width: usize) -> String {
    let current = visual_width(s);
    if current >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - current))
    }
}

/// Truncate plain text to at most `max` visual columns, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width + 1 > max {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}

/// Terminal width for wrapping: `COLUMNS` if set, else the detected size, else 80.
pub fn get_terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse().ok())
        .filter(|&cols: &usize| cols > 0)
        .or_else(|| terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize))
        .unwrap_or(80)
}

/// Split `text` at spaces so each line fits `max_width` visual columns.
///
/// A single word longer than the width gets a line of its own.
fn wrap_text_at_width(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || visual_width(text) <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = visual_width(word);
        if current.is_empty() {
            current = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            current_width = word_width;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Format quoted content (git output, command stderr) with a gutter bar.
///
/// Each line is prefixed with a styled gutter so multi-line output from git
/// stays visually attached to the message above it. Long lines are wrapped
/// at `max_width`, or the terminal width when `None`.
pub fn format_with_gutter(content: &str, max_width: Option<usize>) -> String {
    let term_width = max_width.unwrap_or_else(get_terminal_width);
    // gutter bar + one space
    let available = term_width.saturating_sub(2);

    content
        .trim_end()
        .lines()
        .flat_map(|line| wrap_text_at_width(line, available))
        .map(|line| format!("{GUTTER} {GUTTER:#} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
