use path_slash::PathExt as _;
use shell_escape::unix::escape;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use normalize_path::NormalizePath;

/// Get the user's home directory.
///
/// Uses the `home` crate which handles platform-specific detection:
/// - Unix: `$HOME` environment variable
/// - Windows: `USERPROFILE` or `HOMEDRIVE`/`HOMEPATH`
pub use home::home_dir;

/// Check if a string needs shell escaping (contains characters outside the safe set).
fn needs_shell_escaping(s: &str) -> bool {
    !matches!(escape(Cow::Borrowed(s)), Cow::Borrowed(_))
}

/// Format a filesystem path for user-facing output.
///
/// Replaces home directory prefix with `~` when safe for shell use. Falls back to
/// quoted absolute path when escaping is needed (to avoid tilde-in-quotes issues).
///
/// # Examples
/// - `/Users/alex/repo` → `~/repo` (no escaping needed)
/// - `/Users/alex/my repo` → `'/Users/alex/my repo'` (needs quoting, use original)
/// - `/tmp/repo` → `/tmp/repo` (no escaping needed)
pub fn format_path_for_display(path: &Path) -> String {
    if let Some(home) = home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }

        let rest = stripped.to_slash_lossy();
        if !needs_shell_escaping(&rest) {
            return format!("~/{rest}");
        }
    }

    let display = path.to_slash_lossy();
    if needs_shell_escaping(&display) {
        escape(Cow::Owned(display.into_owned())).into_owned()
    } else {
        display.into_owned()
    }
}

/// Resolve `path` against `base` and collapse `.`/`..` components lexically.
///
/// Works for paths that don't exist yet (new worktree targets), unlike
/// `canonicalize`.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.normalize()
    } else {
        base.join(path).normalize()
    }
}

/// Canonicalize a path, falling back to the input when it doesn't exist.
pub fn canonicalize_best_effort(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Whether two paths refer to the same location, resolving symlinks when possible.
pub fn same_path(a: &Path, b: &Path) -> bool {
    a == b || canonicalize_best_effort(a) == canonicalize_best_effort(b)
}
