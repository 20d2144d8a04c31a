//! Copy untracked environment files into a new worktree.

use std::fs;
use std::path::Path;

/// Result of copying environment files. Never an error: each file is best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvCopyReport {
    pub copied: Vec<String>,
    /// `(file, reason)` for files that exist in the source but couldn't be copied.
    pub failed: Vec<(String, String)>,
}

impl EnvCopyReport {
    pub fn is_empty(&self) -> bool {
        self.copied.is_empty() && self.failed.is_empty()
    }
}

/// Copy each of `names` that exists under `source_dir` into `dest_dir`.
///
/// Missing source files are skipped silently. Files already present in the
/// destination (e.g. tracked by git) are left alone.
pub fn copy_env_files(source_dir: &Path, dest_dir: &Path, names: &[String]) -> EnvCopyReport {
    let mut report = EnvCopyReport::default();

    for name in names {
        let src = source_dir.join(name);
        if !src.is_file() {
            continue;
        }

        let dest = dest_dir.join(name);
        if dest.exists() {
            log::debug!("{name} already present in new worktree, not copying");
            continue;
        }

        let result = match dest.parent() {
            Some(parent) => fs::create_dir_all(parent).and_then(|_| fs::copy(&src, &dest)),
            None => fs::copy(&src, &dest),
        };

        match result {
            Ok(_) => {
                log::debug!("Copied {name}");
                report.copied.push(name.clone());
            }
            Err(e) => {
                log::debug!("Failed to copy {name}: {e}");
                report.failed.push((name.clone(), e.to_string()));
            }
        }
    }

    report
}
