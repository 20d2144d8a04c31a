use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Commit date of the initial commit; later commits pass their own.
pub const INITIAL_DATE: &str = "2024-01-01T00:00:00Z";

/// Pinned "now" for relative times: 2024-06-01.
pub const NOW_EPOCH: &str = "1717200000";

/// Environment shared by every git and arbor invocation in tests.
fn isolated_env(config_path: &Path) -> Vec<(&'static str, String)> {
    vec![
        ("GIT_CONFIG_GLOBAL", "/dev/null".to_string()),
        ("GIT_CONFIG_SYSTEM", "/dev/null".to_string()),
        ("GIT_AUTHOR_DATE", INITIAL_DATE.to_string()),
        ("GIT_COMMITTER_DATE", INITIAL_DATE.to_string()),
        ("LC_ALL", "C".to_string()),
        ("LANG", "C".to_string()),
        ("SOURCE_DATE_EPOCH", NOW_EPOCH.to_string()),
        (
            "ARBOR_CONFIG_PATH",
            config_path.to_string_lossy().into_owned(),
        ),
    ]
}

/// A repository under `<tmp>/project` so worktrees land as siblings in `<tmp>`.
pub struct TestRepo {
    _temp_dir: TempDir,
    root: PathBuf,
    config_path: PathBuf,
}

impl TestRepo {
    /// Repository on `main` with one commit and no remote.
    pub fn new() -> Self {
        Self::with_branch("main")
    }

    /// Repository whose only branch is `branch`.
    pub fn with_branch(branch: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // Canonicalize to resolve symlinks (important on macOS where /var is symlink to /private/var)
        let base = dunce::canonicalize(temp_dir.path()).expect("Failed to canonicalize temp path");
        let root = base.join("project");
        std::fs::create_dir(&root).expect("Failed to create repo directory");

        let repo = Self {
            _temp_dir: temp_dir,
            config_path: base.join("arbor-config.toml"),
            root,
        };

        repo.git(&["init", "-b", branch]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        std::fs::write(repo.root.join("README.md"), "hello\n").unwrap();
        repo.git(&["add", "README.md"]);
        repo.git(&["commit", "-m", "initial"]);

        repo
    }

    /// Repository on `main` with a bare `origin` that has `main` pushed.
    pub fn with_origin() -> Self {
        let repo = Self::new();
        let origin = repo.origin_path();
        git_in(
            repo.base(),
            &["init", "--bare", "-b", "main", "origin.git"],
            &repo.config_path,
        );
        repo.git(&["remote", "add", "origin", &origin.to_string_lossy()]);
        repo.git(&["push", "-u", "origin", "main"]);
        repo
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the repository, its worktrees and `origin.git`.
    pub fn base(&self) -> &Path {
        self.root.parent().expect("repo root has a parent")
    }

    pub fn origin_path(&self) -> PathBuf {
        self.base().join("origin.git")
    }

    /// Default sibling path for a branch's worktree.
    pub fn sibling(&self, dir_suffix: &str) -> PathBuf {
        self.base().join(format!("project-{dir_suffix}"))
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(&self.config_path, contents).unwrap();
    }

    /// Run git in the repository root, returning stdout.
    pub fn git(&self, args: &[&str]) -> String {
        git_in(&self.root, args, &self.config_path)
    }

    /// Run git in `dir`, returning stdout.
    pub fn git_at(&self, dir: &Path, args: &[&str]) -> String {
        git_in(dir, args, &self.config_path)
    }

    /// Commit `file` with `content` in `dir`, dated `date`.
    pub fn commit_file(&self, dir: &Path, file: &str, content: &str, message: &str, date: &str) {
        std::fs::write(dir.join(file), content).unwrap();
        self.git_at(dir, &["add", file]);
        let mut cmd = Command::new("git");
        cmd.args(["commit", "-m", message])
            .current_dir(dir)
            .envs(isolated_env(&self.config_path))
            .env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date);
        check(&mut cmd, &["commit", "-m", message]);
    }

    /// `arbor` invocation running in the repository root.
    pub fn arbor(&self) -> assert_cmd::Command {
        self.arbor_at(&self.root)
    }

    /// `arbor` invocation running in `dir`.
    pub fn arbor_at(&self, dir: &Path) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("arbor");
        cmd.current_dir(dir)
            .envs(isolated_env(&self.config_path))
            .env_remove("RUST_LOG")
            .env_remove("DEBUG");
        cmd
    }

    /// Create a linked worktree for a new branch without going through arbor.
    pub fn add_worktree(&self, branch: &str) -> PathBuf {
        let path = self.sibling(&branch.replace('/', "-"));
        self.git(&["worktree", "add", "-b", branch, &path.to_string_lossy()]);
        path
    }
}

fn check(cmd: &mut Command, args: &[&str]) -> String {
    let output = cmd
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {args:?}: {e}"));
    if !output.status.success() {
        panic!(
            "git {args:?} failed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn git_in(dir: &Path, args: &[&str], config_path: &Path) -> String {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .current_dir(dir)
        .envs(isolated_env(config_path));
    check(&mut cmd, args)
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn parse_path(output: &Output) -> PathBuf {
    let s = String::from_utf8(output.stdout.clone()).expect("stdout should be utf-8");
    PathBuf::from(s.trim())
}

/// Run a command, asserting success and returning its output.
pub fn run_ok(cmd: &mut assert_cmd::Command) -> Output {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        stdout(&output),
        stderr(&output)
    );
    output
}

/// Run a command, asserting exit code 1 and returning its output.
pub fn run_err(cmd: &mut assert_cmd::Command) -> Output {
    let output = cmd.output().unwrap();
    assert_eq!(
        output.status.code(),
        Some(1),
        "expected exit 1\nstdout:\n{}\nstderr:\n{}",
        stdout(&output),
        stderr(&output)
    );
    output
}
