//! Worktree lifecycle policy.
//!
//! [`WorktreeManager`] decides where worktrees live, whether a branch is
//! created or reused, and how the listing is enriched and ordered. All git
//! access goes through [`Repository`].

use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use crate::config::UserConfig;
use crate::git::{GitError, RebaseOutcome, RemoteSyncState, Repository, Worktree};
use crate::path::{canonicalize_best_effort, resolve_against, same_path};
use crate::utils::{format_relative_time, get_now};

mod env_files;

pub use env_files::{EnvCopyReport, copy_env_files};

/// Relative time shown when a commit timestamp can't be read.
pub const UNKNOWN_TIME: &str = "unknown";

/// Replace path separators so a branch name becomes one directory name.
pub fn safe_directory_name(branch: &str) -> String {
    branch.replace(['/', '\\'], "-")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    /// Branch to check out; defaults to the invoking worktree's branch.
    pub branch: Option<String>,
    pub rebase: bool,
    pub copy_env: bool,
    /// Base branch override for the start point and the rebase.
    pub base: Option<String>,
    /// Start point for a new branch instead of `origin/<base>`.
    pub from: Option<String>,
    /// Worktree location instead of the sibling-directory default.
    pub path: Option<PathBuf>,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            branch: None,
            rebase: true,
            copy_env: true,
            base: None,
            from: None,
            path: None,
        }
    }
}

/// How the post-create rebase went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseStatus {
    Skipped,
    Rebased(RebaseOutcome),
    /// The worktree exists; only the rebase failed.
    Failed(GitError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    pub path: PathBuf,
    pub branch: String,
    pub created_branch: bool,
    /// `None` when env copying was disabled.
    pub env_files: Option<EnvCopyReport>,
    pub rebase: RebaseStatus,
}

/// A worktree plus the status derived for the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeInfo {
    pub worktree: Worktree,
    pub subject: Option<String>,
    pub timestamp: Option<i64>,
    pub relative_time: String,
    pub dirty: bool,
    pub sync: RemoteSyncState,
}

/// Order by commit time, newest first. Stable; entries without a timestamp go last.
pub fn sort_by_recency(items: &mut [WorktreeInfo]) {
    items.sort_by_key(|info| Reverse(info.timestamp));
}

/// Match `target` against branch names, then paths, then directory names.
pub fn find_target<'a>(worktrees: &'a [Worktree], target: &str, cwd: &Path) -> Option<&'a Worktree> {
    if let Some(wt) = worktrees
        .iter()
        .find(|wt| wt.branch.as_deref() == Some(target))
    {
        return Some(wt);
    }

    let as_path = resolve_against(cwd, Path::new(target));
    if let Some(wt) = worktrees.iter().find(|wt| same_path(&wt.path, &as_path)) {
        return Some(wt);
    }

    worktrees.iter().find(|wt| wt.dir_name() == Some(target))
}

pub struct WorktreeManager {
    repo: Repository,
    cwd: PathBuf,
    config: UserConfig,
}

impl WorktreeManager {
    /// Manager for the repository containing `cwd`.
    pub fn new(cwd: impl Into<PathBuf>, config: UserConfig) -> Self {
        let cwd = cwd.into();
        let repo = Repository::at(&cwd).with_base_candidates(config.base_candidates.clone());
        Self { repo, cwd, config }
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    /// Where the worktree for `branch` goes.
    ///
    /// `custom` is resolved against the invoking directory. Otherwise the
    /// worktree is a sibling of it: `../<dir>-<safe branch name>`.
    pub fn compute_worktree_path(&self, branch: &str, custom: Option<&Path>) -> PathBuf {
        if let Some(custom) = custom {
            return resolve_against(&self.cwd, custom);
        }

        let dir_name = self
            .cwd
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repo".to_string());
        let sibling = Path::new("..").join(format!("{dir_name}-{}", safe_directory_name(branch)));
        resolve_against(&self.cwd, &sibling)
    }

    /// Create a worktree, copy env files into it, then rebase it.
    ///
    /// Env copying and the rebase are best-effort: their results are
    /// reported in the outcome, never as an error.
    pub fn create_worktree(&self, opts: CreateOptions) -> Result<CreateOutcome, GitError> {
        if let Some(branch) = &opts.branch {
            self.repo.check_branch_name(branch)?;
        }
        let branch = match opts.branch {
            Some(branch) => branch,
            None => self.repo.current_branch()?,
        };

        let exists = self.repo.branch_exists(&branch)?;
        let path = self.compute_worktree_path(&branch, opts.path.as_deref());
        if path.exists() {
            return Err(GitError::WorktreeAlreadyExists { path });
        }

        let base = opts.base.or_else(|| self.config.base_branch.clone());

        if exists {
            if opts.from.is_some() {
                log::warn!("Branch {branch} already exists; ignoring --from");
            }
            log::info!("Adding worktree for existing branch {branch}");
            self.repo.create_worktree(&path, &branch, false, None)?;
        } else {
            let start = match opts.from {
                Some(from) => from,
                None => self.repo.default_start_point(base.as_deref())?,
            };
            log::info!("Creating branch {branch} from {start}");
            self.repo.create_worktree(&path, &branch, true, Some(&start))?;
        }

        let env_files = opts
            .copy_env
            .then(|| copy_env_files(&self.cwd, &path, &self.config.env_files));

        let rebase = if opts.rebase {
            let scoped = self.repo.scoped_to(&path);
            match scoped.rebase_onto_base(base.as_deref()) {
                Ok(outcome) => RebaseStatus::Rebased(outcome),
                Err(e) => {
                    log::info!("Post-create rebase failed: {}", e.summary());
                    RebaseStatus::Failed(e)
                }
            }
        } else {
            RebaseStatus::Skipped
        };

        Ok(CreateOutcome {
            path,
            branch,
            created_branch: !exists,
            env_files,
            rebase,
        })
    }

    /// Remove the worktree at `path`. The primary worktree is always refused.
    pub fn delete_worktree(&self, path: &Path, force: bool) -> Result<(), GitError> {
        let worktrees = self.repo.list_worktrees()?;
        if let Some(primary) = worktrees.iter().find(|wt| wt.primary)
            && same_path(&primary.path, path)
        {
            return Err(GitError::CannotRemovePrimary {
                path: primary.path.clone(),
            });
        }

        self.repo.remove_worktree(path, force)
    }

    /// Every worktree with derived status, newest commit first.
    pub fn list_worktrees(&self) -> Result<Vec<WorktreeInfo>, GitError> {
        let now = get_now();
        let mut infos: Vec<WorktreeInfo> = self
            .repo
            .list_worktrees()?
            .into_iter()
            .map(|wt| self.enrich(wt, now))
            .collect();
        sort_by_recency(&mut infos);
        Ok(infos)
    }

    fn enrich(&self, worktree: Worktree, now: i64) -> WorktreeInfo {
        let reachable = worktree.prunable.is_none() && !worktree.bare && worktree.path.is_dir();
        let commit = (!worktree.head.is_empty()).then_some(worktree.head.as_str());

        let subject = commit.and_then(|c| self.repo.last_commit_subject(Some(c)));
        let timestamp = commit.and_then(|c| match self.repo.commit_timestamp(c, None) {
            Ok(ts) => Some(ts),
            Err(e) => {
                log::debug!("No timestamp for {c}: {}", e.summary());
                None
            }
        });
        let relative_time = timestamp
            .map(|ts| format_relative_time(ts, now))
            .unwrap_or_else(|| UNKNOWN_TIME.to_string());

        let dirty = reachable
            && self
                .repo
                .has_uncommitted_changes(&worktree.path)
                .unwrap_or_else(|e| {
                    log::debug!("Status unavailable for {}: {}", worktree.path.display(), e.summary());
                    false
                });

        let sync = if worktree.primary || worktree.detached || !reachable {
            RemoteSyncState::NoRemote
        } else {
            self.repo
                .remote_sync_state(worktree.branch.as_deref(), &worktree.path)
        };

        WorktreeInfo {
            worktree,
            subject,
            timestamp,
            relative_time,
            dirty,
            sync,
        }
    }

    /// Find a worktree by branch name, path or directory name.
    pub fn resolve_target(&self, target: &str) -> Result<Worktree, GitError> {
        let worktrees = self.repo.list_worktrees()?;
        find_target(&worktrees, target, &self.cwd)
            .cloned()
            .ok_or_else(|| GitError::WorktreeNotFound {
                target: target.to_string(),
            })
    }

    /// Path to switch to for `worktree`; its directory must still exist.
    pub fn switch_path(&self, worktree: &Worktree) -> Result<PathBuf, GitError> {
        if !worktree.path.is_dir() {
            return Err(GitError::WorktreeMissing {
                path: worktree.path.clone(),
            });
        }
        Ok(canonicalize_best_effort(&worktree.path))
    }

    /// Rebase the invoking worktree onto its base branch.
    pub fn sync(&self, base: Option<&str>) -> Result<RebaseOutcome, GitError> {
        let base = base.or(self.config.base_branch.as_deref());
        self.repo.rebase_onto_base(base)
    }

    /// Drop metadata for worktrees whose directories are gone.
    pub fn prune(&self) -> Result<String, GitError> {
        self.repo.prune_worktrees()
    }
}
