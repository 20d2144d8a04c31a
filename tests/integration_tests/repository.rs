//! Library-level checks of the git gateway against real repositories.

use arbor::git::{GitError, RemoteSyncState, Repository, StashOutcome};

use crate::common::TestRepo;

#[test]
fn branch_exists_checks_local_then_origin() {
    let repo = TestRepo::with_origin();
    repo.git(&["branch", "shared"]);
    repo.git(&["push", "origin", "shared"]);
    repo.git(&["branch", "-D", "shared"]);
    repo.git(&["branch", "local-only"]);

    let git = Repository::at(repo.root());
    assert!(git.branch_exists("main").unwrap());
    assert!(git.branch_exists("local-only").unwrap());
    assert!(git.branch_exists("shared").unwrap());
    assert!(!git.local_branch_exists("shared"));
    assert!(!git.branch_exists("missing").unwrap());
    assert!(matches!(
        git.branch_exists(""),
        Err(GitError::ValidationFailed { .. })
    ));
}

#[test]
fn base_branch_follows_candidate_order() {
    let repo = TestRepo::new();
    let git = Repository::at(repo.root());
    assert_eq!(git.base_branch().unwrap(), "main");

    repo.git(&["branch", "master"]);
    assert_eq!(git.base_branch().unwrap(), "master");

    repo.git(&["branch", "develop"]);
    assert_eq!(git.base_branch().unwrap(), "develop");

    let custom = git.clone().with_base_candidates(vec!["trunk".into(), "main".into()]);
    assert_eq!(custom.base_branch().unwrap(), "main");
}

#[test]
fn base_branch_missing() {
    let repo = TestRepo::with_branch("trunk");
    let git = Repository::at(repo.root());

    let err = git.base_branch().unwrap_err();
    assert_eq!(
        err,
        GitError::NoBaseBranch {
            candidates: vec!["develop".into(), "master".into(), "main".into()]
        }
    );
    assert!(matches!(
        git.resolve_base(Some("nope")),
        Err(GitError::BranchNotFound { .. })
    ));
    assert_eq!(git.resolve_base(Some("trunk")).unwrap(), "trunk");
}

#[test]
fn default_start_point_prefers_origin() {
    let repo = TestRepo::new();
    let git = Repository::at(repo.root());
    assert_eq!(git.default_start_point(None).unwrap(), "main");

    let repo = TestRepo::with_origin();
    let git = Repository::at(repo.root());
    assert_eq!(git.default_start_point(None).unwrap(), "origin/main");
}

#[test]
fn current_branch_and_detached_head() {
    let repo = TestRepo::new();
    let git = Repository::at(repo.root());
    assert_eq!(git.current_branch().unwrap(), "main");

    repo.git(&["checkout", "--detach"]);
    assert_eq!(git.current_branch().unwrap_err(), GitError::DetachedHead);
}

#[test]
fn current_branch_on_unborn_branch() {
    let repo = TestRepo::new();
    let empty = repo.base().join("empty");
    std::fs::create_dir(&empty).unwrap();
    repo.git_at(&empty, &["init", "-b", "main"]);

    assert_eq!(
        Repository::at(&empty).current_branch().unwrap_err(),
        GitError::DetachedHead
    );
}

#[test]
fn list_worktrees_marks_primary_and_current() {
    let repo = TestRepo::new();
    let feature = repo.add_worktree("feature");

    let from_feature = Repository::at(&feature).list_worktrees().unwrap();
    assert_eq!(from_feature.len(), 2);
    assert!(from_feature[0].primary);
    assert!(!from_feature[0].current);
    assert_eq!(from_feature[0].path, repo.root());
    assert_eq!(from_feature[1].branch.as_deref(), Some("feature"));
    assert!(from_feature[1].current);
    assert!(!from_feature[1].primary);

    // A subdirectory still belongs to its worktree
    let sub = repo.root().join("nested");
    std::fs::create_dir(&sub).unwrap();
    let from_sub = Repository::at(&sub).list_worktrees().unwrap();
    assert!(from_sub[0].current);
    assert!(!from_sub[1].current);
}

#[test]
fn rebase_skips_stash_when_clean() {
    let repo = TestRepo::with_origin();
    let feature = repo.add_worktree("feature");
    let git = Repository::at(&feature);

    let outcome = git.rebase_onto_base(None).unwrap();
    assert_eq!(outcome.base, "origin/main");
    assert_eq!(outcome.stash, StashOutcome::NotNeeded);
    assert!(git.stash_head().is_none());
}

#[test]
fn rebase_stashes_untracked_files_and_restores_them() {
    let repo = TestRepo::with_origin();
    let feature = repo.add_worktree("feature");
    std::fs::write(feature.join("untracked.txt"), "keep me\n").unwrap();
    let git = Repository::at(&feature);
    assert!(git.is_dirty().unwrap());

    let outcome = git.rebase_onto_base(None).unwrap();
    assert_eq!(outcome.stash, StashOutcome::Restored);
    assert!(feature.join("untracked.txt").is_file());
    assert!(git.stash_head().is_none());
}

#[test]
fn failed_fetch_restores_stashed_changes() {
    // No origin: the fetch fails after the stash was created
    let repo = TestRepo::new();
    let feature = repo.add_worktree("feature");
    std::fs::write(feature.join("wip.txt"), "wip\n").unwrap();
    let git = Repository::at(&feature);

    match git.rebase_onto_base(None).unwrap_err() {
        GitError::RebaseFailed {
            base,
            stashed,
            in_progress,
            ..
        } => {
            assert_eq!(base, "origin/main");
            assert!(!stashed);
            assert!(!in_progress);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(feature.join("wip.txt")).unwrap(), "wip\n");
    assert!(git.stash_head().is_none());
    assert!(!git.rebase_in_progress());
}

#[test]
fn conflicting_rebase_keeps_stash() {
    let repo = TestRepo::with_origin();
    let feature = repo.add_worktree("feature");
    repo.commit_file(repo.root(), "README.md", "upstream\n", "Upstream", "2024-02-01T00:00:00Z");
    repo.git(&["push", "origin", "main"]);
    repo.commit_file(&feature, "README.md", "feature\n", "Feature", "2024-03-01T00:00:00Z");
    std::fs::write(feature.join("wip.txt"), "wip\n").unwrap();
    let git = Repository::at(&feature);

    match git.rebase_onto_base(None).unwrap_err() {
        GitError::RebaseFailed {
            stashed,
            in_progress,
            ..
        } => {
            assert!(stashed);
            assert!(in_progress);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(git.rebase_in_progress());
    assert!(git.stash_head().is_some());
}

#[test]
fn remote_sync_states() {
    let repo = TestRepo::with_origin();
    let feature = repo.add_worktree("feature");
    let git = Repository::at(repo.root());

    assert_eq!(
        git.remote_sync_state(Some("feature"), &feature),
        RemoteSyncState::NoRemote
    );
    assert_eq!(git.remote_sync_state(None, &feature), RemoteSyncState::NoRemote);

    repo.git_at(&feature, &["push", "-u", "origin", "feature"]);
    assert_eq!(
        git.remote_sync_state(Some("feature"), &feature),
        RemoteSyncState::Synced
    );

    repo.commit_file(&feature, "a.txt", "a\n", "Local", "2024-02-01T00:00:00Z");
    assert_eq!(
        git.remote_sync_state(Some("feature"), &feature),
        RemoteSyncState::Ahead
    );

    repo.git_at(&feature, &["push", "origin", "feature"]);
    repo.git_at(&feature, &["reset", "--hard", "HEAD~1"]);
    assert_eq!(
        git.remote_sync_state(Some("feature"), &feature),
        RemoteSyncState::Behind
    );

    repo.commit_file(&feature, "b.txt", "b\n", "Other", "2024-03-01T00:00:00Z");
    assert_eq!(
        git.remote_sync_state(Some("feature"), &feature),
        RemoteSyncState::Diverged
    );
}

#[test]
fn check_branch_name_rejects_invalid() {
    let repo = TestRepo::new();
    let git = Repository::at(repo.root());

    assert!(git.check_branch_name("feature/ok").is_ok());
    for bad in ["", "-dash", "bad..name", "trailing.lock", "has space"] {
        assert!(
            matches!(
                git.check_branch_name(bad),
                Err(GitError::ValidationFailed { .. })
            ),
            "{bad:?} should be rejected"
        );
    }
}
