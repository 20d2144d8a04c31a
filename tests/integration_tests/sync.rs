use std::path::{Path, PathBuf};

use crate::common::{TestRepo, run_err, run_ok, stderr};

/// Origin with a feature worktree, then a new commit on origin's main.
fn repo_with_upstream_change(file: &str, content: &str) -> (TestRepo, PathBuf) {
    let repo = TestRepo::with_origin();
    let feature = repo.add_worktree("feature");
    repo.commit_file(repo.root(), file, content, "Upstream change", "2024-02-01T00:00:00Z");
    repo.git(&["push", "origin", "main"]);
    (repo, feature)
}

fn stash_list(repo: &TestRepo, dir: &Path) -> String {
    repo.git_at(dir, &["stash", "list"])
}

#[test]
fn sync_rebases_onto_origin() {
    let (repo, feature) = repo_with_upstream_change("upstream.txt", "new\n");
    repo.commit_file(&feature, "mine.txt", "mine\n", "Feature work", "2024-03-01T00:00:00Z");

    let output = run_ok(repo.arbor_at(&feature).arg("sync"));
    let err = stderr(&output);
    assert!(err.contains("Rebased onto origin/main"), "{err}");
    assert!(!err.contains("stash"), "{err}");

    assert!(feature.join("upstream.txt").is_file());
    let log = repo.git_at(&feature, &["log", "--format=%s"]);
    assert_eq!(log.lines().collect::<Vec<_>>(), ["Feature work", "Upstream change", "initial"]);
}

#[test]
fn sync_restores_uncommitted_changes() {
    let (repo, feature) = repo_with_upstream_change("upstream.txt", "new\n");
    std::fs::write(feature.join("scratch.txt"), "wip\n").unwrap();

    let output = run_ok(repo.arbor_at(&feature).arg("sync"));
    let err = stderr(&output);
    assert!(err.contains("Restored uncommitted changes"), "{err}");

    assert_eq!(std::fs::read_to_string(feature.join("scratch.txt")).unwrap(), "wip\n");
    assert!(feature.join("upstream.txt").is_file());
    assert!(stash_list(&repo, &feature).is_empty());
}

#[test]
fn sync_keeps_stash_when_pop_conflicts() {
    let (repo, feature) = repo_with_upstream_change("README.md", "upstream\n");
    std::fs::write(feature.join("README.md"), "local edit\n").unwrap();

    let output = run_ok(repo.arbor_at(&feature).arg("sync"));
    let err = stderr(&output);
    assert!(err.contains("Rebased onto origin/main"), "{err}");
    assert!(err.contains("remain in the stash"), "{err}");
    assert!(err.contains("git stash pop"), "{err}");

    assert!(stash_list(&repo, &feature).contains("arbor: auto-stash before rebase"));
}

#[test]
fn sync_with_explicit_base() {
    let repo = TestRepo::with_origin();
    repo.git(&["branch", "release"]);
    repo.git(&["push", "origin", "release"]);
    let feature = repo.add_worktree("feature");

    let output = run_ok(repo.arbor_at(&feature).args(["sync", "--base", "release"]));
    assert!(stderr(&output).contains("Rebased onto origin/release"));
}

#[test]
fn sync_without_origin_fails() {
    let repo = TestRepo::new();
    let feature = repo.add_worktree("feature");

    let output = run_err(repo.arbor_at(&feature).arg("sync"));
    let err = stderr(&output);
    assert!(err.contains("Rebase onto origin/main failed"), "{err}");
    assert!(!err.contains("git stash pop"), "{err}");
    assert!(!err.contains("git rebase --continue"), "{err}");
}

#[test]
fn sync_without_origin_restores_changes() {
    let repo = TestRepo::new();
    let feature = repo.add_worktree("feature");
    std::fs::write(feature.join("scratch.txt"), "wip\n").unwrap();

    let output = run_err(repo.arbor_at(&feature).arg("sync"));
    let err = stderr(&output);
    assert!(err.contains("Rebase onto origin/main failed"), "{err}");
    assert!(!err.contains("git stash pop"), "{err}");

    assert_eq!(std::fs::read_to_string(feature.join("scratch.txt")).unwrap(), "wip\n");
    assert!(stash_list(&repo, &feature).is_empty());
}

#[test]
fn sync_conflict_reports_stash() {
    let (repo, feature) = repo_with_upstream_change("README.md", "upstream\n");
    repo.commit_file(&feature, "README.md", "feature\n", "Feature README", "2024-03-01T00:00:00Z");
    std::fs::write(feature.join("scratch.txt"), "wip\n").unwrap();

    let output = run_err(repo.arbor_at(&feature).arg("sync"));
    let err = stderr(&output);
    assert!(err.contains("Rebase onto origin/main failed"), "{err}");
    assert!(err.contains("Resolve conflicts manually"), "{err}");
    assert!(err.contains("git stash pop"), "{err}");
    assert!(stash_list(&repo, &feature).contains("arbor: auto-stash before rebase"));
}
