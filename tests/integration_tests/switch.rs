use crate::common::{TestRepo, parse_path, run_err, run_ok, stderr, stdout};

#[test]
fn switch_by_branch_prints_path() {
    let repo = TestRepo::new();
    let path = repo.add_worktree("feature/login");

    let output = run_ok(repo.arbor().args(["switch", "feature/login"]));
    assert_eq!(parse_path(&output), path);
    assert_eq!(stdout(&output).lines().count(), 1);
    assert!(stderr(&output).contains("Switching to feature/login"));
}

#[test]
fn switch_by_directory_name() {
    let repo = TestRepo::new();
    let path = repo.add_worktree("feature/login");

    let output = run_ok(repo.arbor().args(["sw", "project-feature-login"]));
    assert_eq!(parse_path(&output), path);
}

#[test]
fn switch_back_to_primary() {
    let repo = TestRepo::new();
    let feature = repo.add_worktree("feature");

    let output = run_ok(repo.arbor_at(&feature).args(["switch", "main"]));
    assert_eq!(parse_path(&output), repo.root());

    let output = run_ok(repo.arbor_at(&feature).args(["switch", "feature"]));
    assert_eq!(parse_path(&output), feature);
    assert!(stderr(&output).contains("Already in feature"));
}

#[test]
fn switch_to_missing_directory() {
    let repo = TestRepo::new();
    let path = repo.add_worktree("gone");
    std::fs::remove_dir_all(&path).unwrap();

    let output = run_err(repo.arbor().args(["switch", "gone"]));
    let err = stderr(&output);
    assert!(err.contains("Worktree directory missing"), "{err}");
    assert!(err.contains("arbor prune"), "{err}");
    assert!(stdout(&output).is_empty());
}

#[test]
fn switch_unknown_target() {
    let repo = TestRepo::new();

    let output = run_err(repo.arbor().args(["switch", "nope"]));
    assert!(stderr(&output).contains("No worktree found for nope"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn switch_without_target_needs_terminal() {
    let repo = TestRepo::new();

    let output = run_err(repo.arbor().arg("switch"));
    assert!(stderr(&output).contains("not a terminal"));
    assert!(stdout(&output).is_empty());
}
