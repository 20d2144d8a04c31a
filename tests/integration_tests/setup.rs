use crate::common::{TestRepo, run_err, stderr};

#[test]
fn setup_forwards_configured_command_exit_code() {
    let repo = TestRepo::new();
    repo.write_config("setup-command = \"echo installing >&2; exit 3\"\n");

    let output = repo.arbor().arg("setup").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("installing"));
}

#[test]
fn setup_runs_in_invoking_directory() {
    let repo = TestRepo::new();
    repo.write_config("setup-command = \"touch setup-ran\"\n");

    let output = repo.arbor().arg("setup").output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(repo.root().join("setup-ran").is_file());
}

#[test]
fn setup_without_installer_points_to_shell_init() {
    let repo = TestRepo::new();
    let empty_path = repo.base().join("empty-bin");
    std::fs::create_dir(&empty_path).unwrap();

    let output = run_err(repo.arbor().arg("setup").env("PATH", &empty_path));
    let err = stderr(&output);
    assert!(err.contains("arbor-setup"), "{err}");
    assert!(err.contains("arbor shell init"), "{err}");
}

#[cfg(unix)]
#[test]
fn setup_finds_installer_on_path() {
    use std::os::unix::fs::PermissionsExt;

    let repo = TestRepo::new();
    let bin = repo.base().join("bin");
    std::fs::create_dir(&bin).unwrap();
    let installer = bin.join("arbor-setup");
    std::fs::write(&installer, "#!/bin/sh\ntouch installer-ran\n").unwrap();
    std::fs::set_permissions(&installer, std::fs::Permissions::from_mode(0o755)).unwrap();

    let path = std::env::join_paths(
        std::iter::once(bin).chain(std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default())),
    )
    .unwrap();

    let output = repo.arbor().arg("setup").env("PATH", path).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(repo.root().join("installer-ran").is_file());
}
