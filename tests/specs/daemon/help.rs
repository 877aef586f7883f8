//! Daemon help and version specs
//!
//! Verify hopperd --help, --version, and related flags work without
//! creating the watched directory or starting the service.

use crate::prelude::*;

fn hopperd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(hopperd_binary());
    cmd.env("HOPPER_WATCH_DIR", "/nonexistent/hopper-help-check");
    cmd
}

fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.assert().success().get_output().clone();
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn hopperd_version_shows_version() {
    let stdout = stdout_of(hopperd().arg("--version"));
    assert!(
        stdout.starts_with("hopperd 0.1.0"),
        "expected version, got: {stdout}"
    );
}

#[test]
fn hopperd_short_version_shows_version() {
    for flag in ["-v", "-V"] {
        let stdout = stdout_of(hopperd().arg(flag));
        assert!(stdout.starts_with("hopperd 0.1.0"), "{flag}: {stdout}");
    }
}

#[test]
fn hopperd_help_shows_usage() {
    let stdout = stdout_of(hopperd().arg("--help"));
    assert!(
        stdout.contains("USAGE:"),
        "expected USAGE section, got: {stdout}"
    );
    assert!(stdout.contains("--help"), "expected --help in output");
    assert!(stdout.contains("--version"), "expected --version in output");
}

#[test]
fn hopperd_help_subcommand_shows_usage() {
    for flag in ["-h", "help"] {
        let stdout = stdout_of(hopperd().arg(flag));
        assert!(stdout.contains("USAGE:"), "{flag}: {stdout}");
    }
}

#[test]
fn hopperd_unknown_arg_fails() {
    let output = hopperd().arg("--bogus").assert().failure().get_output().clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unexpected argument"),
        "expected error message, got: {stderr}"
    );
    assert!(
        !std::path::Path::new("/nonexistent/hopper-help-check").exists(),
        "info flags must not create the watched directory"
    );
}
