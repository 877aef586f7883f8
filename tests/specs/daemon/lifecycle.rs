//! Daemon lifecycle specs
//!
//! Start the daemon against a tempdir, drive it through command files,
//! and stop it with SIGINT.

use crate::prelude::*;

#[test]
fn start_command_runs_worker_and_deletes_file() {
    let mut daemon = Daemon::new();
    daemon.start();

    let file = daemon.drop_file("cmd1", "start groupA job1\n");

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || !file.exists()),
        "command file should be deleted after processing"
    );
    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || daemon.runs() == vec!["groupA job1"]),
        "worker should run once with group and job, got: {:?}",
        daemon.runs()
    );

    let status = daemon.interrupt().expect("daemon should exit on SIGINT");
    assert!(status.success(), "expected clean exit, got {status}");
    assert!(daemon.log().contains("Service stopped."));
}

#[test]
fn malformed_command_file_is_left_in_place() {
    let mut daemon = Daemon::new();
    daemon.start();

    let bad = daemon.drop_file("bad", "launch everything now please\n");
    let good = daemon.drop_file("good", "start groupB job2\n");

    // The well-formed file after it still gets processed
    assert!(wait_for(SPEC_WAIT_MAX_MS, || !good.exists()));
    assert!(bad.exists(), "malformed file must not be deleted");

    let status = daemon.interrupt().expect("daemon should exit on SIGINT");
    assert!(status.success());
}

#[test]
fn daemon_creates_missing_watch_dir() {
    let mut daemon = Daemon::new();
    std::fs::remove_dir_all(daemon.watch_dir()).unwrap();
    daemon.start();

    assert!(
        wait_for(SPEC_WAIT_MAX_MS, || daemon.watch_dir().is_dir()),
        "watched directory should be created at startup"
    );
    assert!(wait_for(SPEC_WAIT_MAX_MS, || daemon
        .log()
        .contains("Service started.")));

    daemon.interrupt().expect("daemon should exit on SIGINT");
}
