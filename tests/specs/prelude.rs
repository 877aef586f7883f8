//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

// Spec polling timeouts
pub const SPEC_POLL_INTERVAL_MS: u64 = 10;
pub const SPEC_WAIT_MAX_MS: u64 = 5000;

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>, so its
    // grandparent is target/debug/ where hopperd is built.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Returns the path to the hopperd binary.
pub fn hopperd_binary() -> PathBuf {
    binary_path("hopperd")
}

/// Poll a condition until it returns true or timeout is reached.
pub fn wait_for<F>(timeout_ms: u64, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll_interval = Duration::from_millis(SPEC_POLL_INTERVAL_MS);

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        std::thread::sleep(poll_interval);
    }
    false
}

/// Temporary daemon environment: a watched directory, a recording worker
/// script, and a log file, all under one tempdir.
pub struct Daemon {
    dir: tempfile::TempDir,
    child: Option<Child>,
}

impl Daemon {
    /// Create the directory layout without starting the daemon
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("inbox")).unwrap();

        let worker = dir.path().join("worker.sh");
        let marker = dir.path().join("runs.txt");
        let script = format!(
            "#!/bin/sh\necho \"$1 $2\" >> '{}'\n",
            marker.display()
        );
        let mut f = std::fs::File::create(&worker).unwrap();
        f.write_all(script.as_bytes()).unwrap();
        drop(f);
        std::fs::set_permissions(&worker, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir, child: None }
    }

    pub fn watch_dir(&self) -> PathBuf {
        self.dir.path().join("inbox")
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("service.log")
    }

    /// Build the daemon command with fast polling and a permissive threshold
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(hopperd_binary());
        cmd.env("HOPPER_WATCH_DIR", self.watch_dir())
            .env("HOPPER_WORKER_PROGRAM", self.dir.path().join("worker.sh"))
            .env("HOPPER_WORKER_ARGS", "")
            .env("HOPPER_POLL_MS", "50")
            .env("HOPPER_QUEUE_TIMEOUT_MS", "50")
            .env("HOPPER_SAMPLE_MS", "200")
            .env("HOPPER_THRESHOLD", "100")
            .env("HOPPER_LOG_PATH", self.log_path())
            .env("RUST_LOG", "info")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    pub fn start(&mut self) {
        self.child = Some(self.command().spawn().unwrap());
    }

    /// Write a command file into the watched directory
    pub fn drop_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.watch_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Lines the worker script recorded, one per run
    pub fn runs(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("runs.txt"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn log(&self) -> String {
        std::fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    /// Send SIGINT and wait for the daemon to exit
    pub fn interrupt(&mut self) -> Option<std::process::ExitStatus> {
        let child = self.child.as_mut()?;
        Command::new("kill")
            .args(["-INT", &child.id().to_string()])
            .status()
            .unwrap();

        let mut status = None;
        wait_for(SPEC_WAIT_MAX_MS, || {
            status = child.try_wait().unwrap();
            status.is_some()
        });
        status
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
