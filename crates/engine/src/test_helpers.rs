// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{Dispatcher, DispatcherConfig, JobRegistry, ResourceGate, DEFAULT_THRESHOLD};
use hopper_adapters::{FakeHandle, FakeMonitor, FakePool};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Convenience alias for the fully-typed test dispatcher.
pub(crate) type TestDispatcher = Dispatcher<FakeMonitor, FakePool>;

/// Test context holding the dispatcher, fakes, and the watched directory.
pub(crate) struct TestContext {
    pub dir: TempDir,
    pub monitor: FakeMonitor,
    pub pool: FakePool,
    pub registry: Arc<JobRegistry<FakeHandle>>,
    pub queue: mpsc::UnboundedSender<PathBuf>,
    pub dispatcher: TestDispatcher,
}

impl TestContext {
    /// Drop a command file into the watched directory.
    pub fn write_command(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn watch_dir(&self) -> &Path {
        self.dir.path()
    }
}

pub(crate) fn setup() -> TestContext {
    setup_with_config(DispatcherConfig {
        queue_timeout: Duration::from_millis(20),
        reclaim_finished: false,
    })
}

pub(crate) fn setup_with_config(config: DispatcherConfig) -> TestContext {
    let dir = tempfile::tempdir().unwrap();
    let monitor = FakeMonitor::new();
    let pool = FakePool::new();
    let registry = Arc::new(JobRegistry::new());
    let (queue, rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(
        rx,
        Arc::clone(&registry),
        ResourceGate::new(monitor.clone(), DEFAULT_THRESHOLD),
        pool.clone(),
        config,
    );

    TestContext {
        dir,
        monitor,
        pool,
        registry,
        queue,
        dispatcher,
    }
}

/// Poll `cond` every 10ms until it holds, failing after 5s.
pub(crate) async fn wait_until(mut cond: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !cond() {
        assert!(tokio::time::Instant::now() < deadline, "condition not met within 5s");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
