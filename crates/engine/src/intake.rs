// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command intake: discovers new files in the watched directory
//!
//! Every poll lists the directory and queues regular files whose names have
//! not been seen before. The seen set only grows, so a name is queued at
//! most once for the lifetime of the intake, even if a new file later
//! reuses it. Filesystem notifications only wake the loop early; discovery
//! always goes through the listing.

use crate::error::IntakeError;
use crate::shutdown::Shutdown;
use notify::event::{AccessKind, AccessMode, ModifyKind};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// Default polling cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub watch_dir: PathBuf,
    pub poll_interval: Duration,
    /// Wake early on filesystem events
    pub fs_events: bool,
}

impl IntakeConfig {
    pub fn new(watch_dir: impl Into<PathBuf>) -> Self {
        Self {
            watch_dir: watch_dir.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            fs_events: true,
        }
    }
}

/// Producer side of the command queue
pub struct CommandIntake {
    config: IntakeConfig,
    seen: HashSet<OsString>,
    queue: mpsc::UnboundedSender<PathBuf>,
}

impl CommandIntake {
    pub fn new(config: IntakeConfig, queue: mpsc::UnboundedSender<PathBuf>) -> Self {
        Self {
            config,
            seen: HashSet::new(),
            queue,
        }
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// One listing pass. Returns how many files were queued.
    ///
    /// New entries are queued in file-name order. Entries that are not
    /// regular files are skipped without being marked seen.
    pub fn scan_once(&mut self) -> Result<usize, IntakeError> {
        let list_err = |source| IntakeError::List {
            path: self.config.watch_dir.clone(),
            source,
        };

        let mut fresh = Vec::new();
        for entry in std::fs::read_dir(&self.config.watch_dir).map_err(list_err)? {
            let entry = entry.map_err(list_err)?;
            let name = entry.file_name();
            if !self.seen.contains(&name) {
                fresh.push((name, entry.path()));
            }
        }
        fresh.sort();

        let mut queued = 0;
        for (name, path) in fresh {
            if !path.is_file() {
                continue;
            }
            if self.queue.send(path.clone()).is_err() {
                return Err(IntakeError::QueueClosed);
            }
            tracing::info!(path = %path.display(), "file added to queue");
            self.seen.insert(name);
            queued += 1;
        }
        Ok(queued)
    }

    /// Poll until shutdown is triggered or the queue closes.
    pub async fn run(mut self, shutdown: Shutdown) {
        let (wake_tx, mut wake_rx) = mpsc::channel(1);
        let _watcher = if self.config.fs_events {
            match create_dir_watcher(&self.config.watch_dir, wake_tx) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    tracing::warn!(
                        dir = %self.config.watch_dir.display(),
                        error = %e,
                        "failed to create directory watcher, using polling only"
                    );
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(
            dir = %self.config.watch_dir.display(),
            poll_ms = self.config.poll_interval.as_millis() as u64,
            "command intake started"
        );

        while !shutdown.is_triggered() {
            match self.scan_once() {
                Ok(_) => {}
                Err(IntakeError::QueueClosed) => {
                    tracing::info!("command queue closed, stopping intake");
                    break;
                }
                Err(e) => tracing::error!(error = %e, "error while monitoring folder"),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval) => {}
                Some(()) = wake_rx.recv() => {
                    tracing::trace!("woken by filesystem event");
                }
                _ = shutdown.wait() => {}
            }
        }

        tracing::info!(seen = self.seen.len(), "command intake stopped");
    }
}

/// Events that signal a file is complete in the directory: a writer closed
/// it, or it was renamed in.
fn is_completion_event(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Access(AccessKind::Close(AccessMode::Write)) | EventKind::Modify(ModifyKind::Name(_))
    )
}

fn create_dir_watcher(
    dir: &Path,
    tx: mpsc::Sender<()>,
) -> Result<RecommendedWatcher, notify::Error> {
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
        if let Ok(event) = res {
            if is_completion_event(&event.kind) {
                // Full channel means a wakeup is already pending
                let _ = tx.try_send(());
            }
        }
    })?;

    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

#[cfg(test)]
#[path = "intake_tests.rs"]
mod tests;
