// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job registry: at most one active handle per job key

use hopper_adapters::JobHandle;
use hopper_core::JobKey;
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::Mutex;

/// Result of [`JobRegistry::try_start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    /// The factory declined to produce a handle (e.g. resources unavailable)
    Rejected,
}

/// Result of [`JobRegistry::try_stop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    /// Entry removed, but the unit could not be cancelled
    StopFailed,
    NotFound,
}

/// Maps job keys to their cancellable handles.
///
/// Start and stop each run under one lock, so concurrent starts for the
/// same key cannot both succeed.
pub struct JobRegistry<H> {
    jobs: Mutex<HashMap<JobKey, H>>,
}

impl<H> Default for JobRegistry<H> {
    fn default() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
        }
    }
}

impl<H: JobHandle> JobRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job under `key` unless one is already present.
    ///
    /// `factory` runs only when the key is absent, with the registry locked
    /// for its whole duration. `Ok(None)` from the factory yields
    /// [`StartOutcome::Rejected`]; an error is returned as-is. Neither
    /// inserts anything.
    pub async fn try_start<F, Fut, E>(&self, key: &JobKey, factory: F) -> Result<StartOutcome, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<H>, E>>,
    {
        let mut jobs = self.jobs.lock().await;
        if jobs.contains_key(key) {
            return Ok(StartOutcome::AlreadyRunning);
        }

        match factory().await? {
            Some(handle) => {
                jobs.insert(key.clone(), handle);
                Ok(StartOutcome::Started)
            }
            None => Ok(StartOutcome::Rejected),
        }
    }

    /// Remove the entry under `key`, then request cancellation.
    ///
    /// The entry is gone even when cancellation fails.
    pub async fn try_stop(&self, key: &JobKey) -> StopOutcome {
        let Some(handle) = self.jobs.lock().await.remove(key) else {
            return StopOutcome::NotFound;
        };

        if handle.cancel() {
            StopOutcome::Stopped
        } else {
            StopOutcome::StopFailed
        }
    }

    /// Drop entries whose units have finished. Returns how many were removed.
    pub async fn reap_finished(&self) -> usize {
        let mut jobs = self.jobs.lock().await;
        let before = jobs.len();
        jobs.retain(|_, handle| !handle.is_finished());
        before - jobs.len()
    }

    pub async fn contains(&self, key: &JobKey) -> bool {
        self.jobs.lock().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.jobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }

    /// Registered keys, sorted
    pub async fn keys(&self) -> Vec<JobKey> {
        let mut keys: Vec<_> = self.jobs.lock().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
