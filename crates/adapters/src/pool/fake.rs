// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake worker pool for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{JobHandle, PoolError, WorkerPool};
use async_trait::async_trait;
use hopper_core::{GroupId, JobId};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Recorded submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub group: GroupId,
    pub job: JobId,
}

#[derive(Debug)]
struct FakeHandleState {
    cancellable: bool,
    cancel_calls: Mutex<usize>,
    finished: AtomicBool,
}

/// Handle whose cancel result is fixed at submission time
#[derive(Debug, Clone)]
pub struct FakeHandle {
    inner: Arc<FakeHandleState>,
}

impl FakeHandle {
    pub fn new(cancellable: bool) -> Self {
        Self {
            inner: Arc::new(FakeHandleState {
                cancellable,
                cancel_calls: Mutex::new(0),
                finished: AtomicBool::new(false),
            }),
        }
    }

    /// Simulate the unit running to completion
    pub fn finish(&self) {
        self.inner.finished.store(true, Ordering::Release);
    }

    pub fn cancel_calls(&self) -> usize {
        *self.inner.cancel_calls.lock()
    }
}

impl JobHandle for FakeHandle {
    fn cancel(&self) -> bool {
        *self.inner.cancel_calls.lock() += 1;
        if self.inner.cancellable {
            self.finish();
        }
        self.inner.cancellable
    }

    fn is_finished(&self) -> bool {
        self.inner.finished.load(Ordering::Acquire)
    }
}

struct FakePoolState {
    submissions: Vec<Submission>,
    handles: Vec<FakeHandle>,
    cancellable: bool,
    closed: bool,
    drained: bool,
}

/// Fake pool that records submissions instead of running anything
#[derive(Clone)]
pub struct FakePool {
    inner: Arc<Mutex<FakePoolState>>,
}

impl Default for FakePool {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakePoolState {
                submissions: Vec::new(),
                handles: Vec::new(),
                cancellable: true,
                closed: false,
                drained: false,
            })),
        }
    }
}

impl FakePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether handles from later submissions can be cancelled
    pub fn set_cancellable(&self, cancellable: bool) {
        self.inner.lock().cancellable = cancellable;
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.inner.lock().submissions.clone()
    }

    pub fn handles(&self) -> Vec<FakeHandle> {
        self.inner.lock().handles.clone()
    }

    pub fn is_drained(&self) -> bool {
        self.inner.lock().drained
    }
}

#[async_trait]
impl WorkerPool for FakePool {
    type Handle = FakeHandle;

    fn submit(&self, group: &GroupId, job: &JobId) -> Result<FakeHandle, PoolError> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(PoolError::Closed);
        }
        inner.submissions.push(Submission {
            group: group.clone(),
            job: job.clone(),
        });
        let handle = FakeHandle::new(inner.cancellable);
        inner.handles.push(handle.clone());
        Ok(handle)
    }

    fn close(&self) {
        self.inner.lock().closed = true;
    }

    async fn drain(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.drained = true;
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
