// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded worker pools and cancellable job handles

mod process;

pub use process::{ProcessHandle, ProcessPool, WorkerCommand, DEFAULT_POOL_SIZE};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHandle, FakePool, Submission};

use async_trait::async_trait;
use hopper_core::{GroupId, JobId};
use thiserror::Error;

/// Errors from submitting work
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("worker pool is closed")]
    Closed,
}

/// Best-effort cancellable reference to a submitted unit of work.
///
/// A failed cancel is an expected outcome: units that already started are
/// never preempted.
pub trait JobHandle: Send + Sync + 'static {
    /// Cancel the unit if it has not started. Returns false otherwise.
    fn cancel(&self) -> bool;

    /// True once the unit ran to completion or was cancelled.
    fn is_finished(&self) -> bool;
}

/// Fixed-capacity pool that runs the worker program for `(group, job)`
#[async_trait]
pub trait WorkerPool: Clone + Send + Sync + 'static {
    type Handle: JobHandle;

    /// Accept a unit. Queues internally when every slot is busy.
    fn submit(&self, group: &GroupId, job: &JobId) -> Result<Self::Handle, PoolError>;

    /// Stop accepting new units
    fn close(&self);

    /// Close the pool and wait for every accepted unit to finish
    async fn drain(&self);
}
