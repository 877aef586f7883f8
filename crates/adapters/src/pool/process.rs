// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker pool that runs an external program per job

use super::{JobHandle, PoolError, WorkerPool};
use crate::subprocess::run_with_timeout;
use async_trait::async_trait;
use hopper_core::{GroupId, JobId};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Default number of concurrent worker slots.
pub const DEFAULT_POOL_SIZE: usize = 4;

const PENDING: u8 = 0;
const RUNNING: u8 = 1;
const CANCELLED: u8 = 2;
const DONE: u8 = 3;

/// External worker invocation: `<program> <args..> <group> <job>`
#[derive(Debug, Clone)]
pub struct WorkerCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl WorkerCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn build(&self, group: &GroupId, job: &JobId) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args)
            .arg(group.as_str())
            .arg(job.as_str())
            .stdin(std::process::Stdio::null());
        cmd
    }
}

/// Handle to a unit submitted to a [`ProcessPool`]
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    state: Arc<AtomicU8>,
}

impl JobHandle for ProcessHandle {
    fn cancel(&self) -> bool {
        self.state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn is_finished(&self) -> bool {
        matches!(self.state.load(Ordering::Acquire), CANCELLED | DONE)
    }
}

struct PoolInner {
    command: WorkerCommand,
    slots: Arc<Semaphore>,
    capacity: usize,
    closed: AtomicBool,
    units: Mutex<Vec<JoinHandle<()>>>,
}

/// Runs at most `capacity` worker processes at once
#[derive(Clone)]
pub struct ProcessPool {
    inner: Arc<PoolInner>,
}

impl ProcessPool {
    pub fn new(command: WorkerCommand, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(PoolInner {
                command,
                slots: Arc::new(Semaphore::new(capacity)),
                capacity,
                closed: AtomicBool::new(false),
                units: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Number of units handed to the runtime and not yet reaped
    pub fn in_flight(&self) -> usize {
        let mut units = self.inner.units.lock();
        units.retain(|unit| !unit.is_finished());
        units.len()
    }
}

async fn run_unit(
    command: WorkerCommand,
    slots: Arc<Semaphore>,
    state: Arc<AtomicU8>,
    group: GroupId,
    job: JobId,
) {
    let Ok(_permit) = slots.acquire_owned().await else {
        state.store(DONE, Ordering::Release);
        return;
    };

    if state
        .compare_exchange(PENDING, RUNNING, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        tracing::debug!(%group, %job, "unit cancelled before start");
        return;
    }

    tracing::info!(%group, %job, program = %command.program, "worker running");
    let description = format!("worker {}/{}", group, job);
    match run_with_timeout(command.build(&group, &job), command.timeout, &description).await {
        Ok(status) if status.success() => {
            tracing::info!(%group, %job, "worker executed successfully");
        }
        Ok(status) => {
            tracing::error!(%group, %job, exit_code = ?status.code(), "worker execution failed");
        }
        Err(e) => {
            tracing::error!(%group, %job, error = %e, "worker execution failed");
        }
    }
    state.store(DONE, Ordering::Release);
}

#[async_trait]
impl WorkerPool for ProcessPool {
    type Handle = ProcessHandle;

    fn submit(&self, group: &GroupId, job: &JobId) -> Result<ProcessHandle, PoolError> {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(PoolError::Closed);
        }

        let state = Arc::new(AtomicU8::new(PENDING));
        let unit = tokio::spawn(run_unit(
            self.inner.command.clone(),
            Arc::clone(&self.inner.slots),
            Arc::clone(&state),
            group.clone(),
            job.clone(),
        ));

        let mut units = self.inner.units.lock();
        units.retain(|unit| !unit.is_finished());
        units.push(unit);

        Ok(ProcessHandle { state })
    }

    fn close(&self) {
        self.inner.closed.store(true, Ordering::Release);
    }

    async fn drain(&self) {
        self.close();
        loop {
            let units = std::mem::take(&mut *self.inner.units.lock());
            if units.is_empty() {
                break;
            }
            for unit in units {
                if let Err(e) = unit.await {
                    tracing::error!(error = %e, "worker unit panicked");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
