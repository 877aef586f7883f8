// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher: consumes queued command files and starts or stops jobs

use crate::error::DispatchError;
use crate::gate::ResourceGate;
use crate::registry::{JobRegistry, StartOutcome, StopOutcome};
use crate::shutdown::Shutdown;
use hopper_adapters::{ResourceMonitor, WorkerPool};
use hopper_core::{Command, Verb};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Default wait on an empty queue before re-checking the shutdown flag.
pub const DEFAULT_QUEUE_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub queue_timeout: Duration,
    /// Drop registry entries for finished jobs before each command
    pub reclaim_finished: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            queue_timeout: DEFAULT_QUEUE_TIMEOUT,
            reclaim_finished: false,
        }
    }
}

/// What a successfully parsed command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Start(StartOutcome),
    Stop(StopOutcome),
}

/// Result of handling one command file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Parsed and applied; the file was deleted (or deletion was attempted)
    Parsed(Outcome),
    /// Failed to parse; the file was left in place
    Poisoned,
}

pub struct Dispatcher<M, P: WorkerPool> {
    queue: mpsc::UnboundedReceiver<PathBuf>,
    registry: Arc<JobRegistry<P::Handle>>,
    gate: ResourceGate<M>,
    pool: P,
    config: DispatcherConfig,
}

impl<M, P> Dispatcher<M, P>
where
    M: ResourceMonitor,
    P: WorkerPool,
{
    pub fn new(
        queue: mpsc::UnboundedReceiver<PathBuf>,
        registry: Arc<JobRegistry<P::Handle>>,
        gate: ResourceGate<M>,
        pool: P,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            queue,
            registry,
            gate,
            pool,
            config,
        }
    }

    /// Consume the queue until shutdown is triggered or the queue closes.
    ///
    /// Only a resource gate failure ends the loop with an error.
    pub async fn run(mut self, shutdown: Shutdown) -> Result<(), DispatchError> {
        tracing::info!("dispatcher started");
        while !shutdown.is_triggered() {
            let path = match tokio::time::timeout(self.config.queue_timeout, self.queue.recv()).await
            {
                Err(_elapsed) => continue,
                Ok(None) => {
                    tracing::info!("command queue closed, stopping dispatcher");
                    break;
                }
                Ok(Some(path)) => path,
            };

            tracing::debug!(path = %path.display(), "got command");
            match self.handle_path(&path).await {
                Ok(_) => {}
                Err(e) if e.is_fatal() => {
                    tracing::error!(path = %path.display(), error = %e, "fatal dispatch error");
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "error processing command file");
                }
            }
        }
        tracing::info!("dispatcher stopped");
        Ok(())
    }

    /// Read, parse, and apply one command file.
    ///
    /// Parsed files are deleted whatever the outcome. Malformed files stay
    /// behind for an operator.
    pub async fn handle_path(&self, path: &Path) -> Result<Handled, DispatchError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DispatchError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let command = match Command::parse(&content, path) {
            Ok(command) => command,
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    content = content.trim(),
                    error = %e,
                    "invalid command format, leaving file in place"
                );
                return Ok(Handled::Poisoned);
            }
        };

        let outcome = self.handle_command(&command).await?;
        remove_command_file(path).await;
        Ok(Handled::Parsed(outcome))
    }

    pub async fn handle_command(&self, command: &Command) -> Result<Outcome, DispatchError> {
        if self.config.reclaim_finished {
            let reaped = self.registry.reap_finished().await;
            if reaped > 0 {
                tracing::debug!(reaped, "reclaimed finished jobs");
            }
        }

        let key = command.key();
        let group = &command.group;
        let job = &command.job;

        match command.verb {
            Verb::Start => {
                let outcome = self
                    .registry
                    .try_start(&key, || self.submit(command))
                    .await?;
                match outcome {
                    StartOutcome::Started => tracing::info!(%group, %job, "started processing"),
                    StartOutcome::AlreadyRunning => {
                        tracing::info!(%group, %job, "processing already running")
                    }
                    // Reason already logged by submit
                    StartOutcome::Rejected => {}
                }
                Ok(Outcome::Start(outcome))
            }
            Verb::Stop => {
                let outcome = self.registry.try_stop(&key).await;
                match outcome {
                    StopOutcome::Stopped => tracing::info!(%key, "requested to stop"),
                    StopOutcome::StopFailed => {
                        tracing::warn!(%key, "could not stop, it may already be running")
                    }
                    StopOutcome::NotFound => {
                        tracing::info!(%group, %job, "no running job found")
                    }
                }
                Ok(Outcome::Stop(outcome))
            }
        }
    }

    /// Registry factory for `start`: gate, then submit.
    async fn submit(&self, command: &Command) -> Result<Option<P::Handle>, DispatchError> {
        if !self.gate.is_available().await? {
            tracing::warn!(
                group = %command.group,
                job = %command.job,
                "resource unavailable, cannot start processing"
            );
            return Ok(None);
        }

        match self.pool.submit(&command.group, &command.job) {
            Ok(handle) => Ok(Some(handle)),
            Err(e) => {
                tracing::warn!(
                    group = %command.group,
                    job = %command.job,
                    error = %e,
                    "submission refused"
                );
                Ok(None)
            }
        }
    }
}

async fn remove_command_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::info!(path = %path.display(), "deleted command file"),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to delete command file")
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
