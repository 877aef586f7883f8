// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires command intake and the dispatcher into one running service

use crate::dispatcher::{Dispatcher, DispatcherConfig};
use crate::error::ServiceError;
use crate::gate::{ResourceGate, DEFAULT_THRESHOLD};
use crate::intake::{CommandIntake, IntakeConfig};
use crate::registry::JobRegistry;
use crate::shutdown::Shutdown;
use hopper_adapters::{ResourceMonitor, WorkerPool};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub intake: IntakeConfig,
    pub dispatcher: DispatcherConfig,
    /// Resource gate threshold, in percent
    pub threshold: f32,
}

impl ServiceConfig {
    pub fn new(watch_dir: impl Into<PathBuf>) -> Self {
        Self {
            intake: IntakeConfig::new(watch_dir),
            dispatcher: DispatcherConfig::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Running intake and dispatcher loops plus the pool they feed
pub struct Service<P: WorkerPool> {
    shutdown: Shutdown,
    intake: Option<JoinHandle<()>>,
    dispatcher: Option<JoinHandle<Result<(), crate::DispatchError>>>,
    pool: P,
    registry: Arc<JobRegistry<P::Handle>>,
}

impl<P: WorkerPool> Service<P> {
    /// Spawn both loops on the current tokio runtime.
    pub fn start<M: ResourceMonitor>(config: ServiceConfig, monitor: M, pool: P) -> Self {
        let shutdown = Shutdown::new();
        let registry = Arc::new(JobRegistry::new());
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();

        let intake = CommandIntake::new(config.intake, queue_tx);
        let dispatcher = Dispatcher::new(
            queue_rx,
            Arc::clone(&registry),
            ResourceGate::new(monitor, config.threshold),
            pool.clone(),
            config.dispatcher,
        );

        let intake = tokio::spawn(intake.run(shutdown.clone()));
        let dispatcher = tokio::spawn(dispatcher.run(shutdown.clone()));

        Self {
            shutdown,
            intake: Some(intake),
            dispatcher: Some(dispatcher),
            pool,
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<JobRegistry<P::Handle>> {
        &self.registry
    }

    /// Resolve when the dispatcher exits on its own (a fatal error, or the
    /// queue closing). Pending forever once it has been observed.
    pub async fn stopped(&mut self) -> Result<(), ServiceError> {
        let Some(task) = self.dispatcher.as_mut() else {
            return std::future::pending().await;
        };
        let result = task.await;
        self.dispatcher = None;
        result??;
        Ok(())
    }

    /// Stop both loops, then wait for the pool to finish in-flight units.
    ///
    /// The pool closes before either loop is joined, so a `start` still
    /// waiting on the resource gate is rejected.
    pub async fn shutdown(mut self) -> Result<(), ServiceError> {
        self.shutdown.trigger();
        self.pool.close();

        let mut result = Ok(());
        if let Some(task) = self.intake.take() {
            if let Err(e) = task.await {
                result = Err(e.into());
            }
        }
        if let Some(task) = self.dispatcher.take() {
            match task.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => result = Err(e.into()),
                Err(e) => result = Err(e.into()),
            }
        }

        tracing::info!("waiting for in-flight jobs");
        self.pool.drain().await;
        tracing::info!("stopped processing service");
        result
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
