// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: configuration, startup, shutdown.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hopper_adapters::{ProcessPool, SystemMonitor, WorkerCommand};
use hopper_engine::{DispatcherConfig, IntakeConfig, Service, ServiceConfig, ServiceError};
use thiserror::Error;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

use crate::env;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory watched for command files
    pub watch_dir: PathBuf,
    /// Path to the service log file
    pub log_path: PathBuf,
    /// External worker invocation
    pub worker: WorkerCommand,
    /// Concurrent worker slots
    pub pool_size: usize,
    /// CPU/memory threshold in percent
    pub threshold: f32,
    pub poll_interval: Duration,
    pub queue_timeout: Duration,
    pub sample_window: Duration,
    pub fs_events: bool,
    pub reclaim_finished: bool,
}

impl Config {
    /// Load configuration from `HOPPER_*` environment variables.
    pub fn load() -> Self {
        Self {
            watch_dir: env::watch_dir(),
            log_path: env::log_path(),
            worker: WorkerCommand::new(env::worker_program())
                .with_args(env::worker_args())
                .with_timeout(env::worker_timeout()),
            pool_size: env::pool_size(),
            threshold: env::threshold(),
            poll_interval: env::poll_interval(),
            queue_timeout: env::queue_timeout(),
            sample_window: env::sample_window(),
            fs_events: env::fs_events(),
            reclaim_finished: env::reclaim_finished(),
        }
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            intake: IntakeConfig {
                watch_dir: self.watch_dir.clone(),
                poll_interval: self.poll_interval,
                fs_events: self.fs_events,
            },
            dispatcher: DispatcherConfig {
                queue_timeout: self.queue_timeout,
                reclaim_finished: self.reclaim_finished,
            },
            threshold: self.threshold,
        }
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Failed to create watched directory {0}: {1}")]
    WatchDir(PathBuf, #[source] std::io::Error),

    #[error("Invalid log path: {0}")]
    InvalidLogPath(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Service(#[from] ServiceError),
}

/// Create the watched directory if it does not exist
pub fn prepare_watch_dir(dir: &Path) -> Result<(), LifecycleError> {
    std::fs::create_dir_all(dir).map_err(|e| LifecycleError::WatchDir(dir.to_path_buf(), e))
}

/// Run the service until SIGINT/SIGTERM or a fatal dispatcher error, then
/// drain the worker pool.
pub async fn run(config: &Config) -> Result<(), LifecycleError> {
    prepare_watch_dir(&config.watch_dir)?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let monitor = SystemMonitor::new(config.sample_window);
    let pool = ProcessPool::new(config.worker.clone(), config.pool_size);
    let mut service = Service::start(config.service_config(), monitor, pool);

    info!(
        watch_dir = %config.watch_dir.display(),
        worker = %config.worker.program,
        pool_size = config.pool_size,
        threshold = config.threshold,
        "Service started."
    );

    let fatal = tokio::select! {
        _ = sigint.recv() => {
            warn!("Received SIGINT, stopping...");
            None
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, stopping...");
            None
        }
        result = service.stopped() => result.err(),
    };

    let shutdown = service.shutdown().await;
    info!("Service stopped.");

    if let Some(e) = fatal {
        return Err(e.into());
    }
    shutdown?;
    Ok(())
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
