// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the dispatch engine

use hopper_adapters::MonitorError;
use std::path::PathBuf;
use thiserror::Error;

/// Resource gate failure. Always fatal: an unknown load is never treated as
/// spare capacity.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("resource gate: {0}")]
    Metrics(#[from] MonitorError),
}

/// Errors from one command intake pass
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("command queue closed")]
    QueueClosed,
}

/// Errors from handling one command file
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to read command file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Gate(#[from] GateError),
}

impl DispatchError {
    /// Whether the dispatcher loop must stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, DispatchError::Gate(_))
    }
}

/// Errors surfaced by the running service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("dispatcher failed: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("service task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
