// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource metrics sources

mod system;

pub use system::SystemMonitor;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeMonitor;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from sampling system metrics
#[derive(Debug, Clone, Error)]
pub enum MonitorError {
    #[error("resource metrics unavailable: {0}")]
    Unavailable(String),
}

/// One point-in-time reading of system load, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

impl ResourceSample {
    pub fn new(cpu_percent: f32, memory_percent: f32) -> Self {
        Self {
            cpu_percent,
            memory_percent,
        }
    }
}

/// Source of CPU and memory utilization
#[async_trait]
pub trait ResourceMonitor: Clone + Send + Sync + 'static {
    /// Take a sample. May block for the implementation's measurement window.
    async fn sample(&self) -> Result<ResourceSample, MonitorError>;
}
