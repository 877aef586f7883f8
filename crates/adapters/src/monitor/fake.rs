// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake resource monitor for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MonitorError, ResourceMonitor, ResourceSample};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

struct FakeMonitorState {
    next: Result<ResourceSample, MonitorError>,
    delay: Option<Duration>,
    calls: usize,
}

/// Fake monitor returning a configurable sample
#[derive(Clone)]
pub struct FakeMonitor {
    inner: Arc<Mutex<FakeMonitorState>>,
}

impl Default for FakeMonitor {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeMonitorState {
                next: Ok(ResourceSample::new(10.0, 10.0)),
                delay: None,
                calls: 0,
            })),
        }
    }
}

impl FakeMonitor {
    /// Monitor reporting an idle host (10% CPU, 10% memory)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample(cpu_percent: f32, memory_percent: f32) -> Self {
        let monitor = Self::default();
        monitor.set_sample(cpu_percent, memory_percent);
        monitor
    }

    pub fn set_sample(&self, cpu_percent: f32, memory_percent: f32) {
        self.inner.lock().next = Ok(ResourceSample::new(cpu_percent, memory_percent));
    }

    /// Make subsequent samples fail
    pub fn set_unavailable(&self, reason: &str) {
        self.inner.lock().next = Err(MonitorError::Unavailable(reason.to_string()));
    }

    /// Hold each sample for `delay` before answering
    pub fn set_delay(&self, delay: Duration) {
        self.inner.lock().delay = Some(delay);
    }

    /// Number of samples started
    pub fn calls(&self) -> usize {
        self.inner.lock().calls
    }
}

#[async_trait]
impl ResourceMonitor for FakeMonitor {
    async fn sample(&self) -> Result<ResourceSample, MonitorError> {
        let (next, delay) = {
            let mut inner = self.inner.lock();
            inner.calls += 1;
            (inner.next.clone(), inner.delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        next
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
