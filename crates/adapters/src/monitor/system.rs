// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sysinfo-backed resource monitor

use super::{MonitorError, ResourceMonitor, ResourceSample};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::System;

/// Default CPU measurement window.
pub const DEFAULT_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// CPU usage needs two refreshes at least this far apart to be meaningful.
const MIN_SAMPLE_WINDOW: Duration = Duration::from_millis(200);

/// Samples CPU and memory utilization of the host
#[derive(Clone)]
pub struct SystemMonitor {
    system: Arc<Mutex<System>>,
    window: Duration,
}

impl SystemMonitor {
    pub fn new(window: Duration) -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        system.refresh_memory();

        Self {
            system: Arc::new(Mutex::new(system)),
            window: window.max(MIN_SAMPLE_WINDOW),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn sample_blocking(system: &Mutex<System>, window: Duration) -> Result<ResourceSample, MonitorError> {
        let mut system = system.lock();

        system.refresh_cpu();
        std::thread::sleep(window);
        system.refresh_cpu();
        system.refresh_memory();

        // Average usage across all cores
        let cpus = system.cpus();
        if cpus.is_empty() {
            return Err(MonitorError::Unavailable("no CPUs reported".to_string()));
        }
        let cpu_percent = cpus.iter().map(|cpu| cpu.cpu_usage()).sum::<f32>() / cpus.len() as f32;

        let total_memory = system.total_memory();
        if total_memory == 0 {
            return Err(MonitorError::Unavailable(
                "total memory reported as zero".to_string(),
            ));
        }
        let memory_percent = (system.used_memory() as f64 / total_memory as f64 * 100.0) as f32;

        Ok(ResourceSample::new(cpu_percent, memory_percent))
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_WINDOW)
    }
}

#[async_trait]
impl ResourceMonitor for SystemMonitor {
    async fn sample(&self) -> Result<ResourceSample, MonitorError> {
        let system = Arc::clone(&self.system);
        let window = self.window;
        tokio::task::spawn_blocking(move || Self::sample_blocking(&system, window))
            .await
            .map_err(|e| MonitorError::Unavailable(format!("sampling task failed: {}", e)))?
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
