// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admission control based on host load

use crate::error::GateError;
use hopper_adapters::ResourceMonitor;

/// Default CPU/memory threshold, in percent.
pub const DEFAULT_THRESHOLD: f32 = 90.0;

/// Answers whether it is safe to start new work right now
#[derive(Clone)]
pub struct ResourceGate<M> {
    monitor: M,
    threshold: f32,
}

impl<M: ResourceMonitor> ResourceGate<M> {
    pub fn new(monitor: M, threshold: f32) -> Self {
        Self { monitor, threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// True iff CPU and memory utilization are both strictly below the
    /// threshold. Takes at least the monitor's sample window.
    pub async fn is_available(&self) -> Result<bool, GateError> {
        let sample = self.monitor.sample().await?;
        tracing::info!(
            cpu = sample.cpu_percent,
            memory = sample.memory_percent,
            threshold = self.threshold,
            "sampled resources"
        );
        Ok(sample.cpu_percent < self.threshold && sample.memory_percent < self.threshold)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
