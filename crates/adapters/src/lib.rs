// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: resource metrics and worker execution

pub mod monitor;
pub mod pool;
pub mod subprocess;

pub use monitor::{MonitorError, ResourceMonitor, ResourceSample, SystemMonitor};
pub use pool::{JobHandle, PoolError, ProcessHandle, ProcessPool, WorkerCommand, WorkerPool};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use monitor::FakeMonitor;
#[cfg(any(test, feature = "test-support"))]
pub use pool::{FakeHandle, FakePool, Submission};
