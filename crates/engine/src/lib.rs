// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hopper dispatch engine
//!
//! Command intake feeds file paths to the dispatcher, which parses each
//! command, consults the resource gate, and starts or stops jobs through
//! the job registry.

mod dispatcher;
mod error;
mod gate;
mod intake;
mod registry;
mod service;
mod shutdown;

#[cfg(test)]
mod test_helpers;

pub use dispatcher::{Dispatcher, DispatcherConfig, Handled, Outcome, DEFAULT_QUEUE_TIMEOUT};
pub use error::{DispatchError, GateError, IntakeError, ServiceError};
pub use gate::{ResourceGate, DEFAULT_THRESHOLD};
pub use intake::{CommandIntake, IntakeConfig, DEFAULT_POLL_INTERVAL};
pub use registry::{JobRegistry, StartOutcome, StopOutcome};
pub use service::{Service, ServiceConfig};
pub use shutdown::Shutdown;
