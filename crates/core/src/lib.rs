// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hopper-core: domain types for the hopper job dispatcher

pub mod command;
pub mod id;

pub use command::{Command, ParseError, Verb};
pub use id::{GroupId, JobId, JobKey};
