// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::Command;

/// Run a subprocess to completion, optionally bounded by a timeout.
///
/// A non-zero exit is returned as a status, not an error. With a timeout,
/// expiration becomes a descriptive error message and the child is killed
/// (via `kill_on_drop`).
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Option<Duration>,
    description: &str,
) -> Result<ExitStatus, String> {
    cmd.kill_on_drop(true);
    let Some(timeout) = timeout else {
        return cmd
            .status()
            .await
            .map_err(|io_err| format!("{} failed: {}", description, io_err));
    };

    match tokio::time::timeout(timeout, cmd.status()).await {
        Ok(Ok(status)) => Ok(status),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(format!(
            "{} timed out after {}ms",
            description,
            timeout.as_millis()
        )),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
