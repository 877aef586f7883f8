// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log file rotation and tracing subscriber setup

use std::path::{Path, PathBuf};

use crate::lifecycle::LifecycleError;

/// Rotate the log at startup once it grows past this size (10 MiB).
pub const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Number of rotated files kept (`<log>.1` .. `<log>.3`).
const MAX_ROTATIONS: u32 = 3;

fn rotated_path(log_path: &Path, n: u32) -> PathBuf {
    let mut name = log_path.as_os_str().to_owned();
    name.push(format!(".{}", n));
    PathBuf::from(name)
}

/// Shift `<log>` to `<log>.1` (and older rotations up by one) when it
/// exceeds [`MAX_LOG_SIZE`]. Best effort: failures are ignored.
pub fn rotate_log_if_needed(log_path: &Path) {
    let Ok(meta) = std::fs::metadata(log_path) else {
        return;
    };
    if meta.len() <= MAX_LOG_SIZE {
        return;
    }

    let _ = std::fs::remove_file(rotated_path(log_path, MAX_ROTATIONS));
    for n in (1..MAX_ROTATIONS).rev() {
        let from = rotated_path(log_path, n);
        if from.exists() {
            let _ = std::fs::rename(&from, rotated_path(log_path, n + 1));
        }
    }
    let _ = std::fs::rename(log_path, rotated_path(log_path, 1));
}

/// Install the global subscriber: one layer appending to the log file, one
/// writing to stderr. Filter from `RUST_LOG`, default `info`.
pub fn setup_logging(
    log_path: &Path,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let file_name = log_path
        .file_name()
        .ok_or_else(|| LifecycleError::InvalidLogPath(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
