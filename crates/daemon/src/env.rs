// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

fn parse_var<T: FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|s| s.trim().parse::<T>().ok())
}

fn parse_duration_ms(var: &str) -> Option<Duration> {
    parse_var::<u64>(var).map(Duration::from_millis)
}

fn parse_flag(var: &str) -> Option<bool> {
    match std::env::var(var).ok()?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Watched directory (default: `files_to_process`)
pub fn watch_dir() -> PathBuf {
    std::env::var("HOPPER_WATCH_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("files_to_process"))
}

/// Log file (default: `local_service.log`)
pub fn log_path() -> PathBuf {
    std::env::var("HOPPER_LOG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("local_service.log"))
}

/// Worker executable (default: `python3.12`)
pub fn worker_program() -> String {
    std::env::var("HOPPER_WORKER_PROGRAM").unwrap_or_else(|_| "python3.12".to_string())
}

/// Leading worker arguments, whitespace-separated (default: `hello_world.py`).
/// Set to an empty string for none.
pub fn worker_args() -> Vec<String> {
    match std::env::var("HOPPER_WORKER_ARGS") {
        Ok(args) => args.split_whitespace().map(str::to_string).collect(),
        Err(_) => vec!["hello_world.py".to_string()],
    }
}

/// Per-unit worker timeout (default: none)
pub fn worker_timeout() -> Option<Duration> {
    parse_var::<u64>("HOPPER_WORKER_TIMEOUT_SECS")
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

/// Concurrent worker slots (default: 4, minimum 1)
pub fn pool_size() -> usize {
    parse_var::<usize>("HOPPER_POOL_SIZE")
        .unwrap_or(hopper_adapters::pool::DEFAULT_POOL_SIZE)
        .max(1)
}

/// CPU/memory threshold in percent (default: 90)
pub fn threshold() -> f32 {
    parse_var::<f32>("HOPPER_THRESHOLD")
        .filter(|t| t.is_finite())
        .unwrap_or(hopper_engine::DEFAULT_THRESHOLD)
}

/// Intake polling cadence (default: 1000ms)
pub fn poll_interval() -> Duration {
    parse_duration_ms("HOPPER_POLL_MS").unwrap_or(hopper_engine::DEFAULT_POLL_INTERVAL)
}

/// Dispatcher queue pop timeout (default: 1000ms)
pub fn queue_timeout() -> Duration {
    parse_duration_ms("HOPPER_QUEUE_TIMEOUT_MS").unwrap_or(hopper_engine::DEFAULT_QUEUE_TIMEOUT)
}

/// Resource sample window (default: 1000ms)
pub fn sample_window() -> Duration {
    parse_duration_ms("HOPPER_SAMPLE_MS").unwrap_or(Duration::from_secs(1))
}

/// Wake intake on filesystem events (default: on)
pub fn fs_events() -> bool {
    parse_flag("HOPPER_FS_EVENTS").unwrap_or(true)
}

/// Reap finished jobs from the registry (default: off)
pub fn reclaim_finished() -> bool {
    parse_flag("HOPPER_RECLAIM_FINISHED").unwrap_or(false)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
