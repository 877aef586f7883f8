// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn default_sample_is_idle() {
    let monitor = FakeMonitor::new();
    assert_eq!(monitor.sample().await.unwrap(), ResourceSample::new(10.0, 10.0));
    assert_eq!(monitor.calls(), 1);
}

#[tokio::test]
async fn set_sample_changes_reading() {
    let monitor = FakeMonitor::with_sample(95.0, 20.0);
    assert_eq!(monitor.sample().await.unwrap().cpu_percent, 95.0);
}

#[tokio::test]
async fn unavailable_returns_error_and_counts_call() {
    let monitor = FakeMonitor::new();
    monitor.set_unavailable("gone");
    let err = monitor.sample().await.unwrap_err();
    assert!(err.to_string().contains("gone"));
    assert_eq!(monitor.calls(), 1);
}

#[tokio::test]
async fn delay_holds_sample_but_counts_call_immediately() {
    let monitor = FakeMonitor::new();
    monitor.set_delay(std::time::Duration::from_millis(200));

    let pending = tokio::spawn({
        let monitor = monitor.clone();
        async move { monitor.sample().await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(monitor.calls(), 1);
    assert!(!pending.is_finished());

    assert!(pending.await.unwrap().is_ok());
}
