// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hopper_adapters::FakeMonitor;

#[yare::parameterized(
    idle          = { 10.0, 10.0, true },
    just_below    = { 89.9, 89.9, true },
    cpu_at_limit  = { 90.0, 10.0, false },
    mem_at_limit  = { 10.0, 90.0, false },
    cpu_high      = { 95.0, 10.0, false },
    mem_high      = { 10.0, 95.0, false },
    both_high     = { 99.0, 99.0, false },
)]
fn availability_against_default_threshold(cpu: f32, memory: f32, expected: bool) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let gate = ResourceGate::new(FakeMonitor::with_sample(cpu, memory), DEFAULT_THRESHOLD);
    assert_eq!(rt.block_on(gate.is_available()).unwrap(), expected);
}

#[tokio::test]
async fn custom_threshold_applies() {
    let gate = ResourceGate::new(FakeMonitor::with_sample(60.0, 10.0), 50.0);
    assert!(!gate.is_available().await.unwrap());
    assert_eq!(gate.threshold(), 50.0);
}

#[tokio::test]
async fn each_check_takes_a_fresh_sample() {
    let monitor = FakeMonitor::new();
    let gate = ResourceGate::new(monitor.clone(), DEFAULT_THRESHOLD);
    assert!(gate.is_available().await.unwrap());
    monitor.set_sample(95.0, 10.0);
    assert!(!gate.is_available().await.unwrap());
    assert_eq!(monitor.calls(), 2);
}

#[tokio::test]
async fn unavailable_metrics_are_an_error_not_availability() {
    let monitor = FakeMonitor::new();
    monitor.set_unavailable("no cpus");
    let gate = ResourceGate::new(monitor, DEFAULT_THRESHOLD);
    assert!(matches!(gate.is_available().await, Err(GateError::Metrics(_))));
}
