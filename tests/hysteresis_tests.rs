use leekling::engine::hysteresis::{DegradationHysteresis, DegradationParams};
use leekling::model::state::VisualState;

fn machine(on: u32, off: u32, cap: u32) -> DegradationHysteresis {
    DegradationHysteresis::new(&DegradationParams {
        on_threshold: on,
        off_threshold: off,
        counter_cap: cap,
        ..DegradationParams::default()
    })
}

#[test]
fn degrades_at_on_threshold_and_not_before() {
    let mut m = machine(5, 1, 30);
    for i in 1..=4 {
        assert_eq!(m.observe(true), VisualState::Healthy, "tick {}", i);
    }
    assert_eq!(m.observe(true), VisualState::Degraded);
}

#[test]
fn recovery_is_slower_than_onset() {
    let mut m = machine(5, 1, 30);
    for _ in 0..5 {
        m.observe(true);
    }
    assert_eq!(m.state(), VisualState::Degraded);

    // Four good ticks bring the counter to 1: still degraded.
    for _ in 0..4 {
        assert_eq!(m.observe(false), VisualState::Degraded);
    }
    assert_eq!(m.counter(), 1);
    // The fifth reaches 0 and recovers.
    assert_eq!(m.observe(false), VisualState::Healthy);
}

#[test]
fn alternating_ticks_never_reach_the_threshold() {
    let mut m = machine(5, 1, 30);
    for _ in 0..50 {
        m.observe(true);
        m.observe(false);
        assert_eq!(m.state(), VisualState::Healthy);
        assert!(m.counter() <= 1);
    }
}

#[test]
fn cap_limits_how_deep_degradation_gets() {
    let mut m = machine(5, 1, 8);
    for _ in 0..100 {
        m.observe(true);
    }
    assert_eq!(m.counter(), 8);
    // Worst case recovery from the cap is exactly cap ticks.
    let mut ticks = 0;
    while m.state() == VisualState::Degraded {
        m.observe(false);
        ticks += 1;
    }
    assert_eq!(ticks, 8);
}

#[test]
fn equal_thresholds_remove_the_band() {
    let mut m = machine(3, 3, 10);
    m.observe(true);
    m.observe(true);
    assert_eq!(m.observe(true), VisualState::Degraded);
    // One good tick drops below the shared threshold and recovers.
    assert_eq!(m.observe(false), VisualState::Healthy);
}
