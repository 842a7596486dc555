use leekling::engine::triggers::{evaluate, TriggerOutcome, TriggerParams};
use leekling::model::candle::Candle;
use leekling::model::state::Lifecycle;

fn candle(open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
    Candle {
        open,
        high,
        low,
        close,
        volume,
        open_time: 0,
        close_time: 300_000,
    }
}

#[test]
fn ordering_is_win_lose_scythe_fertilizer() {
    let params = TriggerParams {
        win_height: 100.0,
        lose_height: 10.0,
        ..TriggerParams::default()
    };
    let crash = candle(100.0, 100.0, 95.0, 96.0, 31.0);

    // Satisfies scythe, but the height win is checked first.
    assert_eq!(
        evaluate(100.0, &crash, 10.0, &params),
        Some(TriggerOutcome::WonHeight)
    );
    // Satisfies scythe, but the height loss is checked first.
    assert_eq!(
        evaluate(10.0, &crash, 10.0, &params),
        Some(TriggerOutcome::LostHeight)
    );
    // In between, the scythe finally gets its turn.
    assert_eq!(
        evaluate(50.0, &crash, 10.0, &params),
        Some(TriggerOutcome::LostScythe)
    );
}

#[test]
fn scythe_example_from_the_rulebook() {
    // Average short volume 10, multiplier 3.0: volume 31 qualifies, and a
    // -4% body is below the -3% drop threshold.
    let params = TriggerParams::default();
    let c = candle(100.0, 100.0, 95.5, 96.0, 31.0);
    assert!((c.body_pct() + 4.0).abs() < f64::EPSILON);
    assert_eq!(
        evaluate(500.0, &c, 10.0, &params),
        Some(TriggerOutcome::LostScythe)
    );
}

#[test]
fn fertilizer_needs_spike_and_rise() {
    let params = TriggerParams::default();
    let pump = candle(100.0, 104.5, 100.0, 104.0, 31.0);
    assert_eq!(
        evaluate(500.0, &pump, 10.0, &params),
        Some(TriggerOutcome::WonFertilizer)
    );

    let no_spike = candle(100.0, 104.5, 100.0, 104.0, 29.9);
    assert_eq!(evaluate(500.0, &no_spike, 10.0, &params), None);

    let no_rise = candle(100.0, 103.0, 100.0, 102.9, 31.0);
    assert_eq!(evaluate(500.0, &no_rise, 10.0, &params), None);
}

#[test]
fn empty_window_gates_volume_triggers_off() {
    let params = TriggerParams::default();
    let crash = candle(100.0, 100.0, 90.0, 90.0, 1_000.0);
    assert_eq!(evaluate(500.0, &crash, 0.0, &params), None);
}

#[test]
fn exact_height_thresholds_count() {
    let params = TriggerParams::default();
    let quiet = candle(100.0, 100.0, 100.0, 100.0, 1.0);
    assert_eq!(
        evaluate(6_000.0, &quiet, 10.0, &params),
        Some(TriggerOutcome::WonHeight)
    );
    assert_eq!(
        evaluate(10.0, &quiet, 10.0, &params),
        Some(TriggerOutcome::LostHeight)
    );
    assert_eq!(evaluate(10.01, &quiet, 10.0, &params), None);
}

#[test]
fn outcomes_map_to_their_lifecycle_states() {
    assert_eq!(TriggerOutcome::WonHeight.lifecycle(), Lifecycle::WonHeight);
    assert_eq!(TriggerOutcome::LostHeight.lifecycle(), Lifecycle::LostHeight);
    assert_eq!(TriggerOutcome::LostScythe.lifecycle(), Lifecycle::LostScythe);
    assert_eq!(
        TriggerOutcome::WonFertilizer.lifecycle(),
        Lifecycle::WonFertilizer
    );
}
