use serde::Deserialize;

use crate::model::candle::Candle;
use crate::model::state::Lifecycle;

/// Thresholds for the run-ending checks.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerParams {
    pub win_height: f64,
    pub lose_height: f64,
    pub scythe_volume_mult: f64,
    pub scythe_drop_pct: f64,
    pub fertilizer_volume_mult: f64,
    pub fertilizer_rise_pct: f64,
}

impl Default for TriggerParams {
    fn default() -> Self {
        Self {
            win_height: 6_000.0,
            lose_height: 10.0,
            scythe_volume_mult: 3.0,
            scythe_drop_pct: -3.0,
            fertilizer_volume_mult: 3.0,
            fertilizer_rise_pct: 3.0,
        }
    }
}

/// Which run-ending condition fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    WonHeight,
    LostHeight,
    LostScythe,
    WonFertilizer,
}

impl TriggerOutcome {
    pub fn lifecycle(self) -> Lifecycle {
        match self {
            TriggerOutcome::WonHeight => Lifecycle::WonHeight,
            TriggerOutcome::LostHeight => Lifecycle::LostHeight,
            TriggerOutcome::LostScythe => Lifecycle::LostScythe,
            TriggerOutcome::WonFertilizer => Lifecycle::WonFertilizer,
        }
    }
}

/// Run the ending checks for one tick, in fixed order: height win, height
/// lose, scythe, fertilizer. The first match wins and the rest are not
/// consulted. `short_avg_volume` must already include the current candle.
/// Volume conditions require a non-empty window (average > 0).
pub fn evaluate(
    height: f64,
    candle: &Candle,
    short_avg_volume: f64,
    params: &TriggerParams,
) -> Option<TriggerOutcome> {
    if height >= params.win_height {
        return Some(TriggerOutcome::WonHeight);
    }
    if height <= params.lose_height {
        return Some(TriggerOutcome::LostHeight);
    }

    let body_pct = candle.body_pct();
    let volume_spike = |mult: f64| short_avg_volume > 0.0 && candle.volume >= short_avg_volume * mult;

    if volume_spike(params.scythe_volume_mult) && body_pct <= params.scythe_drop_pct {
        return Some(TriggerOutcome::LostScythe);
    }
    if volume_spike(params.fertilizer_volume_mult) && body_pct >= params.fertilizer_rise_pct {
        return Some(TriggerOutcome::WonFertilizer);
    }
    None
}
