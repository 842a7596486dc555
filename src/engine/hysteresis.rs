use serde::Deserialize;

use crate::model::candle::Candle;
use crate::model::state::VisualState;

/// Tuning for the degradation (wilting) machinery. `volume_ratio` and
/// `volatility_pct` gate what counts as a dull tick against the long
/// window; the thresholds drive the counter-based visual transitions.
#[derive(Debug, Clone, Deserialize)]
pub struct DegradationParams {
    pub volume_ratio: f64,
    pub volatility_pct: f64,
    pub on_threshold: u32,
    pub off_threshold: u32,
    pub counter_cap: u32,
}

impl Default for DegradationParams {
    fn default() -> Self {
        Self {
            volume_ratio: 0.2,
            volatility_pct: 0.5,
            on_threshold: 5,
            off_threshold: 1,
            counter_cap: 30,
        }
    }
}

/// A tick qualifies as degrading when volume is thin relative to the long
/// window average and the candle barely moved. An empty window (average 0)
/// never qualifies.
pub fn degradation_qualifying(
    candle: &Candle,
    long_avg_volume: f64,
    params: &DegradationParams,
) -> bool {
    let by_volume = long_avg_volume > 0.0 && candle.volume <= long_avg_volume * params.volume_ratio;
    let by_volatility = candle.range_pct() <= params.volatility_pct;
    by_volume && by_volatility
}

/// Counter with separate enter/exit thresholds. The counter rises on
/// qualifying ticks (saturating at the cap) and falls otherwise (floored
/// at zero). The visual state flips to Degraded at `on_threshold` and back
/// to Healthy below `off_threshold`; in the band between, it holds. With
/// the default off=1, a degraded leek recovers only once the counter
/// drains all the way to zero.
#[derive(Debug, Clone)]
pub struct DegradationHysteresis {
    counter: u32,
    on_threshold: u32,
    off_threshold: u32,
    cap: u32,
    state: VisualState,
}

impl DegradationHysteresis {
    pub fn new(params: &DegradationParams) -> Self {
        assert!(
            params.off_threshold <= params.on_threshold && params.on_threshold <= params.counter_cap,
            "degradation thresholds must satisfy off <= on <= cap"
        );
        Self {
            counter: 0,
            on_threshold: params.on_threshold,
            off_threshold: params.off_threshold,
            cap: params.counter_cap,
            state: VisualState::Healthy,
        }
    }

    /// Feed one tick's qualifying flag; returns the visual state after
    /// the counter moves.
    pub fn observe(&mut self, qualifying: bool) -> VisualState {
        if qualifying {
            self.counter = (self.counter + 1).min(self.cap);
        } else {
            self.counter = self.counter.saturating_sub(1);
        }

        if self.counter >= self.on_threshold {
            self.state = VisualState::Degraded;
        } else if self.counter < self.off_threshold {
            self.state = VisualState::Healthy;
        }
        self.state
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn state(&self) -> VisualState {
        self.state
    }
}
