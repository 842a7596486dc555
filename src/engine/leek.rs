use serde::Deserialize;

use crate::engine::hysteresis::{degradation_qualifying, DegradationHysteresis, DegradationParams};
use crate::engine::triggers::{self, TriggerOutcome, TriggerParams};
use crate::engine::window::VolumeWindow;
use crate::error::LeekError;
use crate::event::{IgnoreReason, TickEvent};
use crate::model::candle::Candle;
use crate::model::snapshot::StatusSnapshot;
use crate::model::state::Lifecycle;

/// Baseline height derivation: average close of `days` daily candles,
/// scaled by `coefficient`.
#[derive(Debug, Clone, Deserialize)]
pub struct BaselineParams {
    pub days: usize,
    pub coefficient: f64,
}

impl Default for BaselineParams {
    fn default() -> Self {
        Self {
            days: 20,
            coefficient: 0.1,
        }
    }
}

/// Close-to-close growth: `sensitivity` scales the price change ratio into
/// a height delta, clamped to `[delta_min, delta_max]`.
#[derive(Debug, Clone, Deserialize)]
pub struct GrowthParams {
    pub sensitivity: f64,
    pub delta_min: f64,
    pub delta_max: f64,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            sensitivity: 2_000.0,
            delta_min: -100.0,
            delta_max: 200.0,
        }
    }
}

/// Capacities (in ticks) of the two volume windows. At the default 5m
/// interval, 36 ticks span 3 hours and 288 span a day.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowParams {
    pub short_ticks: usize,
    pub long_ticks: usize,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            short_ticks: 36,
            long_ticks: 288,
        }
    }
}

/// Complete tuning for one leek. The defaults are the stock game balance;
/// configuration can replace any section wholesale and per-symbol
/// overrides adjust coefficient and sensitivity on top.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeekParams {
    pub baseline: BaselineParams,
    pub growth: GrowthParams,
    pub windows: WindowParams,
    pub triggers: TriggerParams,
    pub degradation: DegradationParams,
}

/// What one `process_tick` call did: the snapshot after the tick and the
/// ordered events that led to it.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub snapshot: StatusSnapshot,
    pub events: Vec<TickEvent>,
}

impl TickReport {
    /// False when the candle was ignored (stale or not running) and the
    /// leek did not change.
    pub fn accepted(&self) -> bool {
        !self
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::Ignored { .. }))
    }
}

/// One symbol's leek. Owns every piece of run state; callers serialize
/// updates through `&mut self`. The engine performs no I/O and emits no
/// logs, only events.
#[derive(Debug, Clone)]
pub struct Leek {
    symbol: String,
    params: LeekParams,
    lifecycle: Lifecycle,
    baseline: f64,
    height: f64,
    previous_close: Option<f64>,
    last_open_time: Option<u64>,
    short_window: VolumeWindow,
    long_window: VolumeWindow,
    hysteresis: DegradationHysteresis,
}

impl Leek {
    pub fn new(symbol: impl Into<String>, params: LeekParams) -> Self {
        let short_window = VolumeWindow::new(params.windows.short_ticks);
        let long_window = VolumeWindow::new(params.windows.long_ticks);
        let hysteresis = DegradationHysteresis::new(&params.degradation);
        Self {
            symbol: symbol.into(),
            params,
            lifecycle: Lifecycle::Initializing,
            baseline: 0.0,
            height: 0.0,
            previous_close: None,
            last_open_time: None,
            short_window,
            long_window,
            hysteresis,
        }
    }

    /// How many seed candles `initialize` can use: enough to fill the
    /// larger window plus the anchor.
    pub fn seed_capacity(&self) -> usize {
        self.params.windows.short_ticks.max(self.params.windows.long_ticks) + 1
    }

    /// How many daily candles the baseline needs. One extra covers the
    /// still-forming candle of the current day, which the average skips.
    pub fn baseline_capacity(&self) -> usize {
        self.params.baseline.days + 1
    }

    /// Derive the baseline from daily history and prime the windows from
    /// seed candles, then start running.
    ///
    /// `daily` is oldest-to-newest; the average uses the `days` oldest
    /// entries so a trailing unfinished candle is ignored. The newest seed
    /// candle becomes the growth anchor (previous close and stale cutoff)
    /// without entering the windows; every seed before it is window
    /// history. Valid from Initializing, and again from Error after a
    /// failed attempt. A finished leek cannot be replanted.
    pub fn initialize(&mut self, daily: &[Candle], seed: &[Candle]) -> Result<StatusSnapshot, LeekError> {
        if !matches!(self.lifecycle, Lifecycle::Initializing | Lifecycle::Error) {
            return Err(LeekError::InvalidState {
                state: self.lifecycle,
            });
        }

        let days = self.params.baseline.days;
        if daily.len() < days {
            self.lifecycle = Lifecycle::Error;
            return Err(LeekError::InsufficientHistory {
                required: days,
                available: daily.len(),
            });
        }
        let avg_close = daily[..days].iter().map(|c| c.close).sum::<f64>() / days as f64;
        let baseline = avg_close * self.params.baseline.coefficient;
        if !(baseline > 0.0) {
            self.lifecycle = Lifecycle::Error;
            self.baseline = 0.0;
            return Err(LeekError::InvalidBaseline { value: baseline });
        }

        // A retry after Error starts from scratch.
        self.short_window = VolumeWindow::new(self.params.windows.short_ticks);
        self.long_window = VolumeWindow::new(self.params.windows.long_ticks);
        self.hysteresis = DegradationHysteresis::new(&self.params.degradation);
        self.previous_close = None;
        self.last_open_time = None;

        self.baseline = baseline;
        self.height = baseline;

        if let Some((anchor, history)) = seed.split_last() {
            for candle in history {
                self.short_window.push(candle.volume);
                self.long_window.push(candle.volume);
            }
            self.previous_close = Some(anchor.close);
            self.last_open_time = Some(anchor.open_time);
        }

        self.lifecycle = Lifecycle::Running;
        Ok(self.snapshot())
    }

    /// Advance the leek by one candle.
    ///
    /// Ticks are ignored outside Running and when `open_time` does not
    /// move forward; ignored ticks change nothing. An accepted tick grows
    /// (or shrinks) the height, joins both windows, then runs the ending
    /// checks and, if the leek survives, the degradation counter.
    pub fn process_tick(&mut self, candle: &Candle) -> TickReport {
        let mut events = Vec::new();

        if self.lifecycle != Lifecycle::Running {
            events.push(TickEvent::Ignored {
                open_time: candle.open_time,
                reason: IgnoreReason::NotRunning,
            });
            return self.report(events);
        }
        if let Some(last) = self.last_open_time {
            if candle.open_time <= last {
                events.push(TickEvent::Ignored {
                    open_time: candle.open_time,
                    reason: IgnoreReason::Stale,
                });
                return self.report(events);
            }
        }

        match self.previous_close {
            None => {
                // First live candle with no seed anchor: record it and
                // let it flow into the windows with zero growth.
                events.push(TickEvent::AnchorSet {
                    close: candle.close,
                });
            }
            Some(prev) => {
                let delta = if prev == 0.0 {
                    0.0
                } else {
                    let ratio = (candle.close - prev) / prev;
                    (ratio * self.params.growth.sensitivity)
                        .clamp(self.params.growth.delta_min, self.params.growth.delta_max)
                };
                self.height = (self.height + delta).max(0.0);
                events.push(TickEvent::Growth {
                    delta,
                    height: self.height,
                });
            }
        }
        self.previous_close = Some(candle.close);
        self.last_open_time = Some(candle.open_time);

        let short_avg = self.short_window.push(candle.volume);
        let long_avg = self.long_window.push(candle.volume);

        if let Some(outcome) = triggers::evaluate(self.height, candle, short_avg, &self.params.triggers)
        {
            self.lifecycle = outcome.lifecycle();
            events.push(self.trigger_event(outcome, candle, short_avg));
            return self.report(events);
        }

        let qualifying = degradation_qualifying(candle, long_avg, &self.params.degradation);
        let before = self.hysteresis.state();
        let after = self.hysteresis.observe(qualifying);
        events.push(TickEvent::Degradation {
            qualifying,
            counter: self.hysteresis.counter(),
        });
        if after != before {
            events.push(TickEvent::VisualChanged {
                from: before,
                to: after,
            });
        }
        self.report(events)
    }

    /// Caller gives up on a running leek. Already-finished runs keep
    /// their outcome.
    pub fn abort(&mut self) -> StatusSnapshot {
        if self.lifecycle == Lifecycle::Running {
            self.lifecycle = Lifecycle::Aborted;
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            symbol: self.symbol.clone(),
            lifecycle: self.lifecycle,
            visual: self.hysteresis.state(),
            height: self.height,
            baseline: self.baseline,
            previous_close: self.previous_close,
            last_open_time: self.last_open_time,
            degradation_count: self.hysteresis.counter(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    fn report(&self, events: Vec<TickEvent>) -> TickReport {
        TickReport {
            snapshot: self.snapshot(),
            events,
        }
    }

    fn trigger_event(&self, outcome: TriggerOutcome, candle: &Candle, short_avg: f64) -> TickEvent {
        match outcome {
            TriggerOutcome::WonHeight => TickEvent::WonByHeight {
                height: self.height,
            },
            TriggerOutcome::LostHeight => TickEvent::LostByHeight {
                height: self.height,
            },
            TriggerOutcome::LostScythe => TickEvent::Scythe {
                volume: candle.volume,
                avg_volume: short_avg,
                body_pct: candle.body_pct(),
            },
            TriggerOutcome::WonFertilizer => TickEvent::Fertilizer {
                volume: candle.volume,
                avg_volume: short_avg,
                body_pct: candle.body_pct(),
            },
        }
    }
}
