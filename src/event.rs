use crate::model::snapshot::StatusSnapshot;
use crate::model::state::VisualState;

/// Why a candle was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The leek is not in the Running state.
    NotRunning,
    /// The candle's open time does not advance past the last processed one.
    Stale,
}

/// What happened inside the engine during one `process_tick` call, in
/// order. The engine never logs; consumers render these however they like.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    Ignored {
        open_time: u64,
        reason: IgnoreReason,
    },
    /// First live candle recorded as the growth anchor; no height change.
    AnchorSet {
        close: f64,
    },
    Growth {
        delta: f64,
        height: f64,
    },
    WonByHeight {
        height: f64,
    },
    LostByHeight {
        height: f64,
    },
    Scythe {
        volume: f64,
        avg_volume: f64,
        body_pct: f64,
    },
    Fertilizer {
        volume: f64,
        avg_volume: f64,
        body_pct: f64,
    },
    Degradation {
        qualifying: bool,
        counter: u32,
    },
    VisualChanged {
        from: VisualState,
        to: VisualState,
    },
}

/// Events the per-symbol monitor task sends to the presentation side.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    Initialized(StatusSnapshot),
    InitFailed {
        symbol: String,
        error: String,
    },
    Tick {
        snapshot: StatusSnapshot,
        events: Vec<TickEvent>,
    },
    /// The candle fetch came back empty; the leek was left untouched.
    FetchFailed {
        symbol: String,
    },
    /// 24h ticker quote for the live price readout.
    Ticker {
        symbol: String,
        price: f64,
        change_pct: f64,
    },
    /// The run ended (victory, defeat, or abort); the task is done.
    Finished(StatusSnapshot),
}
