use crate::model::state::{Lifecycle, VisualState};

/// Point-in-time view of a leek, produced on initialization and after
/// every processed tick. Plain data; safe to ship across channels.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub symbol: String,
    pub lifecycle: Lifecycle,
    pub visual: VisualState,
    pub height: f64,
    pub baseline: f64,
    pub previous_close: Option<f64>,
    pub last_open_time: Option<u64>,
    pub degradation_count: u32,
}
