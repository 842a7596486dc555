use thiserror::Error;

use crate::model::state::Lifecycle;

/// Failures the leek engine itself can produce. Network and parse errors
/// stay in the source layer; the engine only fails on initialization.
#[derive(Error, Debug)]
pub enum LeekError {
    #[error("insufficient daily history: need {required} candles, got {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("computed baseline {value} is not positive")]
    InvalidBaseline { value: f64 },

    #[error("cannot initialize a leek in state '{state}'")]
    InvalidState { state: Lifecycle },
}
