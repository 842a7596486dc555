pub mod candle;
pub mod snapshot;
pub mod state;

pub use candle::Candle;
pub use snapshot::StatusSnapshot;
pub use state::{Lifecycle, VisualState};
