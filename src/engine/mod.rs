pub mod hysteresis;
pub mod leek;
pub mod triggers;
pub mod window;

pub use hysteresis::{DegradationHysteresis, DegradationParams};
pub use leek::{Leek, LeekParams, TickReport};
pub use triggers::{TriggerOutcome, TriggerParams};
pub use window::VolumeWindow;
