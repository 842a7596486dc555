//! Leekling grows one leek per market symbol. Candle closes raise or
//! shrink its height, volume spikes harvest it (fertilizer) or cut it
//! down (scythe), and dull stretches wilt it. The engine in [`engine`]
//! is pure state; [`source`] talks to the exchange and [`monitor`] wires
//! the two together over channels.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod model;
pub mod monitor;
pub mod source;
