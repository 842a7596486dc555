pub mod binance;

pub use binance::BinanceClient;

use crate::model::candle::Candle;

/// Latest 24h ticker quote.
#[derive(Debug, Clone)]
pub struct TickerQuote {
    pub price: f64,
    pub change_pct: f64,
}

/// Where candles come from. Implementations swallow transport failures:
/// a failed candle fetch is an empty vector and a failed quote is None,
/// so the monitor treats either as a skipped cycle rather than an error.
#[allow(async_fn_in_trait)]
pub trait CandleSource {
    /// Up to `limit` candles of `interval`, oldest first. `end_time`
    /// bounds the range by close time when set.
    async fn candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
        end_time: Option<u64>,
    ) -> Vec<Candle>;

    async fn ticker(&self, symbol: &str) -> Option<TickerQuote>;
}
