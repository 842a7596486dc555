/// One completed kline: OHLCV plus its interval bounds in epoch milliseconds.
#[derive(Debug, Clone)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub open_time: u64,
    pub close_time: u64,
}

impl Candle {
    /// Close-to-open change of the candle body, in percent.
    /// A zero open yields 0 rather than a division error.
    pub fn body_pct(&self) -> f64 {
        if self.open == 0.0 {
            return 0.0;
        }
        (self.close - self.open) / self.open * 100.0
    }

    /// High-to-low range relative to the low, in percent.
    /// A zero low yields 0 rather than a division error.
    pub fn range_pct(&self) -> f64 {
        if self.low == 0.0 {
            return 0.0;
        }
        (self.high - self.low) / self.low * 100.0
    }
}
