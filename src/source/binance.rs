use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::model::candle::Candle;

use super::{CandleSource, TickerQuote};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const RETRY_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(300);

/// Deserialize Binance string-encoded numbers to f64.
fn string_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<f64>().map_err(serde::de::Error::custom)
}

/// Subset of GET /api/v3/ticker/24hr this crate consumes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    #[serde(default, deserialize_with = "string_to_f64")]
    pub last_price: f64,
    #[serde(default, deserialize_with = "string_to_f64")]
    pub price_change_percent: f64,
}

/// Client for the public Binance market-data endpoints. No keys, no
/// signing; only klines and the 24h ticker.
pub struct BinanceClient {
    http: reqwest::Client,
    base_url: String,
}

impl BinanceClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET with bounded retry: transport errors and 5xx responses are
    /// retried with doubling delay; 4xx fails immediately.
    async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response> {
        let mut delay = RETRY_BASE_DELAY;
        for attempt in 1..=RETRY_ATTEMPTS {
            match self.http.get(url).send().await {
                Ok(resp) if resp.status().is_server_error() && attempt < RETRY_ATTEMPTS => {
                    tracing::warn!(status = %resp.status(), attempt, "server error, retrying");
                }
                Ok(resp) => {
                    return resp
                        .error_for_status()
                        .context("request returned error status")
                }
                Err(e) if attempt < RETRY_ATTEMPTS => {
                    tracing::warn!(error = %e, attempt, "request failed, retrying");
                }
                Err(e) => return Err(e).context("request failed"),
            }
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
        unreachable!("retry loop returns on the final attempt")
    }

    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
        end_time: Option<u64>,
    ) -> Result<Vec<Candle>> {
        let mut url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url, symbol, interval, limit
        );
        if let Some(end) = end_time {
            url.push_str(&format!("&endTime={}", end));
        }

        let rows: Vec<Value> = self
            .get_with_retry(&url)
            .await?
            .json()
            .await
            .context("klines JSON parse failed")?;

        let mut candles = Vec::with_capacity(rows.len());
        for row in &rows {
            match parse_kline_row(row) {
                Some(candle) => candles.push(candle),
                None => {
                    tracing::debug!(symbol, "skipping malformed kline row");
                }
            }
        }
        candles.sort_by_key(|c| c.open_time);
        Ok(candles)
    }

    pub async fn ticker_24h(&self, symbol: &str) -> Result<Ticker24h> {
        let url = format!("{}/api/v3/ticker/24hr?symbol={}", self.base_url, symbol);
        let ticker: Ticker24h = self
            .get_with_retry(&url)
            .await?
            .json()
            .await
            .context("ticker JSON parse failed")?;
        Ok(ticker)
    }
}

impl CandleSource for BinanceClient {
    async fn candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
        end_time: Option<u64>,
    ) -> Vec<Candle> {
        match self.get_klines(symbol, interval, limit, end_time).await {
            Ok(candles) => candles,
            Err(e) => {
                tracing::warn!(symbol, interval, error = %e, "kline fetch failed");
                Vec::new()
            }
        }
    }

    async fn ticker(&self, symbol: &str) -> Option<TickerQuote> {
        match self.ticker_24h(symbol).await {
            Ok(t) => Some(TickerQuote {
                price: t.last_price,
                change_pct: t.price_change_percent,
            }),
            Err(e) => {
                tracing::warn!(symbol, error = %e, "ticker fetch failed");
                None
            }
        }
    }
}

/// One /api/v3/klines row is a heterogeneous array:
/// [open_time, open, high, low, close, volume, close_time, ...]
/// with prices and volume string-encoded.
fn parse_kline_row(row: &Value) -> Option<Candle> {
    let fields = row.as_array()?;
    Some(Candle {
        open_time: fields.first()?.as_u64()?,
        open: field_f64(fields, 1)?,
        high: field_f64(fields, 2)?,
        low: field_f64(fields, 3)?,
        close: field_f64(fields, 4)?,
        volume: field_f64(fields, 5)?,
        close_time: fields.get(6)?.as_u64()?,
    })
}

fn field_f64(fields: &[Value], idx: usize) -> Option<f64> {
    match fields.get(idx)? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
