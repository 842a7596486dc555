use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::engine::leek::LeekParams;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub binance: BinanceConfig,
    pub game: LeekParams,
    #[serde(default)]
    pub overrides: HashMap<String, SymbolOverride>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BinanceConfig {
    pub rest_base_url: String,
    /// Interval of the live candles driving growth, e.g. "5m".
    pub kline_interval: String,
    /// Interval of the baseline history, normally "1d".
    pub baseline_interval: String,
    pub poll_secs: u64,
    pub ticker_secs: u64,
    pub symbols: Vec<String>,
}

/// Per-symbol tuning layered over `[game]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymbolOverride {
    pub coefficient: Option<f64>,
    pub sensitivity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Parse a kline interval string (e.g. "1s", "5m", "1h", "1d", "1w", "1M")
/// into milliseconds.
pub fn parse_interval_ms(s: &str) -> Result<u64> {
    if s.len() < 2 {
        bail!("invalid interval '{}': expected format like '5m'", s);
    }

    let (num_str, suffix) = s.split_at(s.len() - 1);
    let n: u64 = num_str.parse().with_context(|| {
        format!(
            "invalid interval '{}': quantity must be a positive integer",
            s
        )
    })?;
    if n == 0 {
        bail!("invalid interval '{}': quantity must be > 0", s);
    }

    let unit_ms = match suffix {
        "s" => 1_000,
        "m" => 60_000,
        "h" => 3_600_000,
        "d" => 86_400_000,
        "w" => 7 * 86_400_000,
        "M" => 30 * 86_400_000,
        _ => bail!(
            "invalid interval '{}': unsupported suffix '{}', expected one of s/m/h/d/w/M",
            s,
            suffix
        ),
    };

    n.checked_mul(unit_ms)
        .with_context(|| format!("invalid interval '{}': value is too large", s))
}

impl BinanceConfig {
    pub fn kline_interval_ms(&self) -> Result<u64> {
        parse_interval_ms(&self.kline_interval)
    }

    /// Configured symbols, trimmed, uppercased, and deduplicated.
    pub fn watched_symbols(&self) -> Vec<String> {
        let mut out = Vec::new();
        for sym in &self.symbols {
            let s = sym.trim().to_ascii_uppercase();
            if !s.is_empty() && !out.iter().any(|v| v == &s) {
                out.push(s);
            }
        }
        out
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.binance.watched_symbols().is_empty() {
            bail!("binance.symbols must name at least one symbol");
        }
        self.binance
            .kline_interval_ms()
            .context("binance.kline_interval is invalid")?;
        parse_interval_ms(&self.binance.baseline_interval)
            .context("binance.baseline_interval is invalid")?;
        if self.binance.poll_secs == 0 || self.binance.ticker_secs == 0 {
            bail!("binance.poll_secs and binance.ticker_secs must be > 0");
        }

        let game = &self.game;
        if game.baseline.days == 0 {
            bail!("game.baseline.days must be > 0");
        }
        if game.baseline.coefficient <= 0.0 {
            bail!("game.baseline.coefficient must be > 0");
        }
        if game.growth.delta_min > game.growth.delta_max {
            bail!("game.growth.delta_min must not exceed delta_max");
        }
        if !game.growth.sensitivity.is_finite() {
            bail!("game.growth.sensitivity must be finite");
        }
        if game.windows.short_ticks == 0 || game.windows.long_ticks == 0 {
            bail!("game.windows capacities must be > 0");
        }
        if game.triggers.win_height <= game.triggers.lose_height {
            bail!("game.triggers.win_height must exceed lose_height");
        }
        let d = &game.degradation;
        if d.off_threshold > d.on_threshold || d.on_threshold > d.counter_cap {
            bail!("game.degradation thresholds must satisfy off <= on <= cap");
        }
        if d.volume_ratio <= 0.0 {
            bail!("game.degradation.volume_ratio must be > 0");
        }

        for (symbol, ov) in &self.overrides {
            if let Some(c) = ov.coefficient {
                if c <= 0.0 {
                    bail!("overrides.{}.coefficient must be > 0", symbol);
                }
            }
            if let Some(s) = ov.sensitivity {
                if !s.is_finite() {
                    bail!("overrides.{}.sensitivity must be finite", symbol);
                }
            }
        }
        Ok(())
    }

    /// Game tuning for one symbol: the shared `[game]` table with that
    /// symbol's overrides applied.
    pub fn params_for(&self, symbol: &str) -> LeekParams {
        let mut params = self.game.clone();
        if let Some(ov) = self.overrides.get(symbol) {
            if let Some(c) = ov.coefficient {
                params.baseline.coefficient = c;
            }
            if let Some(s) = ov.sensitivity {
                params.growth.sensitivity = s;
            }
        }
        params
    }
}
