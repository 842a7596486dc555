use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};

use leekling::config::Config;
use leekling::engine::leek::Leek;
use leekling::event::{MonitorEvent, TickEvent};
use leekling::monitor::{self, MonitorConfig};
use leekling::source::BinanceClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());
    let config = Config::load(Path::new(&config_path))
        .with_context(|| format!("failed to load {}", config_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .init();

    let symbols = config.binance.watched_symbols();
    tracing::info!(
        symbols = ?symbols,
        interval = %config.binance.kline_interval,
        rest_url = %config.binance.rest_base_url,
        "starting leekling"
    );

    let client = Arc::new(BinanceClient::new(&config.binance.rest_base_url)?);
    let (event_tx, mut event_rx) = mpsc::channel::<MonitorEvent>(256);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut handles = Vec::with_capacity(symbols.len());
    for symbol in &symbols {
        let leek = Leek::new(symbol, config.params_for(symbol));
        let monitor_cfg = MonitorConfig {
            kline_interval: config.binance.kline_interval.clone(),
            baseline_interval: config.binance.baseline_interval.clone(),
            poll: Duration::from_secs(config.binance.poll_secs),
            ticker: Duration::from_secs(config.binance.ticker_secs),
        };
        handles.push(tokio::spawn(monitor::run(
            client.clone(),
            leek,
            monitor_cfg,
            event_tx.clone(),
            shutdown_rx.clone(),
        )));
    }
    // The receiver closes once every monitor drops its sender.
    drop(event_tx);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl-c received, aborting running leeks");
            let _ = shutdown_tx.send(true);
        }
    });

    while let Some(event) = event_rx.recv().await {
        render_event(&event);
    }
    for handle in handles {
        let _ = handle.await;
    }
    tracing::info!("all leeks settled");
    Ok(())
}

fn render_event(event: &MonitorEvent) {
    match event {
        MonitorEvent::Initialized(s) => {
            tracing::info!(
                symbol = %s.symbol,
                baseline = s.baseline,
                height = s.height,
                "leek planted"
            );
        }
        MonitorEvent::InitFailed { symbol, error } => {
            tracing::error!(symbol = %symbol, error = %error, "initialization failed");
        }
        MonitorEvent::FetchFailed { symbol } => {
            tracing::warn!(symbol = %symbol, "no candle this cycle");
        }
        MonitorEvent::Ticker {
            symbol,
            price,
            change_pct,
        } => {
            tracing::debug!(symbol = %symbol, price, change_pct, "ticker");
        }
        MonitorEvent::Tick { snapshot, events } => {
            for tick_event in events {
                render_tick_event(&snapshot.symbol, tick_event);
            }
            tracing::info!(
                symbol = %snapshot.symbol,
                height = snapshot.height,
                visual = %snapshot.visual,
                time = %format_ms(snapshot.last_open_time),
                "tick"
            );
        }
        MonitorEvent::Finished(s) => {
            tracing::info!(
                symbol = %s.symbol,
                lifecycle = %s.lifecycle,
                height = s.height,
                "run finished"
            );
        }
    }
}

fn render_tick_event(symbol: &str, event: &TickEvent) {
    match event {
        TickEvent::Ignored { open_time, reason } => {
            tracing::debug!(symbol = %symbol, open_time, ?reason, "tick ignored");
        }
        TickEvent::AnchorSet { close } => {
            tracing::info!(symbol = %symbol, close, "growth anchor set");
        }
        TickEvent::Growth { delta, height } => {
            tracing::debug!(symbol = %symbol, delta, height, "growth");
        }
        TickEvent::WonByHeight { height } => {
            tracing::info!(symbol = %symbol, height, "target height reached");
        }
        TickEvent::LostByHeight { height } => {
            tracing::warn!(symbol = %symbol, height, "leek withered away");
        }
        TickEvent::Scythe {
            volume,
            avg_volume,
            body_pct,
        } => {
            tracing::warn!(
                symbol = %symbol,
                volume,
                avg_volume,
                body_pct,
                "scythe fell"
            );
        }
        TickEvent::Fertilizer {
            volume,
            avg_volume,
            body_pct,
        } => {
            tracing::info!(
                symbol = %symbol,
                volume,
                avg_volume,
                body_pct,
                "fertilizer hit"
            );
        }
        TickEvent::Degradation {
            qualifying,
            counter,
        } => {
            tracing::debug!(symbol = %symbol, qualifying, counter, "degradation gauge");
        }
        TickEvent::VisualChanged { from, to } => {
            tracing::info!(symbol = %symbol, from = %from, to = %to, "visual state changed");
        }
    }
}

fn format_ms(ms: Option<u64>) -> String {
    ms.and_then(|v| chrono::DateTime::from_timestamp_millis(v as i64))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}
