use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::engine::leek::Leek;
use crate::event::MonitorEvent;
use crate::source::CandleSource;

/// Cadence and intervals for one symbol's monitor task.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub kline_interval: String,
    pub baseline_interval: String,
    pub poll: Duration,
    pub ticker: Duration,
}

/// Outcome of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Continue,
    Finished,
}

/// Fetch history, initialize the leek, and report the result. Returns
/// false when initialization failed and the monitor should stop.
pub async fn initialize_leek<S: CandleSource>(
    source: &S,
    leek: &mut Leek,
    cfg: &MonitorConfig,
    tx: &mpsc::Sender<MonitorEvent>,
) -> bool {
    let symbol = leek.symbol().to_string();
    let daily = source
        .candles(
            &symbol,
            &cfg.baseline_interval,
            leek.baseline_capacity(),
            None,
        )
        .await;
    let seed = source
        .candles(&symbol, &cfg.kline_interval, leek.seed_capacity(), None)
        .await;

    match leek.initialize(&daily, &seed) {
        Ok(snapshot) => {
            let _ = tx.send(MonitorEvent::Initialized(snapshot)).await;
            true
        }
        Err(e) => {
            let _ = tx
                .send(MonitorEvent::InitFailed {
                    symbol,
                    error: e.to_string(),
                })
                .await;
            false
        }
    }
}

/// Fetch the latest candle and advance the leek once. Stale candles are
/// skipped silently; an empty fetch reports FetchFailed and leaves the
/// leek untouched.
pub async fn poll_once<S: CandleSource>(
    source: &S,
    leek: &mut Leek,
    cfg: &MonitorConfig,
    tx: &mpsc::Sender<MonitorEvent>,
) -> PollOutcome {
    let symbol = leek.symbol().to_string();
    let candles = source.candles(&symbol, &cfg.kline_interval, 1, None).await;
    let Some(candle) = candles.last() else {
        let _ = tx.send(MonitorEvent::FetchFailed { symbol }).await;
        return PollOutcome::Continue;
    };

    let report = leek.process_tick(candle);
    if !report.accepted() {
        return PollOutcome::Continue;
    }

    let lifecycle = report.snapshot.lifecycle;
    let _ = tx
        .send(MonitorEvent::Tick {
            snapshot: report.snapshot,
            events: report.events,
        })
        .await;

    if lifecycle.is_terminal() {
        let _ = tx.send(MonitorEvent::Finished(leek.snapshot())).await;
        return PollOutcome::Finished;
    }
    PollOutcome::Continue
}

/// Drive one leek until its run ends or shutdown is requested: initialize
/// from history, then poll candles and the 24h ticker on their own
/// cadences. All output flows through `tx`.
pub async fn run<S: CandleSource>(
    source: Arc<S>,
    mut leek: Leek,
    cfg: MonitorConfig,
    tx: mpsc::Sender<MonitorEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    if !initialize_leek(source.as_ref(), &mut leek, &cfg, &tx).await {
        return;
    }

    let mut poll = tokio::time::interval(cfg.poll);
    let mut quote = tokio::time::interval(cfg.ticker);

    loop {
        tokio::select! {
            _ = poll.tick() => {
                if poll_once(source.as_ref(), &mut leek, &cfg, &tx).await == PollOutcome::Finished {
                    break;
                }
            }
            _ = quote.tick() => {
                let symbol = leek.symbol().to_string();
                if let Some(q) = source.ticker(&symbol).await {
                    let _ = tx
                        .send(MonitorEvent::Ticker {
                            symbol,
                            price: q.price,
                            change_pct: q.change_pct,
                        })
                        .await;
                }
            }
            _ = shutdown.changed() => {
                let snapshot = leek.abort();
                let _ = tx.send(MonitorEvent::Finished(snapshot)).await;
                break;
            }
        }
    }
}
