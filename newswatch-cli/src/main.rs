//! newswatch
//!
//! Polls news for every watched ticker and sends an alert when strongly
//! positive or negative headlines cluster inside the lookback window.
//!
//! By default one cycle runs and the process exits, which suits cron and CI
//! schedules. Setting POLL_INTERVAL_SECS keeps the process alive and repeats
//! the cycle until Ctrl+C.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use newswatch_news::google_news::DEFAULT_TIMEOUT_SECS;
use newswatch_news::{GoogleNewsClient, TelegramNotifier};
use newswatch_services::{AlertEngine, CycleReport, EngineConfig, StateStore, VaderScorer};
use tokio::signal;
use tokio::time::interval;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,newswatch=debug")),
        )
        .init();

    let config = EngineConfig::from_env().context("Failed to load engine configuration")?;
    info!(
        "Watching {} tickers: {}",
        config.watchlist.len(),
        config.watchlist.keys().cloned().collect::<Vec<_>>().join(", ")
    );

    let timeout = Duration::from_secs(env_u64("HTTP_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS));

    let feed = GoogleNewsClient::new(timeout, config.feed_lookback_hours);

    let notifier = TelegramNotifier::from_env(timeout);
    if notifier.is_configured() {
        info!("Telegram credentials found, alerts will be delivered");
    } else {
        warn!("No TELEGRAM_TOKEN/TELEGRAM_CHAT_ID - running in dry-run mode");
    }

    let state_path = env::var("STATE_PATH").unwrap_or_else(|_| "state.json".to_string());
    let marker_path =
        env::var("STATE_CHANGED_FLAG").unwrap_or_else(|_| ".state_changed".to_string());
    info!("Using state file: {}", state_path);
    let store = StateStore::new(state_path).with_changed_marker(marker_path);

    let engine = AlertEngine::new(
        config,
        Arc::new(feed),
        Arc::new(notifier),
        Arc::new(VaderScorer::new()),
        store,
    );

    match env_u64("POLL_INTERVAL_SECS").filter(|secs| *secs > 0) {
        None => {
            let report = engine.run_cycle().await;
            log_report(&report);
        }
        Some(secs) => {
            info!("Polling every {}s (Ctrl+C to stop)", secs);
            tokio::select! {
                _ = poll_loop(&engine, Duration::from_secs(secs)) => {}
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C, stopping...");
                }
            }
        }
    }

    Ok(())
}

async fn poll_loop(engine: &AlertEngine, period: Duration) {
    let mut ticker = interval(period);
    loop {
        ticker.tick().await;
        let report = engine.run_cycle().await;
        log_report(&report);
    }
}

fn log_report(report: &CycleReport) {
    if report.alerts_sent.is_empty() {
        info!("No alerts this cycle");
    } else {
        info!("Alerts sent for: {}", report.alerts_sent.join(", "));
    }
    if report.fetch_failures > 0 || report.notify_failures > 0 {
        warn!(
            "{} feed failures, {} delivery failures",
            report.fetch_failures, report.notify_failures
        );
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let value = env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", key, value);
            None
        }
    }
}
