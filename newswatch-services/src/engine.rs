//! Alert Engine
//!
//! Runs one polling cycle over the watchlist: fetch, score, ingest, cluster,
//! gate, notify, persist. Collaborator failures are logged per ticker and never
//! abort the cycle.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use newswatch_core::Ticker;
use newswatch_news::{FeedSource, Notifier};

use crate::cluster::detect_cluster;
use crate::confidence::assess_confidence;
use crate::config::EngineConfig;
use crate::gate::{check_gates, GateDecision};
use crate::ingestion::{ingest, score_raw_items};
use crate::message::AlertMessage;
use crate::sentiment::SentimentScorer;
use crate::state_store::{EngineState, StateStore};

/// Summary of one cycle
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    pub tickers_processed: usize,
    pub fetch_failures: usize,
    pub notify_failures: usize,
    /// Symbols that alerted this cycle, in processing order
    pub alerts_sent: Vec<String>,
    pub suppressed: usize,
    pub saves: usize,
}

/// What happened for a single ticker
enum TickerOutcome {
    FetchFailed,
    Quiet,
    Suppressed,
    NotifyFailed,
    Alerted,
}

/// The alert engine
pub struct AlertEngine {
    config: EngineConfig,
    feed: Arc<dyn FeedSource>,
    notifier: Arc<dyn Notifier>,
    scorer: Arc<dyn SentimentScorer>,
    store: StateStore,
}

impl AlertEngine {
    pub fn new(
        config: EngineConfig,
        feed: Arc<dyn FeedSource>,
        notifier: Arc<dyn Notifier>,
        scorer: Arc<dyn SentimentScorer>,
        store: StateStore,
    ) -> Self {
        Self {
            config,
            feed,
            notifier,
            scorer,
            store,
        }
    }

    /// Run one cycle at the current wall-clock time
    pub async fn run_cycle(&self) -> CycleReport {
        self.run_cycle_at(Utc::now().timestamp()).await
    }

    /// Run one cycle with `now` as the decision time (epoch seconds)
    #[instrument(skip(self))]
    pub async fn run_cycle_at(&self, now: i64) -> CycleReport {
        let mut report = CycleReport::default();
        let mut state = self.store.load();
        let mut dirty = false;

        let pruned = state.prune_sent_ids(now, self.config.sent_ttl_secs());
        if pruned > 0 {
            debug!("Pruned {} expired signatures", pruned);
            dirty = true;
        }
        if let Some(ttl) = self.config.seen_ttl_secs() {
            let evicted = state.prune_seen_ids(now, ttl);
            if evicted > 0 {
                debug!("Evicted {} old seen ids", evicted);
                dirty = true;
            }
        }

        for ticker in self.config.tickers() {
            report.tickers_processed += 1;

            match self.process_ticker(&ticker, &mut state, &mut dirty, now).await {
                TickerOutcome::FetchFailed => report.fetch_failures += 1,
                TickerOutcome::Quiet => {}
                TickerOutcome::Suppressed => report.suppressed += 1,
                TickerOutcome::NotifyFailed => report.notify_failures += 1,
                TickerOutcome::Alerted => {
                    report.alerts_sent.push(ticker.symbol.clone());
                    // Each alert is persisted before the next ticker runs
                    if self.persist(&state) {
                        report.saves += 1;
                        dirty = false;
                    }
                }
            }
        }

        if dirty && self.persist(&state) {
            report.saves += 1;
        }

        info!(
            "Cycle done: {} tickers, {} alerts, {} suppressed, {} fetch failures",
            report.tickers_processed,
            report.alerts_sent.len(),
            report.suppressed,
            report.fetch_failures
        );

        report
    }

    async fn process_ticker(
        &self,
        ticker: &Ticker,
        state: &mut EngineState,
        dirty: &mut bool,
        now: i64,
    ) -> TickerOutcome {
        let raw = match self.feed.fetch(ticker).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{}: feed fetch failed: {}", ticker.symbol, e);
                return TickerOutcome::FetchFailed;
            }
        };

        let items = score_raw_items(raw, self.scorer.as_ref(), now);
        let outcome = ingest(
            state,
            &ticker.symbol,
            items,
            now,
            self.config.lookback_secs(),
            self.config.seen_ttl_secs(),
        );
        if outcome.newly_seen > 0 {
            *dirty = true;
        }

        let Some(cluster) = detect_cluster(&outcome.window, &self.config.thresholds()) else {
            debug!("{}: no cluster in {} items", ticker.symbol, outcome.window.len());
            return TickerOutcome::Quiet;
        };

        let signature = cluster.signature();
        match check_gates(state, &ticker.symbol, &signature, now, self.config.cooldown_secs()) {
            GateDecision::Emit => {}
            GateDecision::TickerCooldown { remaining_secs } => {
                info!(
                    "{}: {} cluster held back, ticker cooldown {}s remaining",
                    ticker.symbol, cluster.direction, remaining_secs
                );
                return TickerOutcome::Suppressed;
            }
            GateDecision::DuplicateSignature { remaining_secs } => {
                info!(
                    "{}: {} cluster already sent, {}s until it may repeat",
                    ticker.symbol, cluster.direction, remaining_secs
                );
                return TickerOutcome::Suppressed;
            }
        }

        let confidence = assess_confidence(
            &cluster.contributing,
            &self.config.credibility,
            self.config.recency_baseline_minutes,
            now,
        );
        let text = AlertMessage::new(
            &ticker.symbol,
            self.config.lookback_minutes,
            &cluster,
            &confidence,
        )
        .render();

        if let Err(e) = self.notifier.notify(&text).await {
            error!("{}: alert delivery failed: {}", ticker.symbol, e);
            return TickerOutcome::NotifyFailed;
        }

        state.record_alert(&ticker.symbol, &signature, now);
        *dirty = true;
        info!(
            "{}: sent {} alert (confidence {}, {} up / {} down)",
            ticker.symbol,
            cluster.direction,
            confidence.label,
            cluster.positive_count,
            cluster.negative_count
        );

        TickerOutcome::Alerted
    }

    /// Save state; failures are logged and reported as `false`
    fn persist(&self, state: &EngineState) -> bool {
        match self.store.save(state) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to persist state: {}", e);
                false
            }
        }
    }
}
