//! Ingestion: canonicalize and score fetched items, record first sightings,
//! and cut the recency window used for clustering

use std::collections::HashSet;

use tracing::debug;

use newswatch_core::{canonicalize, content_hash, NewsItem, RawFeedItem};

use crate::sentiment::{score_text, SentimentScorer};
use crate::state_store::EngineState;

/// Result of ingesting one ticker's items
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    /// Items published inside `[now - lookback, now]`
    pub window: Vec<NewsItem>,
    /// Items recorded in `seen_ids` for the first time
    pub newly_seen: usize,
}

/// Turn raw feed items into scored items with canonical URLs.
///
/// Publication time falls back to the updated time, then to `now`.
pub fn score_raw_items(
    raw: Vec<RawFeedItem>,
    scorer: &dyn SentimentScorer,
    now: i64,
) -> Vec<NewsItem> {
    raw.into_iter()
        .map(|item| {
            let score = score_text(scorer, &item.scoring_text());
            let published_at = item.timestamp_or(now);
            NewsItem {
                url: canonicalize(&item.link),
                title: item.title,
                score,
                published_at,
                source_url: item.source_url,
            }
        })
        .collect()
}

/// Record first sightings and select the active window.
///
/// Seen-tracking never gates clustering: an article seen in an earlier cycle
/// is windowed again as long as it is recent enough.
///
/// With `seen_ttl_secs` set, items published before `now - ttl` are not
/// recorded, matching what `EngineState::prune_seen_ids` would evict.
pub fn ingest(
    state: &mut EngineState,
    ticker: &str,
    items: Vec<NewsItem>,
    now: i64,
    lookback_secs: i64,
    seen_ttl_secs: Option<i64>,
) -> IngestOutcome {
    let cutoff = now - lookback_secs;
    let seen_cutoff = seen_ttl_secs.map(|ttl| now - ttl);
    let mut outcome = IngestOutcome::default();
    let mut windowed = HashSet::new();

    for item in items {
        let hash = content_hash(&item.url);

        let expired = seen_cutoff.is_some_and(|c| item.published_at < c);
        if !expired && state.mark_seen(ticker, &hash, item.published_at) {
            outcome.newly_seen += 1;
        }

        let in_window = item.published_at >= cutoff && item.published_at <= now;
        if in_window && windowed.insert(hash) {
            outcome.window.push(item);
        }
    }

    debug!(
        "{}: {} in window, {} newly seen",
        ticker,
        outcome.window.len(),
        outcome.newly_seen
    );

    outcome
}
