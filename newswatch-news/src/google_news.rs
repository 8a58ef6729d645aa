//! Google News RSS client for ticker news
//!
//! Fetches per-ticker search results from the Google News RSS endpoint.
//! Google News does its own relevance matching, so the query only needs the
//! company name, the bare symbol and the cashtag.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use newswatch_core::{RawFeedItem, Ticker};

use crate::error::NewsError;
use crate::rss_parser::parse_channel;
use crate::source::FeedSource;

/// Default bound on every feed request
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Google News RSS client
pub struct GoogleNewsClient {
    client: Client,
    base_url: String,
    /// Recency hint appended to the query as `when:<hours>h`
    lookback_hours: u64,
}

impl GoogleNewsClient {
    /// Create a new Google News client
    pub fn new(timeout: Duration, lookback_hours: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent("Mozilla/5.0 (compatible; newswatch/0.1)")
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: "https://news.google.com/rss/search".to_string(),
            lookback_hours,
        }
    }

    /// Point the client at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full RSS search URL for a ticker
    pub fn search_url(&self, ticker: &Ticker) -> String {
        let query = format!("{} when:{}h", ticker.search_query(), self.lookback_hours);
        format!(
            "{}?q={}&hl=en-US&gl=US&ceid=US:en",
            self.base_url,
            urlencoding::encode(&query)
        )
    }
}

impl Default for GoogleNewsClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS), 6)
    }
}

#[async_trait]
impl FeedSource for GoogleNewsClient {
    #[instrument(skip(self), fields(symbol = %ticker.symbol))]
    async fn fetch(&self, ticker: &Ticker) -> Result<Vec<RawFeedItem>, NewsError> {
        let url = self.search_url(ticker);
        debug!("Fetching Google News RSS: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NewsError::ApiError {
                status: response.status().as_u16(),
                message: format!("Google News returned status {}", response.status()),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        // Google News uses standard RSS 2.0
        let channel = rss::Channel::read_from(&content[..]).map_err(|e| {
            NewsError::ParseError(format!("Failed to parse Google News RSS: {}", e))
        })?;

        let mut items = parse_channel(&channel);
        for item in &mut items {
            item.title = strip_source_suffix(&item.title, item.source_url.is_some());
        }

        info!(
            "Google News returned {} items for {}",
            items.len(),
            ticker.symbol
        );

        Ok(items)
    }
}

/// Drop the " - Source Name" suffix Google News appends to headlines.
///
/// Only applied when the item carries a `<source>` element, so hyphenated
/// headlines from other feeds are left alone.
fn strip_source_suffix(title: &str, has_source: bool) -> String {
    if !has_source {
        return title.to_string();
    }
    match title.rfind(" - ") {
        Some(pos) if pos > 0 => title[..pos].trim().to_string(),
        _ => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        let client = GoogleNewsClient::new(Duration::from_secs(5), 6);
        let url = client.search_url(&Ticker::new("NVDA", "NVIDIA"));
        assert_eq!(
            url,
            "https://news.google.com/rss/search?q=%22NVIDIA%22%20OR%20NVDA%20OR%20%24NVDA%20when%3A6h&hl=en-US&gl=US&ceid=US:en"
        );
    }

    #[test]
    fn test_strip_source_suffix() {
        assert_eq!(
            strip_source_suffix("Nvidia surges past $5T - CNBC", true),
            "Nvidia surges past $5T"
        );
        assert_eq!(
            strip_source_suffix("Nvidia surges past $5T - CNBC", false),
            "Nvidia surges past $5T - CNBC"
        );
        assert_eq!(strip_source_suffix("No suffix", true), "No suffix");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let client = GoogleNewsClient::new(Duration::from_millis(500), 6)
            .with_base_url("http://127.0.0.1:9/rss/search");
        let result = client.fetch(&Ticker::new("NVDA", "NVIDIA")).await;
        assert!(matches!(result, Err(NewsError::RequestFailed(_))));
    }
}
