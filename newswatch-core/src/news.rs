//! News data structures for ticker news monitoring

use serde::{Deserialize, Serialize};

use crate::identity::domain_of;

/// A watched instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// Short unique key (e.g., "NVDA")
    pub symbol: String,
    /// Display name used in search queries (e.g., "NVIDIA")
    pub name: String,
}

impl Ticker {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Search query matching the display name, the bare symbol, or the cashtag
    pub fn search_query(&self) -> String {
        format!("\"{}\" OR {} OR ${}", self.name, self.symbol, self.symbol)
    }
}

/// An item as returned by a feed source, before canonicalization and scoring
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFeedItem {
    /// Headline
    pub title: String,
    /// Summary/description with markup already stripped
    pub summary: String,
    /// Link as published by the feed (may be an aggregator redirect)
    pub link: String,
    /// Publication time, epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<i64>,
    /// Last-updated time, epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    /// Publisher homepage reported by the feed (RSS `<source url=...>`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl RawFeedItem {
    /// Publication timestamp, falling back to the updated timestamp, then to `now`
    pub fn timestamp_or(&self, now: i64) -> i64 {
        self.published.or(self.updated).unwrap_or(now)
    }

    /// Text handed to the sentiment scorer
    pub fn scoring_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

/// A scored news item for one polling cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Article headline
    pub title: String,
    /// Canonical article URL
    pub url: String,
    /// Sentiment score in [-1.0, 1.0]
    pub score: f64,
    /// Publication time, epoch seconds
    pub published_at: i64,
    /// Publisher homepage, when the feed reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl NewsItem {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        score: f64,
        published_at: i64,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            score,
            published_at,
            source_url: None,
        }
    }

    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = Some(source_url.into());
        self
    }

    /// Domain of the publishing outlet.
    ///
    /// Prefers the feed-reported publisher over the article link, since links
    /// that could not be unwrapped still point at the aggregator.
    pub fn publisher_domain(&self) -> String {
        self.source_url
            .as_deref()
            .map(domain_of)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| domain_of(&self.url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query() {
        let ticker = Ticker::new("NVDA", "NVIDIA");
        assert_eq!(ticker.search_query(), "\"NVIDIA\" OR NVDA OR $NVDA");
    }

    #[test]
    fn test_timestamp_fallbacks() {
        let mut raw = RawFeedItem {
            published: Some(100),
            updated: Some(200),
            ..Default::default()
        };
        assert_eq!(raw.timestamp_or(999), 100);

        raw.published = None;
        assert_eq!(raw.timestamp_or(999), 200);

        raw.updated = None;
        assert_eq!(raw.timestamp_or(999), 999);
    }

    #[test]
    fn test_publisher_domain_prefers_source() {
        let item = NewsItem::new("t", "https://news.google.com/rss/articles/abc", 0.1, 0)
            .with_source_url("https://www.reuters.com");
        assert_eq!(item.publisher_domain(), "reuters.com");

        let bare = NewsItem::new("t", "https://www.cnbc.com/2025/01/01/story.html", 0.1, 0);
        assert_eq!(bare.publisher_domain(), "cnbc.com");
    }

    #[test]
    fn test_missing_source_url_not_serialized() {
        let item = NewsItem::new("t", "https://a.example/1", -0.25, 42);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("source_url").is_none());
        assert_eq!(json["published_at"], 42);

        let back: NewsItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
