//! Engine configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! Environment:
//! - NEWSWATCH_CONFIG: path to a JSON config file (optional)
//! - NEWSWATCH_WATCHLIST: JSON object `{"SYMBOL": "Display name"}` overriding the watchlist

use std::env;
use std::fs;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use newswatch_core::{Ticker, WatchError, WatchResult};

use crate::cluster::ClusterThresholds;
use crate::confidence::CredibilityTable;

/// Alert engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Watched tickers, symbol -> display name, processed in this order
    #[serde(default = "default_watchlist")]
    pub watchlist: IndexMap<String, String>,
    /// Cluster window (minutes)
    #[serde(default = "default_lookback_minutes")]
    pub lookback_minutes: u64,
    /// Score at or above which a headline counts as strongly positive
    #[serde(default = "default_strong_positive")]
    pub strong_positive: f64,
    /// Score at or below which a headline counts as strongly negative
    #[serde(default = "default_strong_negative")]
    pub strong_negative: f64,
    /// Strong headlines on one side needed to alert
    #[serde(default = "default_cluster_count")]
    pub cluster_count: usize,
    /// Minimum gap between alerts per ticker and per signature (minutes)
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,
    /// How long sent signatures are remembered (hours)
    #[serde(default = "default_sent_ttl_hours")]
    pub sent_ttl_hours: u64,
    /// Evict first-seen records older than this (hours); `None` keeps full history
    #[serde(default)]
    pub seen_ttl_hours: Option<u64>,
    /// Recency hint passed to the feed query (hours)
    #[serde(default = "default_feed_lookback_hours")]
    pub feed_lookback_hours: u64,
    /// Headlines shown in an alert and covered by its signature
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Cluster age (minutes) that still earns full recency credit
    #[serde(default = "default_recency_baseline_minutes")]
    pub recency_baseline_minutes: f64,
    /// Source credibility multipliers by domain
    #[serde(default)]
    pub credibility: CredibilityTable,
}

fn default_watchlist() -> IndexMap<String, String> {
    [("TSLA", "Tesla"), ("NVDA", "NVIDIA"), ("AAPL", "Apple")]
        .into_iter()
        .map(|(s, n)| (s.to_string(), n.to_string()))
        .collect()
}

fn default_lookback_minutes() -> u64 {
    180
}

fn default_strong_positive() -> f64 {
    0.6
}

fn default_strong_negative() -> f64 {
    -0.6
}

fn default_cluster_count() -> usize {
    3
}

fn default_cooldown_minutes() -> u64 {
    120
}

fn default_sent_ttl_hours() -> u64 {
    24
}

fn default_feed_lookback_hours() -> u64 {
    6
}

fn default_top_n() -> usize {
    5
}

fn default_recency_baseline_minutes() -> f64 {
    60.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            watchlist: default_watchlist(),
            lookback_minutes: default_lookback_minutes(),
            strong_positive: default_strong_positive(),
            strong_negative: default_strong_negative(),
            cluster_count: default_cluster_count(),
            cooldown_minutes: default_cooldown_minutes(),
            sent_ttl_hours: default_sent_ttl_hours(),
            seen_ttl_hours: None,
            feed_lookback_hours: default_feed_lookback_hours(),
            top_n: default_top_n(),
            recency_baseline_minutes: default_recency_baseline_minutes(),
            credibility: CredibilityTable::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> WatchResult<Self> {
        let mut config: Self = serde_json::from_str(json)
            .map_err(|e| WatchError::parse(format!("Invalid engine config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from NEWSWATCH_CONFIG / NEWSWATCH_WATCHLIST
    pub fn from_env() -> WatchResult<Self> {
        let mut config = match env::var("NEWSWATCH_CONFIG") {
            Ok(path) => {
                let text = fs::read_to_string(&path).map_err(|e| {
                    WatchError::config(format!("Failed to read config {}: {}", path, e))
                })?;
                serde_json::from_str(&text)
                    .map_err(|e| WatchError::parse(format!("Invalid JSON in {}: {}", path, e)))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(json) = env::var("NEWSWATCH_WATCHLIST") {
            config.watchlist = serde_json::from_str(&json).map_err(|e| {
                WatchError::parse(format!("Invalid JSON in NEWSWATCH_WATCHLIST: {}", e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject unusable settings; low credibility weights are raised to 1.0
    pub fn validate(&mut self) -> WatchResult<()> {
        if self.watchlist.is_empty() {
            return Err(WatchError::config("watchlist cannot be empty"));
        }
        if !(self.strong_positive > 0.0 && self.strong_positive <= 1.0) {
            return Err(WatchError::config(format!(
                "strong_positive must be in (0, 1], got {}",
                self.strong_positive
            )));
        }
        if !(self.strong_negative < 0.0 && self.strong_negative >= -1.0) {
            return Err(WatchError::config(format!(
                "strong_negative must be in [-1, 0), got {}",
                self.strong_negative
            )));
        }
        if self.cluster_count == 0 {
            return Err(WatchError::config("cluster_count must be at least 1"));
        }
        if self.top_n == 0 {
            return Err(WatchError::config("top_n must be at least 1"));
        }
        if self.lookback_minutes == 0 {
            return Err(WatchError::config("lookback_minutes must be at least 1"));
        }

        let durations = [
            ("lookback_minutes", Some(self.lookback_minutes), MINUTE),
            ("cooldown_minutes", Some(self.cooldown_minutes), MINUTE),
            ("sent_ttl_hours", Some(self.sent_ttl_hours), HOUR),
            ("seen_ttl_hours", self.seen_ttl_hours, HOUR),
        ];
        for (name, value, unit) in durations {
            if let Some(value) = value {
                if to_secs(value, unit).is_none() {
                    return Err(WatchError::config(format!("{} is too large: {}", name, value)));
                }
            }
        }

        for domain in self.credibility.normalize() {
            warn!("Credibility weight for {} below 1.0, using 1.0", domain);
        }

        Ok(())
    }

    /// Watched tickers in configured order
    pub fn tickers(&self) -> Vec<Ticker> {
        self.watchlist
            .iter()
            .map(|(symbol, name)| Ticker::new(symbol.as_str(), name.as_str()))
            .collect()
    }

    pub fn thresholds(&self) -> ClusterThresholds {
        ClusterThresholds {
            strong_positive: self.strong_positive,
            strong_negative: self.strong_negative,
            cluster_count: self.cluster_count,
            top_n: self.top_n,
        }
    }

    /// Window length in seconds; saturates where `validate` would have failed
    pub fn lookback_secs(&self) -> i64 {
        to_secs(self.lookback_minutes, MINUTE).unwrap_or(i64::MAX)
    }

    pub fn cooldown_secs(&self) -> i64 {
        to_secs(self.cooldown_minutes, MINUTE).unwrap_or(i64::MAX)
    }

    pub fn sent_ttl_secs(&self) -> i64 {
        to_secs(self.sent_ttl_hours, HOUR).unwrap_or(i64::MAX)
    }

    pub fn seen_ttl_secs(&self) -> Option<i64> {
        self.seen_ttl_hours.map(|h| to_secs(h, HOUR).unwrap_or(i64::MAX))
    }
}

const MINUTE: u64 = 60;
const HOUR: u64 = 3600;

/// `value * unit` seconds, if it fits in an i64
fn to_secs(value: u64, unit: u64) -> Option<i64> {
    value
        .checked_mul(unit)
        .and_then(|secs| i64::try_from(secs).ok())
}
