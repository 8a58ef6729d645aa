//! Persisted engine state
//!
//! One JSON record holds everything the engine remembers between runs:
//! - `seen_ids`: ticker -> content hash -> first-seen timestamp
//! - `last_alert`: ticker -> timestamp of the latest alert
//! - `sent_ids`: alert signature -> timestamp of its latest emission
//!
//! Maps are ordered so the file diffs cleanly between runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use newswatch_core::{WatchError, WatchResult};

/// Everything the engine persists between cycles.
///
/// Fields are declared in key order so the top level of the file is sorted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    #[serde(default)]
    pub last_alert: BTreeMap<String, i64>,
    #[serde(default)]
    pub seen_ids: BTreeMap<String, BTreeMap<String, i64>>,
    #[serde(default)]
    pub sent_ids: BTreeMap<String, i64>,
}

impl EngineState {
    /// Record a first sighting; returns false (and changes nothing) if already seen
    pub fn mark_seen(&mut self, ticker: &str, hash: &str, ts: i64) -> bool {
        let seen = self.seen_ids.entry(ticker.to_string()).or_default();
        if seen.contains_key(hash) {
            return false;
        }
        seen.insert(hash.to_string(), ts);
        true
    }

    pub fn is_seen(&self, ticker: &str, hash: &str) -> bool {
        self.seen_ids
            .get(ticker)
            .is_some_and(|seen| seen.contains_key(hash))
    }

    /// Drop sent signatures strictly older than `now - ttl_secs`
    pub fn prune_sent_ids(&mut self, now: i64, ttl_secs: i64) -> usize {
        let cutoff = now - ttl_secs;
        let before = self.sent_ids.len();
        self.sent_ids.retain(|_, ts| *ts >= cutoff);
        before - self.sent_ids.len()
    }

    /// Drop first-seen records strictly older than `now - ttl_secs`
    pub fn prune_seen_ids(&mut self, now: i64, ttl_secs: i64) -> usize {
        let cutoff = now - ttl_secs;
        let mut removed = 0;
        for seen in self.seen_ids.values_mut() {
            let before = seen.len();
            seen.retain(|_, ts| *ts >= cutoff);
            removed += before - seen.len();
        }
        self.seen_ids.retain(|_, seen| !seen.is_empty());
        removed
    }

    /// Record an emitted alert. `last_alert` never moves backwards.
    pub fn record_alert(&mut self, ticker: &str, signature: &str, now: i64) {
        let last = self.last_alert.entry(ticker.to_string()).or_insert(now);
        *last = (*last).max(now);
        self.sent_ids.insert(signature.to_string(), now);
    }
}

/// JSON file store for `EngineState`
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    /// Touched after every successful save so external jobs can tell the file changed
    changed_marker: Option<PathBuf>,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            changed_marker: None,
        }
    }

    pub fn with_changed_marker(mut self, marker: impl Into<PathBuf>) -> Self {
        self.changed_marker = Some(marker.into());
        self
    }

    /// Load state, falling back to an empty state when the file is missing or unreadable
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> EngineState {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                debug!("No readable state file ({}), starting empty", e);
                return EngineState::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(state) => state,
            Err(e) => {
                warn!("State file is corrupt ({}), starting empty", e);
                EngineState::default()
            }
        }
    }

    /// Rewrite the state file.
    ///
    /// Writes a sibling temp file and renames it over the target, so a reader
    /// never sees a half-written record on the happy path.
    #[instrument(skip(self, state), fields(path = %self.path.display()))]
    pub fn save(&self, state: &EngineState) -> WatchResult<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| WatchError::storage(format!("Failed to serialize state: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                WatchError::storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json)
            .map_err(|e| WatchError::storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            WatchError::storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        if let Some(marker) = &self.changed_marker {
            if let Err(e) = fs::write(marker, "changed") {
                warn!("Failed to write change marker {}: {}", marker.display(), e);
            }
        }

        info!(
            "Saved state: {} tickers seen, {} signatures",
            state.seen_ids.len(),
            state.sent_ids.len()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
