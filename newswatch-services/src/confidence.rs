//! Confidence scoring for a detected cluster

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use newswatch_core::NewsItem;

/// Ordinal summary of cluster strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    Low,
    Medium,
    MediumHigh,
    High,
}

impl ConfidenceLabel {
    /// Map a raw confidence value onto its label
    pub fn from_raw(raw: f64) -> Self {
        if raw >= 4.0 {
            ConfidenceLabel::High
        } else if raw >= 2.0 {
            ConfidenceLabel::MediumHigh
        } else if raw >= 1.0 {
            ConfidenceLabel::Medium
        } else {
            ConfidenceLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::Low => "Low",
            ConfidenceLabel::Medium => "Medium",
            ConfidenceLabel::MediumHigh => "Medium-High",
            ConfidenceLabel::High => "High",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-domain source credibility multipliers (all >= 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredibilityTable(BTreeMap<String, f64>);

impl CredibilityTable {
    pub fn new(weights: BTreeMap<String, f64>) -> Self {
        Self(weights)
    }

    /// Weight for a domain. Subdomains inherit their parent's weight
    /// (`uk.reuters.com` counts as `reuters.com`); unknown domains weigh 1.0.
    pub fn weight(&self, domain: &str) -> f64 {
        let domain = domain.trim().to_ascii_lowercase();
        let mut candidate = domain.as_str();
        loop {
            if let Some(w) = self.0.get(candidate) {
                return w.max(1.0);
            }
            match candidate.split_once('.') {
                Some((_, rest)) if rest.contains('.') => candidate = rest,
                _ => return 1.0,
            }
        }
    }

    /// Raise any weight below 1.0 to 1.0; returns the domains that were changed
    pub fn normalize(&mut self) -> Vec<String> {
        let mut raised = Vec::new();
        for (domain, weight) in self.0.iter_mut() {
            if !(*weight >= 1.0) {
                *weight = 1.0;
                raised.push(domain.clone());
            }
        }
        raised
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CredibilityTable {
    fn default() -> Self {
        let weights = [
            ("reuters.com", 1.5),
            ("bloomberg.com", 1.5),
            ("wsj.com", 1.4),
            ("ft.com", 1.4),
            ("apnews.com", 1.4),
            ("cnbc.com", 1.25),
            ("barrons.com", 1.2),
            ("marketwatch.com", 1.2),
            ("finance.yahoo.com", 1.1),
            ("investors.com", 1.1),
            ("businessinsider.com", 1.05),
            ("seekingalpha.com", 1.05),
        ]
        .into_iter()
        .map(|(d, w)| (d.to_string(), w))
        .collect();
        Self(weights)
    }
}

/// Confidence breakdown for one cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confidence {
    pub label: ConfidenceLabel,
    pub raw: f64,
    pub volume: usize,
    pub avg_abs_score: f64,
    pub avg_weight: f64,
    pub recency_factor: f64,
}

impl Confidence {
    fn empty() -> Self {
        Self {
            label: ConfidenceLabel::Low,
            raw: 0.0,
            volume: 0,
            avg_abs_score: 0.0,
            avg_weight: 1.0,
            recency_factor: 1.0,
        }
    }
}

/// Score the items contributing to a cluster.
///
/// `raw = volume * avg|score| * avg credibility * recency`, where recency is
/// `baseline_minutes / age of the oldest item in minutes`, clamped to [0.5, 1.0].
pub fn assess_confidence(
    items: &[NewsItem],
    credibility: &CredibilityTable,
    baseline_minutes: f64,
    now: i64,
) -> Confidence {
    if items.is_empty() {
        return Confidence::empty();
    }

    let volume = items.len();
    let n = volume as f64;

    let avg_abs_score = items.iter().map(|i| i.score.abs()).sum::<f64>() / n;
    let avg_weight = items
        .iter()
        .map(|i| credibility.weight(&i.publisher_domain()))
        .sum::<f64>()
        / n;

    let oldest = items.iter().map(|i| i.published_at).min().unwrap_or(now);
    let window_minutes = ((now - oldest) as f64 / 60.0).max(1.0);
    let recency_factor = (baseline_minutes / window_minutes).clamp(0.5, 1.0);

    let raw = n * avg_abs_score * avg_weight * recency_factor;

    Confidence {
        label: ConfidenceLabel::from_raw(raw),
        raw,
        volume,
        avg_abs_score,
        avg_weight,
        recency_factor,
    }
}
