//! Cluster detection over the active window

use std::fmt;

use serde::{Deserialize, Serialize};

use newswatch_core::{signature_hash, NewsItem};

/// Direction of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Bullish => "bullish",
            Direction::Bearish => "bearish",
        }
    }

    /// Phrase used in the alert headline
    pub fn verdict(&self) -> &'static str {
        match self {
            Direction::Bullish => "could rise significantly",
            Direction::Bearish => "could decrease significantly",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for cluster detection
#[derive(Debug, Clone, Copy)]
pub struct ClusterThresholds {
    pub strong_positive: f64,
    pub strong_negative: f64,
    pub cluster_count: usize,
    pub top_n: usize,
}

/// A detected cluster of strongly-scored headlines
#[derive(Debug, Clone)]
pub struct Cluster {
    pub direction: Direction,
    /// Dominant side, strongest first, at most `top_n`
    pub top: Vec<NewsItem>,
    /// Strongest headline on the other side, if any
    pub counterpoint: Option<NewsItem>,
    /// Every strong item from both sides
    pub contributing: Vec<NewsItem>,
    pub positive_count: usize,
    pub negative_count: usize,
}

impl Cluster {
    /// Signature over the ordered top URLs
    pub fn signature(&self) -> String {
        let urls: Vec<&str> = self.top.iter().map(|i| i.url.as_str()).collect();
        signature_hash(&urls)
    }
}

/// Detect a cluster in `window`.
///
/// A cluster needs `cluster_count` strong items on at least one side. The
/// dominant side is the one with the larger absolute score sum (ties go to
/// the positive side), even if that side alone is below the count.
pub fn detect_cluster(window: &[NewsItem], thresholds: &ClusterThresholds) -> Option<Cluster> {
    let pos: Vec<&NewsItem> = window
        .iter()
        .filter(|i| i.score >= thresholds.strong_positive)
        .collect();
    let neg: Vec<&NewsItem> = window
        .iter()
        .filter(|i| i.score <= thresholds.strong_negative)
        .collect();

    if pos.len() < thresholds.cluster_count && neg.len() < thresholds.cluster_count {
        return None;
    }

    let pos_mass: f64 = pos.iter().map(|i| i.score).sum::<f64>().abs();
    let neg_mass: f64 = neg.iter().map(|i| i.score).sum::<f64>().abs();
    let direction = if pos_mass >= neg_mass {
        Direction::Bullish
    } else {
        Direction::Bearish
    };

    let (mut dominant, other) = match direction {
        Direction::Bullish => (pos.clone(), &neg),
        Direction::Bearish => (neg.clone(), &pos),
    };

    match direction {
        Direction::Bullish => dominant.sort_by(|a, b| b.score.total_cmp(&a.score)),
        Direction::Bearish => dominant.sort_by(|a, b| a.score.total_cmp(&b.score)),
    }

    let top = dominant
        .into_iter()
        .take(thresholds.top_n)
        .cloned()
        .collect();

    let counterpoint = other
        .iter()
        .max_by(|a, b| a.score.abs().total_cmp(&b.score.abs()))
        .map(|i| (*i).clone());

    let contributing = pos.iter().chain(neg.iter()).map(|i| (*i).clone()).collect();

    Some(Cluster {
        direction,
        top,
        counterpoint,
        contributing,
        positive_count: pos.len(),
        negative_count: neg.len(),
    })
}
