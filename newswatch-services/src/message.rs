//! Alert text rendering

use std::fmt::Write;

use newswatch_core::NewsItem;

use crate::cluster::Cluster;
use crate::confidence::Confidence;

/// A rendered-on-demand alert for one ticker
#[derive(Debug, Clone)]
pub struct AlertMessage<'a> {
    pub symbol: &'a str,
    pub lookback_minutes: u64,
    pub cluster: &'a Cluster,
    pub confidence: &'a Confidence,
}

impl<'a> AlertMessage<'a> {
    pub fn new(
        symbol: &'a str,
        lookback_minutes: u64,
        cluster: &'a Cluster,
        confidence: &'a Confidence,
    ) -> Self {
        Self {
            symbol,
            lookback_minutes,
            cluster,
            confidence,
        }
    }

    /// Plain-text body: header, one bullet per top headline, optional counterpoint
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} {} (last {}m) · {} · confidence {}",
            self.symbol,
            self.cluster.direction.verdict(),
            self.lookback_minutes,
            self.cluster.direction,
            self.confidence.label
        );

        for item in &self.cluster.top {
            let _ = write!(out, "\n• {}", describe(item));
        }

        if let Some(counter) = &self.cluster.counterpoint {
            let _ = write!(out, "\nCounterpoint: {}", describe(counter));
        }

        out
    }
}

fn describe(item: &NewsItem) -> String {
    let title = if item.title.trim().is_empty() {
        item.url.as_str()
    } else {
        item.title.trim()
    };
    let domain = item.publisher_domain();
    if domain.is_empty() {
        format!("{} (score {:+.2})", title, item.score)
    } else {
        format!("{} [{}] (score {:+.2})", title, domain, item.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{detect_cluster, ClusterThresholds, Direction};
    use crate::confidence::{assess_confidence, CredibilityTable};

    fn thresholds() -> ClusterThresholds {
        ClusterThresholds {
            strong_positive: 0.6,
            strong_negative: -0.6,
            cluster_count: 3,
            top_n: 5,
        }
    }

    #[test]
    fn test_bullish_render() {
        let window = vec![
            NewsItem::new("Chip demand soars", "https://www.reuters.com/a", 0.9, 0),
            NewsItem::new("Record data center sales", "https://www.cnbc.com/b", 0.8, 0),
            NewsItem::new("Analysts upgrade", "https://blog.example/c", 0.7, 0)
                .with_source_url("https://www.barrons.com"),
            NewsItem::new("Export curbs widen", "https://www.wsj.com/d", -0.7, 0),
        ];
        let cluster = detect_cluster(&window, &thresholds()).unwrap();
        assert_eq!(cluster.direction, Direction::Bullish);
        let table = CredibilityTable::default();
        let confidence = assess_confidence(&cluster.contributing, &table, 60.0, 60);

        let text = AlertMessage::new("NVDA", 180, &cluster, &confidence).render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            format!(
                "NVDA could rise significantly (last 180m) · bullish · confidence {}",
                confidence.label
            )
        );
        assert_eq!(lines[1], "• Chip demand soars [reuters.com] (score +0.90)");
        assert_eq!(lines[2], "• Record data center sales [cnbc.com] (score +0.80)");
        assert_eq!(lines[3], "• Analysts upgrade [barrons.com] (score +0.70)");
        assert_eq!(lines[4], "Counterpoint: Export curbs widen [wsj.com] (score -0.70)");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_bearish_without_counterpoint() {
        let window: Vec<NewsItem> = (0..3)
            .map(|i| NewsItem::new("", format!("https://apnews.com/{}", i), -0.8, 0))
            .collect();
        let cluster = detect_cluster(&window, &thresholds()).unwrap();
        let table = CredibilityTable::default();
        let confidence = assess_confidence(&cluster.contributing, &table, 60.0, 60);

        let text = AlertMessage::new("TSLA", 90, &cluster, &confidence).render();
        assert!(text.starts_with("TSLA could decrease significantly (last 90m) · bearish"));
        assert!(text.contains("• https://apnews.com/0 [apnews.com] (score -0.80)"));
        assert!(!text.contains("Counterpoint"));
    }
}
