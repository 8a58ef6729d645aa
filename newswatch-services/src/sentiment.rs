//! Headline sentiment scoring
//!
//! The engine only needs `text -> score in [-1, 1]`. `SentimentScorer` is that
//! capability; `VaderScorer` is the built-in implementation, returning the
//! VADER compound valence of the text.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Longest input (in characters) handed to a scorer
pub const MAX_SCORING_CHARS: usize = 2000;

/// Maps text to a sentiment score in [-1.0, 1.0]
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64 + Send + Sync,
{
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Score text through `scorer` with bounded input and a guaranteed range.
///
/// Blank text scores 0.0 without calling the scorer. Results outside [-1, 1]
/// are clamped, NaN becomes 0.0.
pub fn score_text(scorer: &dyn SentimentScorer, text: &str) -> f64 {
    let bounded: String = text.chars().take(MAX_SCORING_CHARS).collect();
    if bounded.trim().is_empty() {
        return 0.0;
    }

    let score = scorer.score(&bounded);
    if score.is_nan() {
        0.0
    } else {
        score.clamp(-1.0, 1.0)
    }
}

/// VADER compound-score sentiment scorer
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}
