use crate::PolarityScorer;
use tracing::trace;
use vader_sentiment::SentimentIntensityAnalyzer;

const COMPOUND_KEY: &str = "compound";

/// Scores texts with the VADER lexicon and rule set.
///
/// The polarity is VADER's normalised compound score, so negations, boosters,
/// capitalisation, punctuation emphasis and emoticons all count.
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

impl std::fmt::Debug for VaderScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaderScorer").finish_non_exhaustive()
    }
}

/// Keeps a raw model score inside `[-1.0, 1.0]`; non-finite scores are neutral.
pub fn to_polarity(compound: f64) -> f64 {
    if compound.is_finite() {
        compound.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

impl PolarityScorer for VaderScorer {
    fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let scores = self.analyzer.polarity_scores(text);
        let compound = scores.get(COMPOUND_KEY).copied().unwrap_or(0.0);
        trace!("compound {:.4} for {:?}", compound, text);
        to_polarity(compound)
    }
}
