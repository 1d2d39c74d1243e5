use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mean polarity at or above which a video counts as useful.
pub const DEFAULT_USEFUL_THRESHOLD: f64 = 0.1;

/// One scored top-level comment. Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Comment")]
    pub text: String,
    #[serde(rename = "Likes")]
    pub like_count: u64,
    #[serde(rename = "Time")]
    pub published_at: DateTime<Utc>,
    #[serde(rename = "Sentiment")]
    pub polarity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Useful,
    NotUseful,
}

impl Verdict {
    pub fn is_useful(&self) -> bool {
        matches!(self, Verdict::Useful)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Useful => "Based on the comments analysis, this video is considered useful.",
            Verdict::NotUseful => {
                "Based on the comments analysis, this video is not considered useful."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentSummary {
    pub mean_polarity: f64,
    /// `mean_polarity` mapped onto 0..=100.
    pub score: f64,
    pub verdict: Verdict,
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub video_id: String,
    pub records: Vec<CommentRecord>,
    pub pages_fetched: usize,
    /// User-facing message for the page failure that cut pagination short.
    pub fetch_error: Option<String>,
    /// `None` when no comments were fetched.
    pub summary: Option<SentimentSummary>,
}

impl AnalysisReport {
    pub fn total_fetched(&self) -> usize {
        self.records.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.fetch_error.is_some()
    }

    pub fn fetched_message(&self) -> String {
        format!("Total comments fetched: {}", self.total_fetched())
    }

    pub fn score_message(&self) -> Option<String> {
        self.summary
            .map(|summary| format!("Overall Sentiment Score: {:.2}/100", summary.score))
    }
}
