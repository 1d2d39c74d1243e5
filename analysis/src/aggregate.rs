use commentscope_core::{CommentRecord, SentimentSummary, Verdict};
use sentiment_engine::PolarityScorer;
use youtube_client::CommentThread;

pub fn build_record<P: PolarityScorer>(thread: &CommentThread, scorer: &P) -> CommentRecord {
    let comment = thread.comment();
    CommentRecord {
        author: comment.author_display_name.clone(),
        text: comment.text_display.clone(),
        like_count: comment.like_count,
        published_at: comment.published_at,
        polarity: scorer.polarity(&comment.text_display),
    }
}

/// One scored record per thread, in arrival order.
pub fn build_records<P: PolarityScorer>(threads: &[CommentThread], scorer: &P) -> Vec<CommentRecord> {
    threads
        .iter()
        .map(|thread| build_record(thread, scorer))
        .collect()
}

/// Maps a mean polarity in `[-1, 1]` onto a `[0, 100]` score.
pub fn calculate_score(mean_polarity: f64) -> f64 {
    (mean_polarity + 1.0) * 50.0
}

pub fn classify(mean_polarity: f64, threshold: f64) -> Verdict {
    if mean_polarity >= threshold {
        Verdict::Useful
    } else {
        Verdict::NotUseful
    }
}

pub fn mean_polarity(records: &[CommentRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|record| record.polarity).sum();
    Some(total / records.len() as f64)
}

pub fn summarize(records: &[CommentRecord], threshold: f64) -> Option<SentimentSummary> {
    mean_polarity(records).map(|mean| SentimentSummary {
        mean_polarity: mean,
        score: calculate_score(mean),
        verdict: classify(mean, threshold),
    })
}
