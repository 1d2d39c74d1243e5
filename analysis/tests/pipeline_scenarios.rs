use analysis::{polarity_histogram, read_csv, to_csv_string, Gauge, Pipeline, HISTOGRAM_BINS};
use chrono::{Duration, TimeZone, Utc};
use commentscope_core::{CoreError, PipelineError, Verdict, YouTubeApiError};
use sentiment_engine::{PolarityScorer, VaderScorer};
use std::sync::Mutex;
use youtube_client::{
    Comment, CommentSnippet, CommentThread, CommentThreadListResponse, CommentThreadSnippet,
    CommentThreadSource,
};

/// Serves scripted pages in order and records the tokens it was asked for.
struct ScriptedSource {
    pages: Mutex<Vec<Result<CommentThreadListResponse, CoreError>>>,
    requested_tokens: Mutex<Vec<Option<String>>>,
}

impl ScriptedSource {
    fn new(mut pages: Vec<Result<CommentThreadListResponse, CoreError>>) -> Self {
        pages.reverse();
        Self {
            pages: Mutex::new(pages),
            requested_tokens: Mutex::new(Vec::new()),
        }
    }

    fn requested_tokens(&self) -> Vec<Option<String>> {
        self.requested_tokens.lock().unwrap().clone()
    }
}

impl CommentThreadSource for ScriptedSource {
    async fn list_comment_threads(
        &self,
        _video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, CoreError> {
        self.requested_tokens
            .lock()
            .unwrap()
            .push(page_token.map(str::to_string));
        self.pages
            .lock()
            .unwrap()
            .pop()
            .expect("pipeline requested more pages than scripted")
    }
}

/// Fixed polarities per comment text, so summaries are exact.
struct TableScorer(&'static [(&'static str, f64)]);

impl PolarityScorer for TableScorer {
    fn polarity(&self, text: &str) -> f64 {
        self.0
            .iter()
            .find(|(known, _)| *known == text)
            .map_or(0.0, |(_, polarity)| *polarity)
    }
}

const TABLE: TableScorer = TableScorer(&[
    ("This is great", 0.8),
    ("very bad", -0.91),
    ("mildly nice", 0.05),
]);

fn thread(index: usize, text: &str) -> CommentThread {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    CommentThread {
        snippet: CommentThreadSnippet {
            top_level_comment: Comment {
                snippet: CommentSnippet {
                    author_display_name: format!("@user{}", index),
                    text_display: text.to_string(),
                    like_count: index as u64,
                    // later comments are published earlier
                    published_at: base - Duration::minutes(index as i64),
                },
            },
        },
    }
}

fn page(range: std::ops::Range<usize>, text: &str, token: Option<&str>) -> CommentThreadListResponse {
    CommentThreadListResponse {
        next_page_token: token.map(str::to_string),
        items: range.map(|i| thread(i, text)).collect(),
    }
}

const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1s";

#[tokio::test]
async fn test_two_pages_are_concatenated() {
    let source = ScriptedSource::new(vec![
        Ok(page(0..100, "great video", Some("T2"))),
        Ok(page(100..105, "great video", None)),
    ]);
    let pipeline = Pipeline::new(source, VaderScorer::new());

    let report = pipeline.run(WATCH_URL).await.unwrap();

    assert_eq!(report.video_id, "dQw4w9WgXcQ");
    assert_eq!(report.total_fetched(), 105);
    assert_eq!(report.records.len(), 105);
    assert_eq!(report.fetched_message(), "Total comments fetched: 105");
    assert_eq!(report.pages_fetched, 2);
    assert!(!report.is_truncated());
    assert_eq!(
        pipeline.source().requested_tokens(),
        vec![None, Some("T2".to_string())]
    );

    // arrival order is kept across pages
    assert_eq!(report.records[0].author, "@user0");
    assert_eq!(report.records[99].author, "@user99");
    assert_eq!(report.records[104].author, "@user104");
}

#[tokio::test]
async fn test_transport_error_truncates_but_keeps_records() {
    let source = ScriptedSource::new(vec![
        Ok(page(0..50, "not bad", Some("T2"))),
        Err(CoreError::YouTubeApi(YouTubeApiError::HttpStatus {
            status_code: 500,
            endpoint: "/commentThreads".to_string(),
        })),
    ]);
    let pipeline = Pipeline::new(source, VaderScorer::new());

    let report = pipeline.run(WATCH_URL).await.unwrap();

    assert_eq!(report.total_fetched(), 50);
    assert_eq!(report.pages_fetched, 1);
    assert_eq!(report.fetch_error.as_deref(), Some("HTTP Error: 500"));
    assert!(report.summary.is_some());
}

#[tokio::test]
async fn test_unexpected_error_on_first_page_yields_empty_report() {
    let source = ScriptedSource::new(vec![Err(CoreError::YouTubeApi(YouTubeApiError::Schema {
        details: "missing field `items`".to_string(),
    }))]);
    let pipeline = Pipeline::new(source, VaderScorer::new());

    let report = pipeline.run(WATCH_URL).await.unwrap();

    assert_eq!(report.total_fetched(), 0);
    assert!(report.summary.is_none());
    assert!(report.score_message().is_none());
    assert!(report
        .fetch_error
        .as_deref()
        .unwrap()
        .starts_with("An error occurred: "));
}

#[tokio::test]
async fn test_empty_token_ends_pagination() {
    let source = ScriptedSource::new(vec![Ok(page(0..3, "ok", Some("")))]);
    let pipeline = Pipeline::new(source, VaderScorer::new());

    let report = pipeline.run(WATCH_URL).await.unwrap();

    assert_eq!(report.total_fetched(), 3);
    assert_eq!(pipeline.source().requested_tokens().len(), 1);
}

#[tokio::test]
async fn test_invalid_url_makes_no_requests() {
    let source = ScriptedSource::new(Vec::new());
    let pipeline = Pipeline::new(source, VaderScorer::new());

    let result = pipeline.run("https://youtu.be/dQw4w9WgXcQ").await;

    assert!(matches!(result, Err(PipelineError::InvalidUrl { .. })));
    assert!(pipeline.source().requested_tokens().is_empty());
}

#[tokio::test]
async fn test_summary_verdict_and_charts() {
    let source = ScriptedSource::new(vec![
        Ok(page(0..2, "This is great", Some("T2"))),
        Ok(page(2..4, "very bad", None)),
    ]);
    let pipeline = Pipeline::new(source, TABLE);

    let report = pipeline.run(WATCH_URL).await.unwrap();
    let summary = report.summary.unwrap();

    // (0.8 + 0.8 - 0.91 - 0.91) / 4
    assert!((summary.mean_polarity + 0.055).abs() < 1e-9);
    assert!((summary.score - 47.25).abs() < 1e-9);
    assert_eq!(summary.verdict, Verdict::NotUseful);
    assert_eq!(
        report.score_message().as_deref(),
        Some("Overall Sentiment Score: 47.25/100")
    );
    assert!((Gauge::from_score(summary.score).filled_degrees - 170.1).abs() < 1e-9);

    let histogram = polarity_histogram(&report.records, HISTOGRAM_BINS);
    assert_eq!(histogram.first().unwrap().count, 2);
    assert_eq!(histogram.last().unwrap().count, 2);
}

#[tokio::test]
async fn test_threshold_is_configurable() {
    let strict = Pipeline::new(
        ScriptedSource::new(vec![Ok(page(0..1, "mildly nice", None))]),
        TABLE,
    );
    let lenient = Pipeline::new(
        ScriptedSource::new(vec![Ok(page(0..1, "mildly nice", None))]),
        TABLE,
    )
    .with_threshold(0.05);

    let strict_report = strict.run(WATCH_URL).await.unwrap();
    let lenient_report = lenient.run(WATCH_URL).await.unwrap();

    assert_eq!(strict_report.summary.unwrap().verdict, Verdict::NotUseful);
    assert_eq!(lenient_report.summary.unwrap().verdict, Verdict::Useful);
}

#[tokio::test]
async fn test_exported_csv_matches_table() {
    let source = ScriptedSource::new(vec![Ok(page(0..10, "Thanks, \"nice\" work!", None))]);
    let pipeline = Pipeline::new(source, VaderScorer::new());

    let report = pipeline.run(WATCH_URL).await.unwrap();
    let csv = to_csv_string(&report.records).unwrap();
    let parsed = read_csv(csv.as_bytes()).unwrap();

    assert_eq!(parsed, report.records);
}

#[tokio::test]
async fn test_live_scorer_separates_praise_from_complaints() {
    let source = ScriptedSource::new(vec![
        Ok(page(0..3, "Terrific, pleasant and genuinely insightful tutorial", Some("T2"))),
        Ok(page(3..4, "This video is worthless and dull", None)),
    ]);
    let pipeline = Pipeline::new(source, VaderScorer::new());

    let report = pipeline.run(WATCH_URL).await.unwrap();

    assert!(report.records[..3].iter().all(|record| record.polarity > 0.5));
    assert!(report.records[3].polarity < 0.0);
    let summary = report.summary.unwrap();
    assert_eq!(summary.verdict, Verdict::Useful);
    assert!((summary.score - (summary.mean_polarity + 1.0) * 50.0).abs() < 1e-9);
}
