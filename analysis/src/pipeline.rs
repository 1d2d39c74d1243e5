use crate::aggregate::{build_records, summarize};
use crate::url::extract_video_id;
use commentscope_core::{
    AnalysisReport, AppConfig, CoreError, ErrorReporter, PipelineError, DEFAULT_USEFUL_THRESHOLD,
};
use sentiment_engine::{PolarityScorer, VaderScorer};
use tracing::{debug, info, warn};
use youtube_client::{CommentThread, CommentThreadSource, YouTubeApiClient};

/// Raw threads gathered by one pagination loop.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub threads: Vec<CommentThread>,
    pub pages_fetched: usize,
    /// User-facing message of the failure that stopped pagination early.
    pub error: Option<String>,
}

pub fn validate_url(url: &str) -> Result<String, PipelineError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(PipelineError::EmptyUrl);
    }
    extract_video_id(url).ok_or_else(|| PipelineError::InvalidUrl {
        url: url.to_string(),
    })
}

pub struct Pipeline<S, P> {
    source: S,
    scorer: P,
    useful_threshold: f64,
    reporter: ErrorReporter,
}

impl<S, P> Pipeline<S, P>
where
    S: CommentThreadSource,
    P: PolarityScorer,
{
    pub fn new(source: S, scorer: P) -> Self {
        Self {
            source,
            scorer,
            useful_threshold: DEFAULT_USEFUL_THRESHOLD,
            reporter: ErrorReporter::new(),
        }
    }

    pub fn with_threshold(mut self, useful_threshold: f64) -> Self {
        self.useful_threshold = useful_threshold;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Follows continuation tokens until the last page or the first failure.
    ///
    /// A failed page contributes nothing; threads from earlier pages are kept.
    pub async fn fetch_all(&self, video_id: &str) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();
        let mut next_page_token: Option<String> = None;

        loop {
            let page = match self
                .source
                .list_comment_threads(video_id, next_page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        "Stopping pagination for {} after {} pages",
                        video_id, outcome.pages_fetched
                    );
                    outcome.error = Some(self.reporter.report_error(&e));
                    break;
                }
            };

            outcome.pages_fetched += 1;
            next_page_token = page.next_page_token().map(str::to_string);
            outcome.threads.extend(page.items);
            debug!(
                "Page {} done, {} threads so far",
                outcome.pages_fetched,
                outcome.threads.len()
            );

            if next_page_token.is_none() {
                break;
            }
        }

        outcome
    }

    /// Fetches, scores and summarises the comments of one video.
    pub async fn analyze_video(&self, video_id: &str) -> AnalysisReport {
        info!("Fetching comments for video {}", video_id);
        let outcome = self.fetch_all(video_id).await;

        let records = build_records(&outcome.threads, &self.scorer);
        let summary = summarize(&records, self.useful_threshold);
        info!(
            "Total comments fetched: {} ({} pages{})",
            records.len(),
            outcome.pages_fetched,
            if outcome.error.is_some() { ", truncated" } else { "" }
        );

        AnalysisReport {
            video_id: video_id.to_string(),
            records,
            pages_fetched: outcome.pages_fetched,
            fetch_error: outcome.error,
            summary,
        }
    }

    pub async fn run(&self, url: &str) -> Result<AnalysisReport, PipelineError> {
        let video_id = validate_url(url)?;
        Ok(self.analyze_video(&video_id).await)
    }
}

/// Runs the whole dashboard pipeline for one URL against the live API.
///
/// Input problems are returned as errors before any request is made; every
/// later failure is folded into the report.
pub async fn run_pipeline(url: &str, config: &AppConfig) -> Result<AnalysisReport, PipelineError> {
    config.require_api_key()?;
    let video_id = validate_url(url)?;

    let client = match YouTubeApiClient::from_config(config) {
        Ok(client) => client,
        Err(e) => return Ok(unreachable_api_report(video_id, &e)),
    };

    let pipeline =
        Pipeline::new(client, VaderScorer::new()).with_threshold(config.useful_threshold);
    let report = pipeline.analyze_video(&video_id).await;

    let metrics = pipeline.source().get_metrics().await;
    info!(
        "API requests: {} total, {} failed, avg {:?}",
        metrics.total_requests,
        metrics.failed_requests,
        metrics.average_response_time()
    );
    if let Ok(exported) = pipeline.source().export_metrics().await {
        debug!("API metrics: {}", exported);
    }

    Ok(report)
}

fn unreachable_api_report(video_id: String, error: &CoreError) -> AnalysisReport {
    let message = ErrorReporter::new().report_error(error);
    AnalysisReport {
        video_id,
        records: Vec::new(),
        pages_fetched: 0,
        fetch_error: Some(message),
        summary: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert_eq!(validate_url(""), Err(PipelineError::EmptyUrl));
        assert_eq!(validate_url("   "), Err(PipelineError::EmptyUrl));
        assert_eq!(
            validate_url("https://youtu.be/abc"),
            Err(PipelineError::InvalidUrl {
                url: "https://youtu.be/abc".to_string()
            })
        );
        assert_eq!(
            validate_url(" https://www.youtube.com/watch?v=abc "),
            Ok("abc".to_string())
        );
    }

    #[test]
    fn test_run_pipeline_requires_credential_first() {
        let config = AppConfig::default();
        let result = tokio_test::block_on(run_pipeline("", &config));
        assert_eq!(result.unwrap_err(), PipelineError::MissingCredential);
    }

    #[test]
    fn test_run_pipeline_rejects_bad_url_before_network() {
        let config = AppConfig {
            api_key: Some("key".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(
            tokio_test::block_on(run_pipeline("", &config)).unwrap_err(),
            PipelineError::EmptyUrl
        );
        assert!(matches!(
            tokio_test::block_on(run_pipeline("https://example.com/video", &config)),
            Err(PipelineError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_unbuildable_client_is_folded_into_report() {
        let config = AppConfig {
            api_key: Some("key".to_string()),
            api_base_url: "not a base url".to_string(),
            ..AppConfig::default()
        };
        let report =
            tokio_test::block_on(run_pipeline("https://www.youtube.com/watch?v=abc", &config))
                .unwrap();

        assert_eq!(report.video_id, "abc");
        assert_eq!(report.total_fetched(), 0);
        assert!(report.is_truncated());
        assert!(report.summary.is_none());
    }
}
