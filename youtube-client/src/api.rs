use crate::metrics::{MetricsCollector, RequestMetrics};
use chrono::{DateTime, Utc};
use commentscope_core::{AppConfig, CoreError, YouTubeApiError};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use url::Url;

pub const COMMENT_THREADS_ENDPOINT: &str = "/commentThreads";
pub const MAX_RESULTS_PER_PAGE: u32 = 100;

/// One page of `commentThreads.list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub items: Vec<CommentThread>,
}

impl CommentThreadListResponse {
    /// The continuation token, treating an empty string as absent.
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub top_level_comment: Comment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    pub author_display_name: String,
    pub text_display: String,
    pub like_count: u64,
    pub published_at: DateTime<Utc>,
}

impl CommentThread {
    pub fn comment(&self) -> &CommentSnippet {
        &self.snippet.top_level_comment.snippet
    }
}

/// Anything that can serve pages of comment threads for a video.
pub trait CommentThreadSource {
    async fn list_comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, CoreError>;
}

pub fn parse_comment_threads(body: &str) -> Result<CommentThreadListResponse, CoreError> {
    serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse comment threads: {}", e);
        CoreError::YouTubeApi(YouTubeApiError::Schema {
            details: e.to_string(),
        })
    })
}

#[derive(Debug)]
pub struct YouTubeApiClient {
    http_client: Client,
    endpoint: Url,
    api_key: String,
    metrics: Arc<MetricsCollector>,
    user_agent: String,
}

impl YouTubeApiClient {
    pub fn new(
        api_key: String,
        base_url: &str,
        user_agent: String,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let endpoint_str = format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            COMMENT_THREADS_ENDPOINT
        );
        let endpoint = Url::parse(&endpoint_str).map_err(|e| {
            CoreError::YouTubeApi(YouTubeApiError::ClientBuild {
                reason: format!("invalid endpoint {}: {}", endpoint_str, e),
            })
        })?;

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                CoreError::YouTubeApi(YouTubeApiError::ClientBuild {
                    reason: e.to_string(),
                })
            })?;

        Ok(Self {
            http_client,
            endpoint,
            api_key,
            metrics: Arc::new(MetricsCollector::new()),
            user_agent,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let api_key = config.require_api_key()?;
        Self::new(
            api_key.to_string(),
            &config.api_base_url,
            config.user_agent.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Query parameters for one `commentThreads.list` call, minus the key.
    pub fn comment_threads_query(
        video_id: &str,
        page_token: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("videoId", video_id.to_string()),
            ("textFormat", "plainText".to_string()),
            ("maxResults", MAX_RESULTS_PER_PAGE.to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        params
    }

    async fn make_request(&self, query_params: &[(&str, String)]) -> Result<Response, CoreError> {
        let start_time = Instant::now();

        let request_builder = self
            .http_client
            .get(self.endpoint.clone())
            .query(query_params)
            .query(&[("key", self.api_key.as_str())]);

        info!("Making YouTube API request: GET {}", COMMENT_THREADS_ENDPOINT);
        let result = match request_builder.send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Request successful: {}", response.status());
                Ok(response)
            }
            Ok(response) => {
                let status_code = response.status().as_u16();
                error!(
                    "Request failed with status: {} for {}",
                    response.status(),
                    COMMENT_THREADS_ENDPOINT
                );
                Err(CoreError::YouTubeApi(YouTubeApiError::HttpStatus {
                    status_code,
                    endpoint: COMMENT_THREADS_ENDPOINT.to_string(),
                }))
            }
            Err(e) => {
                error!("Network error for {}: {}", COMMENT_THREADS_ENDPOINT, e);
                if e.is_timeout() {
                    Err(CoreError::YouTubeApi(YouTubeApiError::RequestTimeout))
                } else {
                    Err(CoreError::Network(e))
                }
            }
        };

        let request_metrics = RequestMetrics {
            status_code: match &result {
                Ok(response) => Some(response.status().as_u16()),
                Err(CoreError::YouTubeApi(YouTubeApiError::HttpStatus { status_code, .. })) => {
                    Some(*status_code)
                }
                Err(_) => None,
            },
            response_time: start_time.elapsed(),
            success: result.is_ok(),
            error_type: result.as_ref().err().map(|e| match e {
                CoreError::YouTubeApi(YouTubeApiError::HttpStatus { .. }) => {
                    "http_status".to_string()
                }
                CoreError::YouTubeApi(YouTubeApiError::RequestTimeout) => "timeout".to_string(),
                _ => "network_error".to_string(),
            }),
        };
        self.metrics.record_request(request_metrics).await;

        result
    }

    pub async fn get_metrics(&self) -> crate::metrics::ApiMetrics {
        self.metrics.get_metrics().await
    }

    pub async fn export_metrics(&self) -> Result<String, CoreError> {
        Ok(self.metrics.export_metrics().await?)
    }
}

impl CommentThreadSource for YouTubeApiClient {
    async fn list_comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, CoreError> {
        let params = Self::comment_threads_query(video_id, page_token);
        let response = self.make_request(&params).await?;
        let body = response.text().await?;
        let page = parse_comment_threads(&body)?;

        info!(
            "Retrieved {} comment threads for video {} (more pages: {})",
            page.items.len(),
            video_id,
            page.next_page_token().is_some()
        );
        Ok(page)
    }
}
