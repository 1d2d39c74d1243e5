pub mod api;
pub mod metrics;

pub use api::{
    parse_comment_threads, Comment, CommentSnippet, CommentThread, CommentThreadListResponse,
    CommentThreadSnippet, CommentThreadSource, YouTubeApiClient, COMMENT_THREADS_ENDPOINT,
    MAX_RESULTS_PER_PAGE,
};
pub use metrics::{ApiMetrics, MetricsCollector, RequestMetrics};
