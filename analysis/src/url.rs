use regex::Regex;
use std::sync::LazyLock;

static VIDEO_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v=([^&]+)").expect("valid regex"));

/// Returns the value of the first non-empty `v=` parameter in `url`.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERN
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}
