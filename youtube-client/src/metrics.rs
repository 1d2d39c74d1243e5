use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMetrics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub total_response_time: Duration,
    pub max_response_time: Duration,
    pub last_request_time: Option<SystemTime>,
    pub responses_by_status: HashMap<u16, u64>,
    pub errors_by_type: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct RequestMetrics {
    pub status_code: Option<u16>,
    pub response_time: Duration,
    pub success: bool,
    pub error_type: Option<String>,
}

impl ApiMetrics {
    pub fn average_response_time(&self) -> Duration {
        if self.total_requests == 0 {
            return Duration::ZERO;
        }
        let mean_nanos = self.total_response_time.as_nanos() / u128::from(self.total_requests);
        u64::try_from(mean_nanos)
            .map(Duration::from_nanos)
            .unwrap_or(Duration::MAX)
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.successful_requests as f64 / self.total_requests as f64
        }
    }
}

/// Per-client request bookkeeping, shared behind an async lock.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    metrics: Arc<RwLock<ApiMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_request(&self, request_metrics: RequestMetrics) {
        let mut metrics = self.metrics.write().await;

        metrics.total_requests += 1;
        metrics.last_request_time = Some(SystemTime::now());

        if request_metrics.success {
            metrics.successful_requests += 1;
        } else {
            metrics.failed_requests += 1;
        }

        if let Some(status) = request_metrics.status_code {
            *metrics.responses_by_status.entry(status).or_insert(0) += 1;
        }
        if let Some(error_type) = request_metrics.error_type {
            *metrics.errors_by_type.entry(error_type).or_insert(0) += 1;
        }

        metrics.total_response_time = metrics
            .total_response_time
            .saturating_add(request_metrics.response_time);
        metrics.max_response_time = metrics.max_response_time.max(request_metrics.response_time);
    }

    pub async fn get_metrics(&self) -> ApiMetrics {
        self.metrics.read().await.clone()
    }

    pub async fn export_metrics(&self) -> Result<String, serde_json::Error> {
        let metrics = self.get_metrics().await;
        serde_json::to_string_pretty(&metrics)
    }
}
