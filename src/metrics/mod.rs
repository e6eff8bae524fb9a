pub mod middleware;

pub use middleware::MetricsMiddleware;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

// The recorder is process-global; every AppMetrics shares this handle.
static PROMETHEUS_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

#[derive(Clone)]
pub struct AppMetrics {
    prometheus_handle: Option<PrometheusHandle>,
}

impl AppMetrics {
    pub fn new() -> Self {
        let handle = PROMETHEUS_HANDLE.get_or_init(|| {
            let builder = PrometheusBuilder::new().set_buckets_for_metric(
                Matcher::Full("http_requests_duration_seconds".to_string()),
                &[0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0],
            );

            let recorder = builder.and_then(|builder| {
                Self::describe_metrics();
                builder.install_recorder()
            });

            match recorder {
                Ok(handle) => Some(handle),
                Err(e) => {
                    ::tracing::error!(error = %e, "Failed to install Prometheus recorder");
                    None
                }
            }
        });

        Self {
            prometheus_handle: handle.clone(),
        }
    }

    fn describe_metrics() {
        // HTTP metrics
        describe_counter!("http_requests_total", "Total number of HTTP requests");
        describe_histogram!(
            "http_requests_duration_seconds",
            "HTTP request duration in seconds"
        );
        describe_gauge!(
            "http_requests_in_flight",
            "Number of HTTP requests currently being processed"
        );

        // Auth metrics
        describe_counter!(
            "auth_registrations_total",
            "Total number of registration attempts by outcome"
        );
        describe_counter!(
            "auth_login_attempts_total",
            "Total number of login attempts by outcome"
        );
        describe_counter!("auth_logouts_total", "Total number of logouts");
        describe_counter!(
            "auth_access_denied_total",
            "Requests to protected pages without a valid session"
        );
    }

    // HTTP metrics
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        counter!(
            "http_requests_total",
            "method" => method.to_string(),
            "path" => path.to_string(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            "http_requests_duration_seconds",
            "method" => method.to_string(),
            "path" => path.to_string()
        )
        .record(duration_secs);
    }

    pub fn http_request_start(&self) {
        gauge!("http_requests_in_flight").increment(1.0);
    }

    pub fn http_request_end(&self) {
        gauge!("http_requests_in_flight").decrement(1.0);
    }

    // Auth metrics
    pub fn record_registration(&self, result: &'static str) {
        counter!("auth_registrations_total", "result" => result).increment(1);
    }

    pub fn record_login_attempt(&self, success: bool) {
        let result = if success { "success" } else { "failure" };
        counter!("auth_login_attempts_total", "result" => result).increment(1);
    }

    pub fn record_logout(&self) {
        counter!("auth_logouts_total").increment(1);
    }

    pub fn record_access_denied(&self) {
        counter!("auth_access_denied_total").increment(1);
    }

    // Prometheus export
    pub fn render(&self) -> String {
        self.prometheus_handle
            .as_ref()
            .map(PrometheusHandle::render)
            .unwrap_or_default()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}
