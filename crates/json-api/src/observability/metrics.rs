//! Prometheus metrics.
//!
//! HTTP traffic is recorded by the request logging middleware; workflow handlers count
//! each committed transition with [`record_transition`].

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct ApiMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    workflow_transitions_total: IntCounterVec,
}

static API_METRICS: OnceLock<Option<ApiMetrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a committed workflow transition, e.g. `("payment", "verify")`.
pub(crate) fn record_transition(entity: &str, action: &str) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .workflow_transitions_total
        .with_label_values(&[entity, action])
        .inc();
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metric_families, &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    let content_type = match HeaderValue::from_str(encoder.format_type()) {
        Ok(value) => value,
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static ApiMetrics> {
    API_METRICS
        .get_or_init(|| match ApiMetrics::register(Registry::new()) {
            Ok(metrics) => Some(metrics),
            Err(source) => {
                error!("failed to build prometheus metrics, /metrics will return 500: {source}");

                None
            }
        })
        .as_ref()
}

impl ApiMetrics {
    fn register(registry: Registry) -> prometheus::Result<Self> {
        let requests_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "fishery_json_http_requests_total",
                    "HTTP requests by method, route, status class and status code.",
                ),
                &["method", "route", "status_class", "status_code"],
            )?,
        )?;

        let request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "fishery_json_http_request_duration_seconds",
                    "HTTP request duration in seconds by method and route.",
                )
                .buckets(DURATION_BUCKETS.to_vec()),
                &["method", "route"],
            )?,
        )?;

        let requests_in_flight = register(
            &registry,
            IntGauge::with_opts(Opts::new(
                "fishery_json_http_requests_in_flight",
                "HTTP requests currently being served.",
            ))?,
        )?;

        let workflow_transitions_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "fishery_json_workflow_transitions_total",
                    "Committed workflow transitions by entity and action.",
                ),
                &["entity", "action"],
            )?,
        )?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            workflow_transitions_total,
        })
    }
}

fn register<C>(registry: &Registry, collector: C) -> prometheus::Result<C>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };

    use super::{metrics_handler, observe_request, record_transition, status_class};

    #[test]
    fn status_codes_group_by_class() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(409), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_http_metrics() {
        observe_request("GET", "/registrations", 200, 0.042);
        observe_request("GET", "/registrations", 500, 0.123);
        record_transition("payment", "verify");

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let response_result = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await;

        let response: String = response_result.unwrap_or_default();

        assert!(
            response.contains("fishery_json_http_requests_total"),
            "expected requests_total metric in response"
        );
        assert!(
            response.contains("fishery_json_http_request_duration_seconds"),
            "expected request_duration metric in response"
        );
        assert!(
            response.contains("fishery_json_http_requests_in_flight"),
            "expected in-flight metric in response"
        );
        assert!(
            response.contains("fishery_json_workflow_transitions_total"),
            "expected workflow transition counter in response"
        );
    }
}
