//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bff_requests_total` (counter): requests by route, status
//! - `bff_request_duration_seconds` (histogram): latency by route
//! - `bff_upstream_requests_total` (counter): upstream calls by upstream, endpoint, outcome
//! - `bff_enrichment_fallbacks_total` (counter): course details served unenriched
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! metrics-disabled deployments pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::upstream::{Upstream, UpstreamError};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "bff_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("bff_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_call<T>(upstream: Upstream, endpoint: &str, result: &Result<T, UpstreamError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) if e.is_not_found() => "not_found",
        Err(UpstreamError::Transport(..)) => "transport_error",
        Err(UpstreamError::Decode(..)) => "decode_error",
        Err(_) => "error",
    };
    metrics::counter!(
        "bff_upstream_requests_total",
        "upstream" => upstream.as_str(),
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_enrichment_fallback(reason: &'static str) {
    metrics::counter!("bff_enrichment_fallbacks_total", "reason" => reason).increment(1);
}

/// Per-request metrics middleware keyed by the matched route template.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&route, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamResult;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_request("/courses", 200, Instant::now());
        let ok: UpstreamResult<()> = Ok(());
        record_upstream_call(Upstream::Cms, "seos", &ok);
        record_enrichment_fallback("upstream_error");
    }
}
