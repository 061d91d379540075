//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, timeout, metrics)
//! - Serve on a bound listener until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::{autocomplete, course_details, courses, health, seo, units};
use crate::config::CacheConfig;
use crate::observability::metrics;
use crate::upstream::{CatalogSource, ContentSource};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers. Immutable once built.
#[derive(Clone)]
pub struct AppState {
    pub cms: Arc<dyn ContentSource>,
    pub catalog: Arc<dyn CatalogSource>,
    pub cache: CacheConfig,
}

impl AppState {
    pub fn new(
        cms: Arc<dyn ContentSource>,
        catalog: Arc<dyn CatalogSource>,
        cache: CacheConfig,
    ) -> Self {
        Self { cms, catalog, cache }
    }
}

/// HTTP server for the BFF.
pub struct BffServer {
    router: Router,
}

impl BffServer {
    pub fn new(state: AppState, request_timeout: Duration) -> Self {
        Self {
            router: build_router(state, request_timeout),
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The request id set by `SetRequestIdLayer`, or `-` when absent.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request.headers()),
    )
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let request_id_header = HeaderName::from_static(X_REQUEST_ID);

    Router::new()
        .route("/courses", get(courses::list_courses))
        .route("/courses/autocomplete", get(autocomplete::autocomplete))
        .route("/courses/{slug}", get(course_details::course_details))
        .route("/courses/{slug}/units", get(units::units_by_course))
        .route("/seos", get(seo::seos))
        .route("/health", get(health::health))
        .route_layer(middleware::from_fn(metrics::track_requests))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::GATEWAY_TIMEOUT,
                    request_timeout,
                ))
                .layer(PropagateRequestIdLayer::new(request_id_header)),
        )
}
