//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use course_bff::config::CacheConfig;
use course_bff::http::{build_router, AppState};
use course_bff::query::{AutocompleteKind, CoursesQueryParams, EnrichmentKey, UnitsByCourseQuery};
use course_bff::upstream::dto::{
    AutocompletePageDto, CatalogCourseDetailsDto, CmsEnvelope, CoursesPageDto, UnitsByCourseDto,
};
use course_bff::upstream::{
    CatalogSource, CmsQuery, ContentSource, Upstream, UpstreamError, UpstreamResult,
};

/// Canned upstream answer.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    NotFound,
    Status(u16),
    Undecodable,
}

impl Reply {
    fn into_result<T: DeserializeOwned>(self, upstream: Upstream) -> UpstreamResult<T> {
        match self {
            Reply::Json(value) => serde_json::from_value(value)
                .map_err(|e| UpstreamError::Decode(upstream, e.to_string())),
            Reply::NotFound => Err(UpstreamError::NotFound {
                upstream,
                resource: "fake".to_string(),
            }),
            Reply::Status(code) => Err(UpstreamError::Status {
                upstream,
                status: StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body: "fake failure".to_string(),
            }),
            Reply::Undecodable => Err(UpstreamError::Decode(upstream, "Network timeout".to_string())),
        }
    }
}

/// CMS double that counts calls and remembers the last request.
pub struct FakeCms {
    reply: Reply,
    pub calls: AtomicUsize,
    pub last_no_cache: AtomicBool,
    pub last_collection: Mutex<Option<String>>,
    pub last_query: Mutex<Option<CmsQuery>>,
}

impl FakeCms {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_no_cache: AtomicBool::new(false),
            last_collection: Mutex::new(None),
            last_query: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for FakeCms {
    async fn fetch(
        &self,
        collection: &str,
        query: &CmsQuery,
        no_cache: bool,
    ) -> UpstreamResult<CmsEnvelope<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_no_cache.store(no_cache, Ordering::SeqCst);
        *self.last_collection.lock().unwrap() = Some(collection.to_string());
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.reply.clone().into_result(Upstream::Cms)
    }
}

/// Client API double with one canned reply per operation.
pub struct FakeCatalog {
    pub courses: Reply,
    pub autocomplete: Reply,
    pub details: Reply,
    pub units: Reply,
    pub calls: AtomicUsize,
    pub last_key: Mutex<Option<EnrichmentKey>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            courses: Reply::Status(500),
            autocomplete: Reply::Status(500),
            details: Reply::Status(500),
            units: Reply::Status(500),
            calls: AtomicUsize::new(0),
            last_key: Mutex::new(None),
        }
    }

    pub fn with_courses(mut self, reply: Reply) -> Self {
        self.courses = reply;
        self
    }

    pub fn with_autocomplete(mut self, reply: Reply) -> Self {
        self.autocomplete = reply;
        self
    }

    pub fn with_details(mut self, reply: Reply) -> Self {
        self.details = reply;
        self
    }

    pub fn with_units(mut self, reply: Reply) -> Self {
        self.units = reply;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_courses(&self, _params: &CoursesQueryParams) -> UpstreamResult<CoursesPageDto> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.courses.clone().into_result(Upstream::ClientApi)
    }

    async fn autocomplete(
        &self,
        _kind: AutocompleteKind,
        _term: &str,
    ) -> UpstreamResult<AutocompletePageDto> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.autocomplete.clone().into_result(Upstream::ClientApi)
    }

    async fn fetch_course_details(
        &self,
        key: &EnrichmentKey,
    ) -> UpstreamResult<CatalogCourseDetailsDto> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(key.clone());
        self.details.clone().into_result(Upstream::ClientApi)
    }

    async fn fetch_units_by_course(
        &self,
        _query: &UnitsByCourseQuery,
    ) -> UpstreamResult<UnitsByCourseDto> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.units.clone().into_result(Upstream::ClientApi)
    }
}

pub fn build_test_app(cms: Arc<FakeCms>, catalog: Arc<FakeCatalog>, cache: CacheConfig) -> Router {
    build_router(AppState::new(cms, catalog, cache), Duration::from_secs(5))
}

/// Issue a GET through the router and decode the JSON body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

/// Request as seen by a mock upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Start a mock upstream on an ephemeral port that answers every request
/// with `status` and `body`, recording what it received.
pub async fn start_mock_upstream(
    status: u16,
    body: Value,
) -> (SocketAddr, Arc<Mutex<Vec<Recorded>>>) {
    let recorded: Arc<Mutex<Vec<Recorded>>> = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    let app = Router::new().fallback(move |request: Request<Body>| {
        let log = log.clone();
        let body = body.clone();
        async move {
            let query = request
                .uri()
                .query()
                .map(|q| {
                    url::form_urlencoded::parse(q.as_bytes())
                        .into_owned()
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            log.lock().unwrap().push(Recorded {
                path: request.uri().path().to_string(),
                query,
                headers: request.headers().clone(),
            });
            (
                StatusCode::from_u16(status).unwrap(),
                axum::Json(body),
            )
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, recorded)
}
