//! Reqwest clients against a local mock upstream.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;

use course_bff::config::{CacheConfig, UpstreamConfig};
use course_bff::http::{build_router, AppState};
use course_bff::query::{AutocompleteKind, CoursesQueryParams, EnrichmentKey};
use course_bff::upstream::{
    CatalogSource, ClientApiClient, CmsClient, CmsQuery, ContentSource, FilterOp, Upstream,
    UpstreamError,
};

mod common;
use common::{get, start_mock_upstream, FakeCms, Reply};

/// Nothing listens on port 1, so connecting fails at the transport layer.
fn unreachable_config() -> UpstreamConfig {
    UpstreamConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_token: None,
        timeout_secs: 2,
    }
}

fn upstream_config(addr: std::net::SocketAddr, path: &str, token: Option<&str>) -> UpstreamConfig {
    UpstreamConfig {
        base_url: format!("http://{addr}{path}"),
        api_token: token.map(str::to_string),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_cms_fetch_renders_query_and_headers() {
    let (addr, recorded) = start_mock_upstream(200, json!({ "data": [{ "id": 1 }], "meta": {} })).await;
    let cms = CmsClient::new(&upstream_config(addr, "/api", Some("secret"))).unwrap();

    let query = CmsQuery::new()
        .filter(&["institution", "slug"], FilterOp::Eq, "unifacs")
        .populate_all();
    let envelope = cms.fetch("seos", &query, true).await.unwrap();
    assert_eq!(envelope.data.len(), 1);

    let requests = recorded.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.path, "/api/seos");
    assert_eq!(request.param("filters[institution][slug][$eq]"), Some("unifacs"));
    assert_eq!(request.param("populate"), Some("*"));
    assert_eq!(request.headers.get("authorization").unwrap(), "Bearer secret");
    assert_eq!(request.headers.get("cache-control").unwrap(), "no-cache");
    assert_eq!(request.headers.get("pragma").unwrap(), "no-cache");
}

#[tokio::test]
async fn test_cms_without_no_cache_sends_no_cache_headers() {
    let (addr, recorded) = start_mock_upstream(200, json!({ "data": [] })).await;
    let cms = CmsClient::new(&upstream_config(addr, "", None)).unwrap();

    cms.fetch("courses", &CmsQuery::new(), false).await.unwrap();

    let requests = recorded.lock().unwrap();
    assert!(requests[0].headers.get("cache-control").is_none());
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_cms_404_is_tagged_not_found() {
    let (addr, _) = start_mock_upstream(404, json!({ "error": "missing" })).await;
    let cms = CmsClient::new(&upstream_config(addr, "", None)).unwrap();

    let err = cms.fetch("seos", &CmsQuery::new(), false).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.upstream(), Upstream::Cms);
}

#[tokio::test]
async fn test_client_api_status_error_keeps_body() {
    let (addr, _) = start_mock_upstream(502, json!({ "error": "bad gateway" })).await;
    let catalog = ClientApiClient::new(&upstream_config(addr, "", None)).unwrap();

    let err = catalog.autocomplete(AutocompleteKind::Cities, "sal").await.unwrap_err();
    assert_matches!(err, UpstreamError::Status { upstream: Upstream::ClientApi, ref body, .. } if body.contains("bad gateway"));
}

#[tokio::test]
async fn test_client_api_courses_forwards_params() {
    let (addr, recorded) = start_mock_upstream(
        200,
        json!({ "data": [], "total": 0 }),
    )
    .await;
    let catalog = ClientApiClient::new(&upstream_config(addr, "/v1", Some("t0k3n"))).unwrap();

    let raw: HashMap<String, String> = [("institution", "unifacs"), ("perPage", "6"), ("level", "graduacao")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let page = catalog.fetch_courses(&CoursesQueryParams::parse(&raw)).await.unwrap();
    assert_eq!(page.total, 0);

    let requests = recorded.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.path, "/v1/courses");
    assert_eq!(request.param("institution"), Some("unifacs"));
    assert_eq!(request.param("perPage"), Some("6"));
    assert_eq!(request.param("level"), Some("graduacao"));
    assert_eq!(request.headers.get("accept").unwrap(), "application/json");
}

#[tokio::test]
async fn test_client_api_course_details_key() {
    let (addr, recorded) = start_mock_upstream(200, json!({ "sku": "DIR-01", "offerings": [] })).await;
    let catalog = ClientApiClient::new(&upstream_config(addr, "", None)).unwrap();

    let key = EnrichmentKey {
        institution: "unifacs".to_string(),
        state: "BA".to_string(),
        city: "Salvador".to_string(),
        unit_id: "10".to_string(),
        sku: "DIR-01".to_string(),
    };
    let details = catalog.fetch_course_details(&key).await.unwrap();
    assert_eq!(details.sku, "DIR-01");

    let requests = recorded.lock().unwrap();
    assert_eq!(requests[0].path, "/course-details");
    assert_eq!(requests[0].param("unitId"), Some("10"));
    assert_eq!(requests[0].param("city"), Some("Salvador"));
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let (addr, _) = start_mock_upstream(200, json!({ "unexpected": true })).await;
    let catalog = ClientApiClient::new(&upstream_config(addr, "", None)).unwrap();

    let key = EnrichmentKey {
        institution: "unifacs".to_string(),
        state: "BA".to_string(),
        city: "Salvador".to_string(),
        unit_id: "10".to_string(),
        sku: "DIR-01".to_string(),
    };
    let err = catalog.fetch_course_details(&key).await.unwrap_err();
    assert_matches!(err, UpstreamError::Decode(Upstream::ClientApi, _));
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    let catalog = ClientApiClient::new(&unreachable_config()).unwrap();

    let err = catalog
        .fetch_courses(&CoursesQueryParams::default())
        .await
        .unwrap_err();
    assert_matches!(err, UpstreamError::Transport(Upstream::ClientApi, _));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_unreachable_upstream_answers_500() {
    let catalog = ClientApiClient::new(&unreachable_config()).unwrap();
    let state = AppState::new(
        FakeCms::new(Reply::Status(500)),
        Arc::new(catalog),
        CacheConfig::default(),
    );
    let app = build_router(state, Duration::from_secs(5));

    let (status, _, body) = get(app, "/courses").await;
    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(!body["error"].as_str().unwrap().contains("127.0.0.1"));
}
