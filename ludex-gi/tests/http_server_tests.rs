//! HTTP server and routing integration tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use ludex_gi::services::steam_client::SteamClient;
use ludex_gi::{build_router, AppState};

/// Create test app state with an in-memory database
async fn test_app_state(media_dir: &std::path::Path) -> AppState {
    let db_pool = sqlx::SqlitePool::connect(":memory:").await.unwrap();
    ludex_gi::db::init_tables(&db_pool).await.unwrap();

    let steam = Arc::new(SteamClient::new("kr", "koreana").unwrap());

    AppState::new(db_pool, steam, media_dir.to_path_buf())
}

#[tokio::test]
async fn health_endpoint_returns_json() {
    let media = tempfile::tempdir().unwrap();
    let state = test_app_state(media.path()).await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type");
    assert!(
        content_type.is_some()
            && content_type
                .unwrap()
                .to_str()
                .unwrap()
                .contains("application/json"),
        "/api/health should return JSON"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "ludex-gi");
    assert!(json["version"].is_string());
    assert!(json["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn search_without_term_is_bad_request() {
    let media = tempfile::tempdir().unwrap();
    let state = test_app_state(media.path()).await;

    for uri in ["/api/search", "/api/search?term=", "/api/search?term=%20"] {
        let app = build_router(state.clone());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{} should be rejected before any upstream call",
            uri
        );
    }
}

#[tokio::test]
async fn app_detail_rejects_non_numeric_appid() {
    let media = tempfile::tempdir().unwrap();
    let state = test_app_state(media.path()).await;

    for uri in ["/api/app/abc", "/api/app/12a", "/api/app/12a/requirements"] {
        let app = build_router(state.clone());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn register_rejects_invalid_appid() {
    let media = tempfile::tempdir().unwrap();
    let state = test_app_state(media.path()).await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"appid": "not-a-number"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn register_rejects_missing_appid() {
    let media = tempfile::tempdir().unwrap();
    let state = test_app_state(media.path()).await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_without_json_body_is_not_found_free() {
    let media = tempfile::tempdir().unwrap();
    let state = test_app_state(media.path()).await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Route exists; only the body is rejected
    assert_ne!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn benchmark_rows_can_be_loaded() {
    let media = tempfile::tempdir().unwrap();
    let state = test_app_state(media.path()).await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/benchmarks")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"table": "cpu_tb", "entries": [
                        {"model": "AMD Ryzen 5 3600", "score": 800.0},
                        {"model": "Intel Core i5-9400F", "score": 850.0},
                        {"model": "   ", "score": 1.0}
                    ]}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["table"], "cpu_tb");
    // Blank model names are skipped
    assert_eq!(json["inserted"], 2);

    let count = ludex_gi::db::benchmarks::count(
        &state.db,
        ludex_gi::services::hardware::HardwareTable::Cpu,
    )
    .await
    .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn benchmark_load_requires_entries() {
    let media = tempfile::tempdir().unwrap();
    let state = test_app_state(media.path()).await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/benchmarks")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"table": "gpu_tb", "entries": []}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let media = tempfile::tempdir().unwrap();
    let state = test_app_state(media.path()).await;
    let app = build_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
