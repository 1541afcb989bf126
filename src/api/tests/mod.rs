use super::*;
use crate::sync::test_helpers::{
    FakeDesign, create_test_sync, icons_document, icons_profile, numbered_icons,
};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

mod sync;

/// Router over a fake design file with `count` icons and one profile
async fn create_test_app(count: usize) -> (Router, Arc<AssetSync>, Arc<FakeDesign>, tempfile::TempDir) {
    let design = Arc::new(FakeDesign::new(icons_document(numbered_icons(count))));
    let (sync, _store, dir) = create_test_sync(design.clone(), vec![icons_profile()]).await;
    let sync = Arc::new(sync);
    let app = create_router(sync.clone(), sync.config());
    (app, sync, design, dir)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_api_server_spawns_and_stops() {
    let (_app, sync, _design, _dir) = create_test_app(0).await;

    let mut config = (*sync.config()).clone();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let config = Arc::new(config);

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(serve(sync, config, async move {
        rx.await.ok();
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cors_enabled() {
    let (_app, sync, _design, _dir) = create_test_app(0).await;

    let mut config = (*sync.config()).clone();
    config.server.api.cors_enabled = true;
    config.server.api.cors_origins = vec!["*".to_string()];
    let app = create_router(sync, Arc::new(config));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present"
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let (_app, sync, _design, _dir) = create_test_app(0).await;

    let mut config = (*sync.config()).clone();
    config.server.api.cors_origins = vec!["http://panel.local".to_string()];
    let app = create_router(sync, Arc::new(config));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://panel.local")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://panel.local"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let (_app, sync, _design, _dir) = create_test_app(0).await;

    let mut config = (*sync.config()).clone();
    config.server.api.cors_enabled = false;
    let app = create_router(sync, Arc::new(config));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_swagger_ui_toggle() {
    let (app, sync, _design, _dir) = create_test_app(0).await;

    let response = app.oneshot(get_request("/swagger-ui/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut config = (*sync.config()).clone();
    config.server.api.swagger_ui = false;
    let app = create_router(sync, Arc::new(config));

    let response = app.oneshot(get_request("/swagger-ui/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
