use super::*;
use crate::config::ProfileConfig;
use crate::error::ApiError;

#[tokio::test]
async fn test_list_configs_hides_token() {
    let (app, _sync, _design, _dir) = create_test_app(0).await;

    let response = app.oneshot(get_request("/api/v1/configs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let profiles = json.as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["index"], 0);
    assert_eq!(profiles[0]["page_title"], "Icons");
    assert_eq!(profiles[0]["has_token"], true);
    assert!(profiles[0].get("token").is_none());
    assert!(!json.to_string().contains("fig_test"));
}

#[tokio::test]
async fn test_list_configs_flags_missing_values() {
    let design = Arc::new(FakeDesign::new(icons_document(Vec::new())));
    let incomplete = ProfileConfig {
        page_title: "Icons".into(),
        ..Default::default()
    };
    let (sync, _store, _dir) = create_test_sync(design, vec![incomplete]).await;
    let sync = Arc::new(sync);
    let app = create_router(sync.clone(), sync.config());

    let json = json_body(app.oneshot(get_request("/api/v1/configs")).await.unwrap()).await;
    let missing: Vec<&str> = json[0]["missing"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    assert!(missing.contains(&"token"));
    assert!(missing.contains(&"file_id"));
    assert!(missing.contains(&"assets_container"));
    assert!(!missing.contains(&"page_title"));
}

#[tokio::test]
async fn test_info_reports_counts() {
    let (app, _sync, _design, _dir) = create_test_app(4).await;

    let response = app.oneshot(post_request("/api/v1/info/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["available"], 4);
    assert_eq!(json["skipped"], 0);
    assert_eq!(
        json["text"],
        "There are 4 assets available in Figma. (0 already exist in the store.)"
    );
}

#[tokio::test]
async fn test_import_then_import_again() {
    let (app, _sync, design, _dir) = create_test_app(3).await;

    let json = json_body(app.clone().oneshot(post_request("/api/v1/import/0")).await.unwrap()).await;
    assert_eq!(json["imported"], 3);
    assert_eq!(json["reimported"], 0);
    assert_eq!(json["skipped"], 0);
    assert_eq!(json["text"], "Imported 3, reimported 0, skipped 0.");

    let json = json_body(app.oneshot(post_request("/api/v1/import/0")).await.unwrap()).await;
    assert_eq!(json["imported"], 0);
    assert_eq!(json["skipped"], 3);
    assert_eq!(design.download_calls.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_reimport_overwrites() {
    let (app, sync, _design, _dir) = create_test_app(2).await;
    sync.import(0).await.unwrap();

    let response = app.oneshot(post_request("/api/v1/reimport/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["imported"], 0);
    assert_eq!(json["reimported"], 2);
    assert!(json.get("skipped").is_none());
    assert_eq!(json["text"], "Imported 0, reimported 2.");
}

#[tokio::test]
async fn test_unknown_profile_is_404() {
    let (app, _sync, _design, _dir) = create_test_app(0).await;

    for uri in ["/api/v1/info/7", "/api/v1/import/7", "/api/v1/reimport/7"] {
        let response = app.clone().oneshot(post_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let api_error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(api_error.error.code, "profile_not_found");
    }
}

#[tokio::test]
async fn test_missing_page_is_404_with_message() {
    let design = Arc::new(FakeDesign::new(icons_document(numbered_icons(1))));
    let profile = ProfileConfig {
        page_title: "Logos".into(),
        ..icons_profile()
    };
    let (sync, _store, _dir) = create_test_sync(design, vec![profile]).await;
    let sync = Arc::new(sync);
    let app = create_router(sync.clone(), sync.config());

    let response = app.oneshot(post_request("/api/v1/import/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "page_not_found");
    assert_eq!(json["error"]["message"], "cannot find page \"Logos\"");
}

#[tokio::test]
async fn test_non_numeric_index_is_rejected() {
    let (app, _sync, _design, _dir) = create_test_app(0).await;

    let response = app.oneshot(post_request("/api/v1/import/first")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_progress_defaults_to_processing() {
    let (app, _sync, _design, _dir) = create_test_app(0).await;

    let response = app.oneshot(get_request("/api/v1/progress/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["message"], "Processing...");
}

#[tokio::test]
async fn test_progress_unknown_profile_has_no_message() {
    let (app, _sync, _design, _dir) = create_test_app(0).await;

    let response = app.oneshot(get_request("/api/v1/progress/9")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn test_progress_during_run() {
    // One download per sub-batch keeps the run long enough to observe
    let design = Arc::new(FakeDesign::new(icons_document(numbered_icons(40))));
    let profile = ProfileConfig {
        download_batch_size: 1,
        ..icons_profile()
    };
    let (sync, _store, _dir) = create_test_sync(design, vec![profile]).await;
    let sync = Arc::new(sync);
    let app = create_router(sync.clone(), sync.config());

    let run = tokio::spawn({
        let sync = sync.clone();
        async move { sync.import(0).await }
    });

    // Poll until the run has persisted at least one asset
    let mut seen = None;
    for _ in 0..200 {
        let json = json_body(app.clone().oneshot(get_request("/api/v1/progress/0")).await.unwrap()).await;
        let message = json["message"].as_str().unwrap().to_string();
        if message.starts_with("Imported ") {
            seen = Some(message);
            break;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let summary = run.await.unwrap().unwrap();
    assert_eq!(summary.imported, 40);
    let message = seen.expect("progress message should be observed during the run");
    assert!(message.ends_with("/40"), "{message}");

    // Cleared once the run finished
    let json = json_body(app.oneshot(get_request("/api/v1/progress/0")).await.unwrap()).await;
    assert_eq!(json["message"], "Processing...");
}
