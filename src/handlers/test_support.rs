use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower::ServiceExt;

use crate::routes;
use crate::state::AppState;
use crate::store::{AssetStore, MemoryAssetStore};

/// Full router over a connected in-memory store, plus the store itself
pub(crate) async fn setup_test_app() -> (Router, Arc<MemoryAssetStore>) {
    let store = Arc::new(MemoryAssetStore::new());
    store
        .connect()
        .await
        .expect("Failed to connect in-memory store");

    let app = routes::router(AppState::new(store.clone()));
    (app, store)
}

/// Send one request and decode the JSON response body
pub(crate) async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// POST a minimal asset for `employee_id` and return the created body
pub(crate) async fn create_asset(app: &Router, employee_id: &str, name: &str) -> JsonValue {
    let (status, body) = send(
        app,
        "POST",
        "/assets/",
        Some(serde_json::json!({
            "employee_id": employee_id,
            "asset_names": [name],
            "asset_ids": [format!("{}-1", name)]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}
