use crate::asset_id::AssetId;
use crate::error::{ApiError, AppJson, ErrorResponse};
use crate::models::{Asset, AssetUpdate};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// PUT /assets/{asset_id} handler - Update an asset
///
/// Only non-null fields are written; everything else keeps its stored value.
/// The body is extracted before the id is parsed, so a malformed body
/// answers 400/415/422 even when the id is also invalid.
#[utoipa::path(
    put,
    path = routes::ASSET_ITEM,
    params(
        ("asset_id" = String, Path, description = "24 hex character asset id")
    ),
    request_body = AssetUpdate,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 400, description = "Invalid asset id or no fields to update", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 422, description = "Mistyped field", body = ErrorResponse),
        (status = 502, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    ),
    tag = "assets"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    AppJson(update): AppJson<AssetUpdate>,
) -> Result<(StatusCode, Json<Asset>), ApiError> {
    let id: AssetId = id_str.parse()?;

    if update.is_empty() {
        return Err(ApiError::NoFieldsToUpdate);
    }

    if !state.store.update(id, &update).await? {
        return Err(ApiError::AssetNotFound(id));
    }

    let updated = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::AssetNotFound(id))?;

    tracing::info!("Updated asset with id: {}", id);
    Ok((StatusCode::OK, Json(updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{create_asset, send, setup_test_app};
    use serde_json::json;

    #[tokio::test]
    async fn test_update_endpoint_preserves_untouched_fields() {
        let (app, _store) = setup_test_app().await;
        let created = create_asset(&app, "E1", "Laptop").await;
        let uri = format!("/assets/{}", created["id"].as_str().unwrap());

        let (status, updated) = send(&app, "PUT", &uri, Some(json!({"condition": "damaged"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["condition"], "damaged");
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["employee_id"], created["employee_id"]);
        assert_eq!(updated["asset_names"], created["asset_names"]);
        assert_eq!(updated["asset_ids"], created["asset_ids"]);

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_endpoint_null_does_not_clear() {
        let (app, _store) = setup_test_app().await;
        let created = create_asset(&app, "E1", "Laptop").await;
        let uri = format!("/assets/{}", created["id"].as_str().unwrap());

        send(&app, "PUT", &uri, Some(json!({"serial_number": "SN-1"}))).await;
        let (status, updated) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({"serial_number": null, "employee_id": "E2"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["serial_number"], "SN-1");
        assert_eq!(updated["employee_id"], "E2");
    }

    #[tokio::test]
    async fn test_update_endpoint_same_values_succeeds() {
        let (app, _store) = setup_test_app().await;
        let created = create_asset(&app, "E1", "Laptop").await;
        let uri = format!("/assets/{}", created["id"].as_str().unwrap());

        let (status, updated) = send(&app, "PUT", &uri, Some(json!({"employee_id": "E1"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_update_endpoint_no_fields() {
        let (app, _store) = setup_test_app().await;
        let created = create_asset(&app, "E1", "Laptop").await;
        let uri = format!("/assets/{}", created["id"].as_str().unwrap());

        for body in [json!({}), json!({"condition": null, "asset_ids": null})] {
            let (status, error) = send(&app, "PUT", &uri, Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            let error_response: ErrorResponse = serde_json::from_value(error).unwrap();
            assert_eq!(error_response.detail, "No fields to update");
        }
    }

    #[tokio::test]
    async fn test_update_endpoint_not_found() {
        let (app, _store) = setup_test_app().await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/assets/{}", AssetId::generate()),
            Some(json!({"condition": "used"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error_response: ErrorResponse = serde_json::from_value(body).unwrap();
        assert_eq!(error_response.detail, "Asset not found");
    }

    #[tokio::test]
    async fn test_update_endpoint_invalid_id() {
        let (app, _store) = setup_test_app().await;
        create_asset(&app, "E1", "Laptop").await;

        let (status, body) = send(
            &app,
            "PUT",
            "/assets/not-an-id",
            Some(json!({"condition": "used"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error_response: ErrorResponse = serde_json::from_value(body).unwrap();
        assert_eq!(error_response.detail, "Invalid asset ID");
    }

    #[tokio::test]
    async fn test_update_endpoint_body_checked_before_id() {
        let (app, _store) = setup_test_app().await;

        let (status, _) = send(
            &app,
            "PUT",
            "/assets/not-an-id",
            Some(json!({"asset_names": "Laptop"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(&app, "PUT", "/assets/not-an-id", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_endpoint_mistyped_field() {
        let (app, _store) = setup_test_app().await;
        let created = create_asset(&app, "E1", "Laptop").await;
        let uri = format!("/assets/{}", created["id"].as_str().unwrap());

        let (status, _) = send(&app, "PUT", &uri, Some(json!({"asset_names": "Laptop"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
