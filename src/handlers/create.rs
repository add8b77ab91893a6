use crate::error::{ApiError, AppJson, ErrorResponse};
use crate::models::{Asset, NewAsset};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /assets/ handler - Create an asset
///
/// The store assigns the id; the response is the record as read back after
/// the insert.
#[utoipa::path(
    post,
    path = routes::ASSETS,
    request_body = NewAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 422, description = "Missing or mistyped required field", body = ErrorResponse),
        (status = 502, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    ),
    tag = "assets"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    AppJson(asset): AppJson<NewAsset>,
) -> Result<(StatusCode, Json<Asset>), ApiError> {
    let id = state.store.insert(asset).await?;

    // Deleted between the insert and this read
    let created = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::AssetNotFound(id))?;

    tracing::info!(
        "Created asset {} for employee {}",
        id,
        created.employee_id
    );
    Ok((StatusCode::CREATED, Json(created)))
}
