use crate::asset_id::AssetId;
use crate::error::{ApiError, ErrorResponse};
use crate::models::Asset;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, extract::Path, http::StatusCode, Json};

/// GET /assets/{asset_id} handler - Retrieve one asset
#[utoipa::path(
    get,
    path = routes::ASSET_ITEM,
    params(
        ("asset_id" = String, Path, description = "24 hex character asset id")
    ),
    responses(
        (status = 200, description = "Asset found", body = Asset),
        (status = 400, description = "Invalid asset id", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 502, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    ),
    tag = "assets"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<Asset>), ApiError> {
    let id: AssetId = id_str.parse()?;

    match state.store.find_by_id(id).await? {
        Some(asset) => {
            tracing::debug!("Retrieved asset with id: {}", id);
            Ok((StatusCode::OK, Json(asset)))
        }
        None => Err(ApiError::AssetNotFound(id)),
    }
}
