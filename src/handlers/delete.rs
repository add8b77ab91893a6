use crate::asset_id::AssetId;
use crate::error::{ApiError, ErrorResponse};
use crate::models::DeleteResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// DELETE /assets/{asset_id} handler - Delete an asset
#[utoipa::path(
    delete,
    path = routes::ASSET_ITEM,
    params(
        ("asset_id" = String, Path, description = "24 hex character asset id")
    ),
    responses(
        (status = 200, description = "Asset deleted", body = DeleteResponse),
        (status = 400, description = "Invalid asset id", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 502, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    ),
    tag = "assets"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let id: AssetId = id_str.parse()?;

    if !state.store.delete(id).await? {
        return Err(ApiError::AssetNotFound(id));
    }

    tracing::info!("Deleted asset with id: {}", id);
    Ok((StatusCode::OK, Json(DeleteResponse::deleted())))
}
