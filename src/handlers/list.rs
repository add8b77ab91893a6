use crate::error::{ApiError, ErrorResponse};
use crate::models::Asset;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /employees/{employee_id}/assets/ handler - List an employee's assets
///
/// Matches `employee_id` exactly. An employee with no assets gets an empty
/// list, never a 404.
#[utoipa::path(
    get,
    path = routes::EMPLOYEE_ASSETS,
    params(
        ("employee_id" = String, Path, description = "Employee the assets are assigned to")
    ),
    responses(
        (status = 200, description = "Assets assigned to the employee", body = Vec<Asset>),
        (status = 502, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse)
    ),
    tag = "assets"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<(StatusCode, Json<Vec<Asset>>), ApiError> {
    let assets = state.store.find_by_employee(&employee_id).await?;

    tracing::info!("Listed {} assets for employee {}", assets.len(), employee_id);
    Ok((StatusCode::OK, Json(assets)))
}
