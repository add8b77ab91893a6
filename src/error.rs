use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::asset_id::{AssetId, InvalidAssetId};
use crate::store::StoreError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every variant maps to one HTTP status and is rendered as an
/// [`ErrorResponse`] body.
#[derive(Debug)]
pub enum ApiError {
    /// Path identifier is not a valid ObjectId
    InvalidAssetId(String),
    /// Update body has no non-null fields
    NoFieldsToUpdate,
    /// Request body could not be extracted
    InvalidPayload { status: StatusCode, message: String },
    /// No asset with this id
    AssetNotFound(AssetId),
    /// Store not connected or already closed
    StoreUnavailable(String),
    /// Store reachable but the operation failed
    StoreFailure(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::InvalidAssetId(raw) => {
                tracing::debug!("Rejected asset id: '{}'", raw);
                (StatusCode::BAD_REQUEST, "Invalid asset ID".to_string())
            }
            ApiError::NoFieldsToUpdate => {
                (StatusCode::BAD_REQUEST, "No fields to update".to_string())
            }
            ApiError::InvalidPayload { status, message } => (status, message),
            ApiError::AssetNotFound(id) => {
                tracing::info!("Asset not found with id: {}", id);
                (StatusCode::NOT_FOUND, "Asset not found".to_string())
            }
            ApiError::StoreUnavailable(msg) => {
                tracing::error!("Asset store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Asset store unavailable: {}", msg),
                )
            }
            ApiError::StoreFailure(msg) => {
                tracing::error!("Asset store error: {}", msg);
                (StatusCode::BAD_GATEWAY, format!("Asset store error: {}", msg))
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal error: {}", msg),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<InvalidAssetId> for ApiError {
    fn from(err: InvalidAssetId) -> Self {
        ApiError::InvalidAssetId(err.0)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ApiError::StoreUnavailable(msg),
            StoreError::Upstream(err) => ApiError::StoreFailure(err.to_string()),
            StoreError::UnexpectedId(id) => {
                ApiError::Internal(format!("unexpected identifier returned by store: {}", id))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidPayload {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// JSON body extractor whose rejections render as [`ErrorResponse`]
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
