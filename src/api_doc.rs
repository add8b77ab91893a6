use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{Asset, AssetUpdate, DeleteResponse, NewAsset};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-mongo-assets API",
        version = "1.0.0",
        description = "Asset records assigned to employees, backed by MongoDB"
    ),
    paths(
        handlers::health::health_handler,
        handlers::create::create_handler,
        handlers::get::get_handler,
        handlers::list::list_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            NewAsset,
            AssetUpdate,
            Asset,
            DeleteResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "assets", description = "Asset record operations")
    )
)]
pub struct ApiDoc;
