use utoipa::OpenApi;

use crate::handlers;
use crate::models::{ConvertParams, HealthResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "cc-settings-converter API",
        version = "1.0.0",
        description = "Converts legacy ClearCase view path settings into a view root and a relative path"
    ),
    paths(
        handlers::health::health_handler,
        handlers::convert::convert_query_handler,
        handlers::convert::convert_form_handler
    ),
    components(
        schemas(
            ConvertParams,
            HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "settings", description = "VCS settings conversion")
    )
)]
pub struct ApiDoc;
