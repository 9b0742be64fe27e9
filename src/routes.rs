// Route path constants - single source of truth for all HTTP paths

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{convert_form_handler, convert_query_handler, health_handler, openapi_handler};

pub const HEALTH: &str = "/health";
pub const API_DOCS: &str = "/api-docs/openapi.json";
pub const CONVERT_OLD_SETTINGS: &str = "/admin/convertOldCCSettings.html";

/// Name of the request parameter carrying the legacy view path
pub const VIEW_PATH_PARAM: &str = "view-path-value";

/// Build the application router
pub fn router() -> Router {
    Router::new()
        .route(HEALTH, get(health_handler))
        .route(API_DOCS, get(openapi_handler))
        .route(
            CONVERT_OLD_SETTINGS,
            get(convert_query_handler).post(convert_form_handler),
        )
        .layer(TraceLayer::new_for_http())
}
