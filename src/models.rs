use serde::{Deserialize, Serialize};

/// Parameters accepted by the settings conversion endpoint
#[derive(Debug, Default, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertParams {
    /// Legacy whole view path to split into view root and relative path
    #[serde(rename = "view-path-value")]
    pub view_path_value: Option<String>,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
