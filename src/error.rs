use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::payload::{self, ConversionResponse};

pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Error type for the conversion endpoint
///
/// Conversion failures travel inside a regular response document; this type
/// only covers failures of the server itself. It renders as the same XML
/// shape so the client still finds an `error` child.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Background task running the conversion did not complete
    #[error("conversion task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        let body = payload::encode(&ConversionResponse::Error {
            message: self.to_string(),
        });

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
            body,
        )
            .into_response()
    }
}
