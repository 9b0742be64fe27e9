use crate::error::{ApiError, XML_CONTENT_TYPE};
use crate::models::ConvertParams;
use crate::payload::{self, ConversionResponse};
use crate::routes;
use crate::view_path;
use axum::{
    extract::{Form, Query},
    http::{header, StatusCode},
    response::IntoResponse,
};

/// GET /admin/convertOldCCSettings.html handler - Convert legacy view path settings
///
/// Conversion failures are reported inside the XML document as an `error`
/// child, not through the status code.
#[utoipa::path(
    get,
    path = routes::CONVERT_OLD_SETTINGS,
    params(ConvertParams),
    responses(
        (status = 200, description = "Conversion result document", body = String, content_type = "text/xml"),
        (status = 500, description = "Conversion could not run", body = String, content_type = "text/xml")
    ),
    tag = "settings"
)]
pub async fn convert_query_handler(
    Query(params): Query<ConvertParams>,
) -> Result<impl IntoResponse, ApiError> {
    convert(params).await
}

/// POST /admin/convertOldCCSettings.html handler - Form-encoded variant
#[utoipa::path(
    post,
    path = routes::CONVERT_OLD_SETTINGS,
    request_body(content = ConvertParams, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Conversion result document", body = String, content_type = "text/xml"),
        (status = 500, description = "Conversion could not run", body = String, content_type = "text/xml")
    ),
    tag = "settings"
)]
pub async fn convert_form_handler(
    Form(params): Form<ConvertParams>,
) -> Result<impl IntoResponse, ApiError> {
    convert(params).await
}

async fn convert(params: ConvertParams) -> Result<impl IntoResponse, ApiError> {
    let Some(old_view_path) = params.view_path_value.filter(|v| !v.trim().is_empty()) else {
        tracing::debug!("No {} given, nothing to convert", routes::VIEW_PATH_PARAM);
        return Ok(xml(payload::empty_document()));
    };

    // resolution walks the filesystem
    let path = old_view_path.clone();
    let resolved = tokio::task::spawn_blocking(move || view_path::resolve(&path)).await?;

    let response = match resolved {
        Ok(view_path) => {
            tracing::info!("Converted {} to {}", old_view_path, view_path);
            ConversionResponse::Converted {
                view_path: view_path.view_root().to_string(),
                rel_path: view_path.relative_path().to_string(),
            }
        }
        Err(e) => {
            tracing::info!("Cannot convert {}: {}", old_view_path, e);
            ConversionResponse::Error {
                message: e.to_string(),
            }
        }
    };

    Ok(xml(payload::encode(&response)))
}

fn xml(body: String) -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::PayloadError;
    use crate::view_path::normalize_path;
    use axum::{body::Body, http::Request, Router};
    use std::fs;
    use std::path::MAIN_SEPARATOR;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn setup_test_app() -> Router {
        routes::router()
    }

    /// views/dev_view holds view.dat, eprom/tools lives inside it
    fn view_fixture() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let view = dir.path().join("views").join("dev_view");
        fs::create_dir_all(view.join("eprom").join("tools")).unwrap();
        fs::write(view.join("view.dat"), "").unwrap();
        dir
    }

    fn form_body(view_path: &str) -> String {
        let mut body = String::from("view-path-value=");
        for byte in view_path.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                    body.push(byte as char)
                }
                _ => body.push_str(&format!("%{:02X}", byte)),
            }
        }
        body
    }

    async fn post_form(app: Router, body: String) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(routes::CONVERT_OLD_SETTINGS)
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            XML_CONTENT_TYPE
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_convert_endpoint_success() {
        let dir = view_fixture();
        let whole = dir.path().join("views/dev_view/eprom/tools");

        let (status, body) = post_form(setup_test_app(), form_body(&whole.to_string_lossy())).await;

        assert_eq!(status, StatusCode::OK);
        let expected_root = normalize_path(&dir.path().join("views/dev_view").to_string_lossy());
        assert_eq!(
            payload::decode(Some(&body)).unwrap(),
            ConversionResponse::Converted {
                view_path: expected_root,
                rel_path: format!("eprom{}tools", MAIN_SEPARATOR),
            }
        );
        assert!(body.contains("<cc-view-path>"));
        assert!(body.contains("<rel-path>"));
    }

    #[tokio::test]
    async fn test_convert_endpoint_reports_resolution_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let (status, body) = post_form(setup_test_app(), form_body(&missing.to_string_lossy())).await;

        assert_eq!(status, StatusCode::OK);
        match payload::decode(Some(&body)).unwrap() {
            ConversionResponse::Error { message } => {
                assert!(message.contains("not a directory"));
            }
            other => panic!("expected error payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_convert_endpoint_blank_parameter() {
        let (status, body) = post_form(setup_test_app(), form_body("   ")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(matches!(
            payload::decode(Some(&body)),
            Err(PayloadError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_convert_endpoint_missing_parameter() {
        let (status, body) = post_form(setup_test_app(), String::new()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, payload::empty_document());
    }

    #[tokio::test]
    async fn test_convert_endpoint_query_string() {
        let dir = view_fixture();
        let whole = dir.path().join("views/dev_view/eprom");

        let response = setup_test_app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!(
                        "{}?{}",
                        routes::CONVERT_OLD_SETTINGS,
                        form_body(&whole.to_string_lossy())
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let decoded = payload::decode(Some(std::str::from_utf8(&body).unwrap())).unwrap();
        match decoded {
            ConversionResponse::Converted { rel_path, .. } => assert_eq!(rel_path, "eprom"),
            other => panic!("expected converted payload, got {:?}", other),
        }
    }
}
