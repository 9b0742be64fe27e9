use std::future::Future;

use reqwest::{Client, Url};

use crate::routes;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid converter base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Sends the conversion request and hands back the raw response body,
/// whatever the status code.
///
/// `Ok(None)` means the exchange completed with an empty body.
pub trait ConversionTransport: Send + Sync {
    fn request(
        &self,
        view_path: &str,
    ) -> impl Future<Output = Result<Option<String>, TransportError>> + Send;
}

/// HTTP transport posting the form to the conversion endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for the server at `base_url`
    ///
    /// No request timeout is configured; a hung server keeps the request
    /// pending.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let invalid = |reason: String| TransportError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(routes::CONVERT_OLD_SETTINGS))
            .map_err(|e| invalid(e.to_string()))?;

        let client = Client::builder().build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ConversionTransport for HttpTransport {
    async fn request(&self, view_path: &str) -> Result<Option<String>, TransportError> {
        tracing::debug!("POST {} ({}={})", self.endpoint, routes::VIEW_PATH_PARAM, view_path);

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[(routes::VIEW_PATH_PARAM, view_path)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // the body may still carry an error document
            tracing::warn!("Conversion endpoint answered with status {}", status);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(body))
    }
}
