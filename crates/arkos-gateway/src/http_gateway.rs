//! Reqwest implementation of the backend gateway.
//!
//! Paths follow the Arkos backend contract: `POST /api/process-pdf`
//! (multipart), `POST /api/query-pdf` (JSON), and `GET /api/{feature}` for
//! the three analytics panels. Backend failures arrive as JSON
//! `{"error": ...}` payloads; that text is surfaced as the failure reason
//! when decodable.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

use arkos_core::config::ClientConfig;
use arkos_core::gateway::{BackendGateway, DocumentFile, GatewayError};
use arkos_core::{ArkosError, Result};
use arkos_types::Feature;

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

/// HTTP client for the Arkos backend.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway from client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ArkosError::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Classifies a non-success response, extracting the backend's error
    /// text when the body is a JSON `{"error": ...}` record.
    async fn status_error(response: Response) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        GatewayError::Status {
            status: status.as_u16(),
            message: extract_error_message(status, &body),
        }
    }

    async fn decode_json(response: Response) -> std::result::Result<Value, GatewayError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))
    }
}

/// Maps a reqwest send failure onto the gateway taxonomy. Anything that
/// prevented a response from arriving is a transport failure.
fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Transport(format!("request timed out: {err}"))
    } else {
        GatewayError::Transport(err.to_string())
    }
}

fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    status
        .canonical_reason()
        .unwrap_or("backend request failed")
        .to_string()
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn upload_document(
        &self,
        file: &DocumentFile,
    ) -> std::result::Result<(), GatewayError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| GatewayError::Malformed(format!("invalid content type: {e}")))?;
        let form = Form::new().part("file", part);

        tracing::debug!(target: "gateway", file = %file.file_name, "uploading document");
        let response = self
            .client
            .post(self.endpoint("/api/process-pdf"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        // Acknowledgement body is implementation-defined; ignore it
        Ok(())
    }

    async fn query_document(
        &self,
        query: &str,
    ) -> std::result::Result<Option<String>, GatewayError> {
        tracing::debug!(target: "gateway", "sending document query");
        let response = self
            .client
            .post(self.endpoint("/api/query-pdf"))
            .json(&QueryRequest { query })
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = Self::decode_json(response).await?;
        Ok(body
            .get("answer")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn fetch_feature(
        &self,
        feature: Feature,
    ) -> std::result::Result<Value, GatewayError> {
        let path = format!("/api/{}", feature.id());
        tracing::debug!(target: "gateway", feature = feature.id(), "fetching panel data");
        let response = self
            .client
            .get(self.endpoint(&path))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        Self::decode_json(response).await
    }
}
