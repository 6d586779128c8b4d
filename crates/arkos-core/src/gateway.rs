//! The `BackendGateway` trait seam.
//!
//! Controllers depend on this trait rather than any concrete HTTP client,
//! which keeps the core testable with an in-memory mock. The reqwest
//! implementation lives in the `arkos-gateway` crate; this module only
//! defines the contract.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use arkos_types::Feature;

/// A document selected by the user for upload.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    /// Original filename, including extension.
    pub file_name: String,
    /// MIME type as reported by the surface (e.g. `application/pdf`).
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    /// Creates a new document file.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Returns true if this file is an accepted PDF document.
    ///
    /// The frontend reports a MIME type and the backend checks the filename
    /// extension; either signal is accepted here.
    pub fn is_pdf(&self) -> bool {
        self.content_type == "application/pdf"
            || self.file_name.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// Errors surfaced by a gateway implementation.
///
/// The taxonomy distinguishes failures that never reached the backend
/// (`Transport`) from explicit backend rejections (`Status`) and undecodable
/// bodies (`Malformed`). Controllers convert all three into terminal
/// user-visible states; none of them propagates to the presentation layer.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// The request never completed (connection refused, timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error text, taken from the backend's `{"error": ...}` payload
        /// when decodable, otherwise the status reason.
        message: String,
    },

    /// The response arrived but its body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<GatewayError> for crate::ArkosError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(message) => crate::ArkosError::Transport(message),
            GatewayError::Status { status, message } => crate::ArkosError::Backend {
                status: Some(status),
                message,
            },
            GatewayError::Malformed(message) => crate::ArkosError::Backend {
                status: None,
                message,
            },
        }
    }
}

/// Capability to reach the Arkos backend over HTTP.
///
/// One method per backend operation. Implementations must be cheap to share
/// behind an `Arc` and safe to call concurrently.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Uploads a document for processing (`POST /api/process-pdf`).
    ///
    /// The acknowledgement body is implementation-defined and ignored by the
    /// client; success is a 2xx status.
    async fn upload_document(&self, file: &DocumentFile) -> Result<(), GatewayError>;

    /// Asks a question about the uploaded document (`POST /api/query-pdf`).
    ///
    /// Returns the backend's `answer` field, or `None` when the response
    /// carried no answer.
    async fn query_document(&self, query: &str) -> Result<Option<String>, GatewayError>;

    /// Fetches the raw analytics payload for one feature
    /// (`GET /api/{forecast|optimizer|emissions}`).
    async fn fetch_feature(&self, feature: Feature) -> Result<Value, GatewayError>;
}
