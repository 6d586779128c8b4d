//! Upload lifecycle state.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single uploaded document.
///
/// Exactly one value at any time, owned by the upload controller. Each upload
/// attempt transitions `Idle -> Uploading -> {Ready | Failed}` exactly once;
/// a new attempt overwrites the previous terminal state.
///
/// `Ready` carries no document token: the backend associates subsequent
/// queries with the most recently uploaded document server-side, so the
/// client only tracks readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UploadState {
    /// No upload has been attempted.
    Idle,
    /// A transfer is in flight. Further submissions are rejected.
    Uploading,
    /// The backend accepted the document; queries are meaningful.
    Ready,
    /// The upload failed with a user-visible reason.
    Failed { reason: String },
}

impl UploadState {
    /// Returns true if a transfer is currently in flight.
    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadState::Uploading)
    }

    /// Returns true if a document has been accepted by the backend.
    pub fn is_ready(&self) -> bool {
        matches!(self, UploadState::Ready)
    }
}
