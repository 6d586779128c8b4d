//! Document upload lifecycle.
//!
//! `DocumentUploadController` owns the [`UploadState`] value and drives one
//! multipart transfer at a time. Terminal transitions are announced through
//! event subscriptions so the application layer can react (the assistant
//! greeting after a successful upload) without any shared mutable state.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::RwLock;

use arkos_types::UploadState;

use crate::error::{ArkosError, Result};
use crate::gateway::{BackendGateway, DocumentFile};

/// Terminal outcome of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// The backend accepted the document.
    Completed,
    /// The transfer or the backend rejected the document.
    Failed {
        /// User-visible failure reason.
        reason: String,
    },
}

/// Boxed future returned by upload listeners.
pub type ListenerFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Callback invoked once per terminal upload transition.
///
/// Listeners return a future so they can perform asynchronous work (such as
/// appending a session message); the controller awaits it before
/// `submit_file` returns, keeping the cross-component effect ordered with
/// the state transition.
pub type UploadListener = Arc<dyn Fn(UploadEvent) -> ListenerFuture + Send + Sync>;

/// Owns the lifecycle of a single uploaded document.
pub struct DocumentUploadController {
    /// Current upload state. Mutated only through this controller.
    state: RwLock<UploadState>,
    gateway: Arc<dyn BackendGateway>,
    listeners: RwLock<Vec<UploadListener>>,
}

impl DocumentUploadController {
    /// Creates a controller in the `Idle` state.
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            state: RwLock::new(UploadState::Idle),
            gateway,
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Returns the current upload state.
    pub async fn state(&self) -> UploadState {
        self.state.read().await.clone()
    }

    /// Registers a listener invoked on every terminal upload transition.
    pub async fn subscribe(&self, listener: UploadListener) {
        self.listeners.write().await.push(listener);
    }

    /// Submits a document for upload.
    ///
    /// Files that are not PDF documents are rejected synchronously: no state
    /// transition, no network call. A submission while a transfer is already
    /// in flight is likewise rejected without touching the in-flight
    /// attempt. An accepted file transitions to `Uploading`, performs one
    /// transfer, and lands in exactly one of `Ready` or `Failed`, emitting
    /// exactly one [`UploadEvent`].
    ///
    /// # Errors
    ///
    /// Returns a validation error for non-PDF files and for concurrent
    /// submissions. Transfer failures do not surface here; they terminate in
    /// the `Failed` state.
    pub async fn submit_file(&self, file: DocumentFile) -> Result<()> {
        if !file.is_pdf() {
            return Err(ArkosError::validation(format!(
                "'{}' is not a PDF document",
                file.file_name
            )));
        }

        {
            let mut state = self.state.write().await;
            if state.is_uploading() {
                return Err(ArkosError::validation("an upload is already in progress"));
            }
            *state = UploadState::Uploading;
        }
        tracing::info!(target: "upload", file = %file.file_name, "upload started");

        let event = match self.gateway.upload_document(&file).await {
            Ok(()) => {
                *self.state.write().await = UploadState::Ready;
                tracing::info!(target: "upload", file = %file.file_name, "upload completed");
                UploadEvent::Completed
            }
            Err(err) => {
                let reason = err.to_string();
                *self.state.write().await = UploadState::Failed {
                    reason: reason.clone(),
                };
                tracing::warn!(target: "upload", file = %file.file_name, error = %err, "upload failed");
                UploadEvent::Failed { reason }
            }
        };

        self.emit(event).await;
        Ok(())
    }

    async fn emit(&self, event: UploadEvent) {
        let listeners = self.listeners.read().await.clone();
        for listener in listeners {
            listener(event.clone()).await;
        }
    }
}
