//! Application layer of the Arkos client.
//!
//! `ArkosApp` composes the three controllers over one shared gateway and
//! wires the cross-component contract: terminal upload events become
//! assistant messages in the conversation session. This is the complete
//! surface a presentational layer consumes — the three mutating operations
//! (`submit_file`, `send_query`, `select_feature`) plus state accessors and
//! the controllers' subscription points.

use std::sync::Arc;

use arkos_core::config::ClientConfig;
use arkos_core::dashboard::DashboardController;
use arkos_core::gateway::{BackendGateway, DocumentFile};
use arkos_core::session::ConversationSession;
use arkos_core::upload::{DocumentUploadController, UploadEvent};
use arkos_core::Result;
use arkos_gateway::HttpGateway;
use arkos_types::{ConversationMessage, Feature, FeatureData, UploadState};

/// Assistant greeting appended after a successful upload.
pub const DOCUMENT_READY_GREETING: &str =
    "I've received your PDF document. How can I help you analyze your company data?";

/// Assistant message appended when an upload fails.
pub const UPLOAD_ERROR_MESSAGE: &str =
    "There was an error processing your PDF. Please try again.";

/// Composed client application: assistant and dashboard over one backend.
pub struct ArkosApp {
    session: Arc<ConversationSession>,
    upload: Arc<DocumentUploadController>,
    dashboard: Arc<DashboardController>,
}

impl ArkosApp {
    /// Creates the application over an arbitrary gateway.
    ///
    /// Used directly by tests (with a mock gateway) and by
    /// [`ArkosApp::from_config`] for production wiring.
    pub async fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        let session = Arc::new(ConversationSession::new(gateway.clone()));
        let upload = Arc::new(DocumentUploadController::new(gateway.clone()));
        let dashboard = Arc::new(DashboardController::new(gateway));

        // Upload readiness produces the assistant greeting; upload failure
        // produces the assistant error notice. One message per terminal
        // transition, delivered through the event contract.
        let wired_session = session.clone();
        upload
            .subscribe(Arc::new(move |event| {
                let session = wired_session.clone();
                Box::pin(async move {
                    match event {
                        UploadEvent::Completed => {
                            session.append_assistant(DOCUMENT_READY_GREETING).await;
                        }
                        UploadEvent::Failed { reason } => {
                            tracing::info!(target: "app", %reason, "upload failed");
                            session.append_assistant(UPLOAD_ERROR_MESSAGE).await;
                        }
                    }
                })
            }))
            .await;

        Self {
            session,
            upload,
            dashboard,
        }
    }

    /// Creates the application against the configured HTTP backend.
    pub async fn from_config(config: &ClientConfig) -> Result<Self> {
        let gateway = Arc::new(HttpGateway::new(config)?);
        Ok(Self::new(gateway).await)
    }

    // ========================================================================
    // Mutating operations
    // ========================================================================

    /// Submits a document for upload. See
    /// [`DocumentUploadController::submit_file`].
    pub async fn submit_file(&self, file: DocumentFile) -> Result<()> {
        self.upload.submit_file(file).await
    }

    /// Sends a document-grounded query. See
    /// [`ConversationSession::send_query`].
    pub async fn send_query(&self, text: &str) -> Result<()> {
        self.session.send_query(text).await
    }

    /// Activates a dashboard feature. See
    /// [`DashboardController::select_feature`].
    pub async fn select_feature(&self, feature: Feature) {
        self.dashboard.select_feature(feature).await;
    }

    // ========================================================================
    // State accessors
    // ========================================================================

    /// Snapshot of the conversation history.
    pub async fn messages(&self) -> Vec<ConversationMessage> {
        self.session.messages().await
    }

    /// Current upload state.
    pub async fn upload_state(&self) -> UploadState {
        self.upload.state().await
    }

    /// Currently active dashboard feature.
    pub async fn active_feature(&self) -> Option<Feature> {
        self.dashboard.active_feature().await
    }

    /// Cache cell for one dashboard feature.
    pub async fn feature_data(&self, feature: Feature) -> FeatureData {
        self.dashboard.feature_data(feature).await
    }

    /// Conversation session, for subscriptions and direct access.
    pub fn session(&self) -> &Arc<ConversationSession> {
        &self.session
    }

    /// Upload controller, for subscriptions and direct access.
    pub fn upload(&self) -> &Arc<DocumentUploadController> {
        &self.upload
    }

    /// Dashboard controller, for subscriptions and direct access.
    pub fn dashboard(&self) -> &Arc<DashboardController> {
        &self.dashboard
    }
}
