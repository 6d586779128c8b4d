//! End-to-end flows over a programmable mock gateway.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::{Mutex, Notify};

use arkos_application::{ArkosApp, DOCUMENT_READY_GREETING, UPLOAD_ERROR_MESSAGE};
use arkos_core::gateway::{BackendGateway, DocumentFile, GatewayError};
use arkos_core::session::QUERY_ERROR_MESSAGE;
use arkos_types::{Feature, FeatureData, MessageRole, Series, UploadState};

/// Programmable gateway: per-operation outcomes, call counters, and optional
/// per-feature gates for controlling response timing.
struct MockGateway {
    upload_outcome: Mutex<Result<(), GatewayError>>,
    query_outcome: Mutex<Result<Option<String>, GatewayError>>,
    feature_payloads: HashMap<Feature, Value>,
    feature_gates: HashMap<Feature, Arc<Notify>>,
    upload_calls: AtomicUsize,
    query_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockGateway {
    fn new() -> Self {
        let mut feature_payloads = HashMap::new();
        feature_payloads.insert(
            Feature::Forecast,
            json!({"labels": [0, 1], "data": [10, 20]}),
        );
        feature_payloads.insert(
            Feature::Optimizer,
            json!([{"hour": 0, "renewable_used_kW": 100.0, "nonrenewable_kW": 40.0}]),
        );
        feature_payloads.insert(
            Feature::Emissions,
            json!({
                "baseline_CO2_kg": 100,
                "optimized_CO2_kg": 60,
                "saved_CO2_kg": 40,
                "percent_saved": 40,
                "car_miles_avoided": 95,
                "trees_planted_equivalent": 2
            }),
        );
        Self {
            upload_outcome: Mutex::new(Ok(())),
            query_outcome: Mutex::new(Ok(Some("the answer".to_string()))),
            feature_payloads,
            feature_gates: HashMap::new(),
            upload_calls: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    async fn set_upload_outcome(&self, outcome: Result<(), GatewayError>) {
        *self.upload_outcome.lock().await = outcome;
    }

    async fn set_query_outcome(&self, outcome: Result<Option<String>, GatewayError>) {
        *self.query_outcome.lock().await = outcome;
    }

    fn with_feature_gate(mut self, feature: Feature, gate: Arc<Notify>) -> Self {
        self.feature_gates.insert(feature, gate);
        self
    }
}

#[async_trait]
impl BackendGateway for MockGateway {
    async fn upload_document(&self, _file: &DocumentFile) -> Result<(), GatewayError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.upload_outcome.lock().await.clone()
    }

    async fn query_document(&self, _query: &str) -> Result<Option<String>, GatewayError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.query_outcome.lock().await.clone()
    }

    async fn fetch_feature(&self, feature: Feature) -> Result<Value, GatewayError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = self.feature_gates.get(&feature) {
            gate.notified().await;
        }
        Ok(self.feature_payloads[&feature].clone())
    }
}

fn pdf() -> DocumentFile {
    DocumentFile::new("annual_report.pdf", "application/pdf", vec![0x25, 0x50])
}

#[tokio::test]
async fn test_successful_upload_appends_exactly_one_greeting() {
    let app = ArkosApp::new(Arc::new(MockGateway::new())).await;

    app.submit_file(pdf()).await.unwrap();

    assert_eq!(app.upload_state().await, UploadState::Ready);
    let messages = app.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, MessageRole::Assistant);
    assert_eq!(messages[0].content, DOCUMENT_READY_GREETING);
}

#[tokio::test]
async fn test_failed_upload_appends_error_and_no_greeting() {
    let gateway = Arc::new(MockGateway::new());
    gateway
        .set_upload_outcome(Err(GatewayError::Status {
            status: 500,
            message: "processing failed".to_string(),
        }))
        .await;
    let app = ArkosApp::new(gateway).await;

    app.submit_file(pdf()).await.unwrap();

    assert!(matches!(app.upload_state().await, UploadState::Failed { .. }));
    let messages = app.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, UPLOAD_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_rejected_file_touches_nothing() {
    let gateway = Arc::new(MockGateway::new());
    let app = ArkosApp::new(gateway.clone()).await;

    let err = app
        .submit_file(DocumentFile::new("report.csv", "text/csv", vec![]))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(app.upload_state().await, UploadState::Idle);
    assert!(app.messages().await.is_empty());
    assert_eq!(gateway.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_query_transport_failure_grows_history_by_two() {
    let gateway = Arc::new(MockGateway::new());
    let app = ArkosApp::new(gateway.clone()).await;
    app.submit_file(pdf()).await.unwrap();
    let baseline = app.messages().await.len();

    gateway
        .set_query_outcome(Err(GatewayError::Transport(
            "connection refused".to_string(),
        )))
        .await;
    app.send_query("How did solar affect operational costs?")
        .await
        .unwrap();

    let messages = app.messages().await;
    assert_eq!(messages.len(), baseline + 2);
    assert_eq!(messages[baseline].role, MessageRole::User);
    assert_eq!(messages[baseline + 1].role, MessageRole::Assistant);
    assert_eq!(messages[baseline + 1].content, QUERY_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_answered_query_follows_greeting() {
    let app = ArkosApp::new(Arc::new(MockGateway::new())).await;
    app.submit_file(pdf()).await.unwrap();
    app.send_query("What is the forecasted infrastructure spending?")
        .await
        .unwrap();

    let messages = app.messages().await;
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].content, DOCUMENT_READY_GREETING);
    assert_eq!(messages[1].role, MessageRole::User);
    assert_eq!(messages[2].content, "the answer");
}

#[tokio::test]
async fn test_selecting_a_feature_twice_fetches_once() {
    let gateway = Arc::new(MockGateway::new());
    let app = ArkosApp::new(gateway.clone()).await;

    app.select_feature(Feature::Emissions).await;
    app.select_feature(Feature::Emissions).await;

    assert_eq!(gateway.fetch_calls.load(Ordering::SeqCst), 1);
    match app.feature_data(Feature::Emissions).await {
        FeatureData::Loaded(Series::Emissions(summary)) => {
            assert_eq!(summary.baseline_co2_kg, 100.0);
            assert_eq!(summary.optimized_co2_kg, 60.0);
            assert_eq!(summary.saved_co2_kg, 40.0);
            assert_eq!(summary.percent_saved, 40.0);
            assert_eq!(summary.car_miles_avoided, 95.0);
            assert_eq!(summary.trees_planted_equivalent, 2.0);
        }
        other => panic!("unexpected cell: {other:?}"),
    }
}

#[tokio::test]
async fn test_switching_features_mid_flight_preserves_displayed_feature() {
    let gate = Arc::new(Notify::new());
    let gateway = Arc::new(MockGateway::new().with_feature_gate(Feature::Forecast, gate.clone()));
    let app = Arc::new(ArkosApp::new(gateway).await);

    // Forecast starts loading, held at the gate
    let pending = tokio::spawn({
        let app = app.clone();
        async move { app.select_feature(Feature::Forecast).await }
    });
    tokio::task::yield_now().await;
    assert!(app.feature_data(Feature::Forecast).await.is_loading());

    // User moves on to the optimizer panel before the forecast resolves
    app.select_feature(Feature::Optimizer).await;
    assert_eq!(app.active_feature().await, Some(Feature::Optimizer));
    let optimizer_view = app.feature_data(Feature::Optimizer).await;

    // Late forecast response lands in its own cell only
    gate.notify_one();
    pending.await.unwrap();

    assert_eq!(app.active_feature().await, Some(Feature::Optimizer));
    assert_eq!(app.feature_data(Feature::Optimizer).await, optimizer_view);
    match app.feature_data(Feature::Forecast).await {
        FeatureData::Loaded(Series::Forecast(series)) => {
            assert_eq!(series.time_labels, vec!["0", "1"]);
            assert_eq!(series.values, vec![10.0, 20.0]);
        }
        other => panic!("unexpected cell: {other:?}"),
    }
}

#[tokio::test]
async fn test_assistant_and_dashboard_are_independent() {
    let gateway = Arc::new(MockGateway::new());
    gateway
        .set_upload_outcome(Err(GatewayError::Transport("refused".to_string())))
        .await;
    let app = ArkosApp::new(gateway).await;

    // A failed upload does not block the dashboard
    app.submit_file(pdf()).await.unwrap();
    app.select_feature(Feature::Forecast).await;

    assert!(matches!(app.upload_state().await, UploadState::Failed { .. }));
    assert!(matches!(
        app.feature_data(Feature::Forecast).await,
        FeatureData::Loaded(_)
    ));
}
