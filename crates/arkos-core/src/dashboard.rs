//! Dashboard feature selection and the per-feature fetch/cache cycle.
//!
//! `DashboardController` owns the active feature and a cache cell per
//! feature. Results are always applied to the cell keyed by the feature that
//! initiated the fetch, and only while that cell is still `Loading`; a
//! response arriving after the user moved on therefore updates its own cache
//! entry without ever touching the currently displayed feature.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use arkos_types::{Feature, FeatureData};

use crate::chart;
use crate::gateway::BackendGateway;

/// Callback invoked after every atomic change to a feature's cache cell.
pub type DashboardListener = Arc<dyn Fn(Feature, &FeatureData) + Send + Sync>;

struct DashboardState {
    /// Currently displayed feature, or `None` for the placeholder panel.
    active: Option<Feature>,
    /// One independent cache cell per feature.
    data: HashMap<Feature, FeatureData>,
}

/// Owns the selected analytics feature and the fetch/cache/suppress cycle.
pub struct DashboardController {
    state: RwLock<DashboardState>,
    gateway: Arc<dyn BackendGateway>,
    listeners: RwLock<Vec<DashboardListener>>,
}

impl DashboardController {
    /// Creates a controller with no active feature and empty cache cells.
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        let data = Feature::ALL
            .iter()
            .map(|f| (*f, FeatureData::NotFetched))
            .collect();
        Self {
            state: RwLock::new(DashboardState { active: None, data }),
            gateway,
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Returns the currently active feature, if any.
    pub async fn active_feature(&self) -> Option<Feature> {
        self.state.read().await.active
    }

    /// Returns the cache cell for `feature`.
    pub async fn feature_data(&self, feature: Feature) -> FeatureData {
        let state = self.state.read().await;
        state
            .data
            .get(&feature)
            .cloned()
            .unwrap_or(FeatureData::NotFetched)
    }

    /// Returns the active feature together with its cache cell.
    pub async fn current_view(&self) -> Option<(Feature, FeatureData)> {
        let state = self.state.read().await;
        let feature = state.active?;
        let data = state
            .data
            .get(&feature)
            .cloned()
            .unwrap_or(FeatureData::NotFetched);
        Some((feature, data))
    }

    /// Registers a listener invoked after every cache cell change.
    pub async fn subscribe(&self, listener: DashboardListener) {
        self.listeners.write().await.push(listener);
    }

    /// Activates `feature` and fetches its data if needed.
    ///
    /// The selection takes effect synchronously. A `Loaded` cell is a pure
    /// cache hit with no network call; a `Loading` cell means a fetch is
    /// already in flight and the activation joins it; `NotFetched` and
    /// `Error` cells issue one fetch, flipping the cell to `Loading` first.
    /// Fetch failures terminate in the cell's `Error` state and never
    /// propagate to the caller.
    pub async fn select_feature(&self, feature: Feature) {
        let should_fetch = {
            let mut state = self.state.write().await;
            state.active = Some(feature);
            match state.data.get(&feature) {
                Some(FeatureData::Loaded(_)) => {
                    tracing::debug!(target: "dashboard", feature = feature.id(), "cache hit");
                    false
                }
                Some(FeatureData::Loading) => {
                    tracing::debug!(target: "dashboard", feature = feature.id(), "joining in-flight fetch");
                    false
                }
                _ => {
                    state.data.insert(feature, FeatureData::Loading);
                    true
                }
            }
        };

        if should_fetch {
            self.notify(feature, &FeatureData::Loading).await;
            self.fetch_and_apply(feature).await;
        }
    }

    /// Clears the placeholder selection back to "no feature".
    ///
    /// In-flight fetches are unaffected; their results still land in their
    /// own cache cells.
    pub async fn clear_selection(&self) {
        self.state.write().await.active = None;
    }

    /// Explicitly refetches `feature`, discarding its cached cell.
    ///
    /// A no-op while a fetch for the feature is already in flight.
    pub async fn refresh(&self, feature: Feature) {
        {
            let mut state = self.state.write().await;
            if matches!(state.data.get(&feature), Some(FeatureData::Loading)) {
                return;
            }
            state.data.insert(feature, FeatureData::Loading);
        }
        self.notify(feature, &FeatureData::Loading).await;
        self.fetch_and_apply(feature).await;
    }

    /// Performs the fetch for `feature` and applies the outcome to its cache
    /// cell. The apply is a single atomic update keyed by the feature id and
    /// guarded by a phase check: if the cell is no longer `Loading` (e.g.
    /// the cache was reset underneath the fetch), the result is discarded.
    async fn fetch_and_apply(&self, feature: Feature) {
        let outcome = match self.gateway.fetch_feature(feature).await {
            Ok(raw) => FeatureData::Loaded(chart::adapt(feature, &raw)),
            Err(err) => {
                tracing::warn!(target: "dashboard", feature = feature.id(), error = %err, "fetch failed");
                FeatureData::Error(err.to_string())
            }
        };

        let applied = {
            let mut state = self.state.write().await;
            match state.data.get(&feature) {
                Some(FeatureData::Loading) => {
                    state.data.insert(feature, outcome.clone());
                    true
                }
                _ => {
                    tracing::debug!(target: "dashboard", feature = feature.id(), "discarding stale result");
                    false
                }
            }
        };

        if applied {
            self.notify(feature, &outcome).await;
        }
    }

    async fn notify(&self, feature: Feature, data: &FeatureData) {
        let listeners = self.listeners.read().await;
        for listener in listeners.iter() {
            listener(feature, data);
        }
    }
}
