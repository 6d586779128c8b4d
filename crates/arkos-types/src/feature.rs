//! Dashboard feature identifiers and their cached fetch state.

use serde::{Deserialize, Serialize};

use crate::series::Series;

/// One selectable analytics panel on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    /// Hourly energy demand forecast.
    Forecast,
    /// Smart grid optimizer mix (renewable vs non-renewable supply).
    Optimizer,
    /// Emissions estimator summary.
    Emissions,
}

impl Feature {
    /// All features, in sidebar order.
    pub const ALL: [Feature; 3] = [Feature::Forecast, Feature::Optimizer, Feature::Emissions];

    /// Stable identifier used in API paths and logs.
    pub fn id(&self) -> &'static str {
        match self {
            Feature::Forecast => "forecast",
            Feature::Optimizer => "optimizer",
            Feature::Emissions => "emissions",
        }
    }

    /// Human-readable panel name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::Forecast => "Energy Forecasting",
            Feature::Optimizer => "Smart Grid Optimizer",
            Feature::Emissions => "Emissions Estimator",
        }
    }
}

/// Cached fetch state for a single feature.
///
/// Entries are independent of one another; a feature's cell only ever moves
/// `Loading -> Loaded | Error` in a single atomic update, never through an
/// intermediate state.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureData {
    /// No fetch has been issued for this feature yet.
    NotFetched,
    /// A fetch is in flight. Re-selecting the feature joins it.
    Loading,
    /// The fetch succeeded and the series is ready to render.
    Loaded(Series),
    /// The fetch failed; re-selecting the feature retries.
    Error(String),
}

impl FeatureData {
    /// Returns true if a fetch for this feature is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FeatureData::Loading)
    }

    /// Returns the loaded series, if any.
    pub fn series(&self) -> Option<&Series> {
        match self {
            FeatureData::Loaded(series) => Some(series),
            _ => None,
        }
    }
}
