//! Chart-ready series shapes.
//!
//! Produced by the chart adapters from raw backend JSON and never mutated
//! after creation. Shapes mirror what each dashboard panel renders: a line
//! chart for the forecast, grouped bars for the optimizer mix, and a tile
//! grid for the emissions summary.

use serde::{Deserialize, Serialize};

/// Hourly demand forecast as a single line series.
///
/// `time_labels` and `values` always have equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// X-axis labels (hour of day), one per point.
    pub time_labels: Vec<String>,
    /// Predicted demand in kW, one per point.
    pub values: Vec<f64>,
}

impl ForecastSeries {
    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One hour of the optimizer supply mix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSlot {
    /// Hour of day (0-23).
    pub hour: i64,
    /// Renewable supply used in this hour, in kW.
    pub renewable_kw: f64,
    /// Non-renewable supply used in this hour, in kW.
    pub nonrenewable_kw: f64,
}

/// Emissions estimator summary tiles.
///
/// Values are surfaced exactly as the backend reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionsSummary {
    /// Baseline CO2 emissions in kg.
    pub baseline_co2_kg: f64,
    /// Optimized CO2 emissions in kg.
    pub optimized_co2_kg: f64,
    /// CO2 saved by optimization in kg.
    pub saved_co2_kg: f64,
    /// Percentage of CO2 saved.
    pub percent_saved: f64,
    /// Equivalent car miles avoided.
    pub car_miles_avoided: f64,
    /// Equivalent trees planted.
    pub trees_planted_equivalent: f64,
}

/// A renderable series for any dashboard feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// Line series for the forecast panel.
    Forecast(ForecastSeries),
    /// Per-hour supply mix for the optimizer panel.
    Optimizer(Vec<OptimizerSlot>),
    /// Summary tiles for the emissions panel.
    Emissions(EmissionsSummary),
}
