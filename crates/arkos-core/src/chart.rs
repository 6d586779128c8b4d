//! Pure adapters from raw backend JSON to renderable series.
//!
//! Each adapter is total over well-formed JSON: missing or mistyped fields
//! become safe defaults (empty sequence, zero) so a partially-populated
//! backend response still renders instead of crashing the view layer. The
//! adapters are deterministic and have no side effects.

use serde_json::Value;

use arkos_types::{EmissionsSummary, Feature, ForecastSeries, OptimizerSlot, Series};

/// Adapts the raw payload for `feature` into its renderable series.
pub fn adapt(feature: Feature, raw: &Value) -> Series {
    match feature {
        Feature::Forecast => Series::Forecast(to_forecast_series(raw)),
        Feature::Optimizer => Series::Optimizer(to_optimizer_series(raw)),
        Feature::Emissions => Series::Emissions(to_emissions_summary(raw)),
    }
}

/// Shapes `{"labels": [...], "data": [...]}` into a [`ForecastSeries`].
///
/// The backend emits labels as JSON numbers (`0..n`); they are stringified
/// here so the series always carries text labels. When labels are absent,
/// index labels are synthesized; when lengths disagree, both sequences are
/// truncated to the shorter one so the equal-length invariant holds.
pub fn to_forecast_series(raw: &Value) -> ForecastSeries {
    let labels = raw
        .get("labels")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let data = raw
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let values: Vec<f64> = data.iter().map(|v| v.as_f64().unwrap_or(0.0)).collect();

    let time_labels: Vec<String> = if labels.is_empty() {
        (0..values.len()).map(|i| i.to_string()).collect()
    } else {
        labels.iter().take(values.len()).map(label_text).collect()
    };
    let values = values.into_iter().take(time_labels.len()).collect();

    ForecastSeries {
        time_labels,
        values,
    }
}

/// Shapes the per-hour optimizer array into [`OptimizerSlot`]s.
///
/// The backend sends the full per-hour record (demand, cost, emissions and
/// more); only the supply mix the panel renders is kept. A missing `hour`
/// falls back to the element index.
pub fn to_optimizer_series(raw: &Value) -> Vec<OptimizerSlot> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| OptimizerSlot {
            hour: entry
                .get("hour")
                .and_then(Value::as_i64)
                .unwrap_or(index as i64),
            renewable_kw: number_field(entry, "renewable_used_kW"),
            nonrenewable_kw: number_field(entry, "nonrenewable_kW"),
        })
        .collect()
}

/// Shapes the flat emissions record into an [`EmissionsSummary`].
pub fn to_emissions_summary(raw: &Value) -> EmissionsSummary {
    EmissionsSummary {
        baseline_co2_kg: number_field(raw, "baseline_CO2_kg"),
        optimized_co2_kg: number_field(raw, "optimized_CO2_kg"),
        saved_co2_kg: number_field(raw, "saved_CO2_kg"),
        percent_saved: number_field(raw, "percent_saved"),
        car_miles_avoided: number_field(raw, "car_miles_avoided"),
        trees_planted_equivalent: number_field(raw, "trees_planted_equivalent"),
    }
}

fn number_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_forecast_maps_labels_and_data() {
        let raw = json!({"labels": ["0", "1"], "data": [10, 20]});
        let series = to_forecast_series(&raw);
        assert_eq!(series.time_labels, vec!["0", "1"]);
        assert_eq!(series.values, vec![10.0, 20.0]);
    }

    #[test]
    fn test_forecast_stringifies_numeric_labels() {
        // The backend emits labels as list(range(n))
        let raw = json!({"labels": [0, 1, 2], "data": [5.5, 6.0, 7.25]});
        let series = to_forecast_series(&raw);
        assert_eq!(series.time_labels, vec!["0", "1", "2"]);
        assert_eq!(series.values, vec![5.5, 6.0, 7.25]);
    }

    #[test]
    fn test_forecast_is_deterministic() {
        let raw = json!({"labels": ["0", "1"], "data": [10, 20]});
        assert_eq!(to_forecast_series(&raw), to_forecast_series(&raw));
    }

    #[test]
    fn test_forecast_synthesizes_missing_labels() {
        let raw = json!({"data": [1, 2, 3]});
        let series = to_forecast_series(&raw);
        assert_eq!(series.time_labels, vec!["0", "1", "2"]);
        assert_eq!(series.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_forecast_truncates_to_shorter_sequence() {
        let raw = json!({"labels": [0, 1, 2, 3], "data": [1.0, 2.0]});
        let series = to_forecast_series(&raw);
        assert_eq!(series.time_labels.len(), series.values.len());
        assert_eq!(series.values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_forecast_defaults_on_empty_payload() {
        let series = to_forecast_series(&json!({}));
        assert!(series.is_empty());
        assert!(series.time_labels.is_empty());
    }

    #[test]
    fn test_forecast_zeroes_non_numeric_values() {
        let raw = json!({"labels": [0, 1], "data": ["bad", 4]});
        let series = to_forecast_series(&raw);
        assert_eq!(series.values, vec![0.0, 4.0]);
    }

    #[test]
    fn test_optimizer_maps_supply_mix() {
        let raw = json!([
            {"hour": 0, "renewable_used_kW": 120.0, "nonrenewable_kW": 80.0, "cost": 14.2},
            {"hour": 1, "renewable_used_kW": 130.5, "nonrenewable_kW": 60.0}
        ]);
        let slots = to_optimizer_series(&raw);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].hour, 0);
        assert_eq!(slots[0].renewable_kw, 120.0);
        assert_eq!(slots[1].nonrenewable_kw, 60.0);
    }

    #[test]
    fn test_optimizer_defaults_missing_fields() {
        let raw = json!([{}, {"renewable_used_kW": 10.0}]);
        let slots = to_optimizer_series(&raw);
        assert_eq!(slots[0].hour, 0);
        assert_eq!(slots[0].renewable_kw, 0.0);
        assert_eq!(slots[1].hour, 1);
        assert_eq!(slots[1].renewable_kw, 10.0);
    }

    #[test]
    fn test_optimizer_handles_non_array_payload() {
        assert!(to_optimizer_series(&json!({"oops": true})).is_empty());
    }

    #[test]
    fn test_emissions_surfaces_all_six_values() {
        let raw = json!({
            "baseline_CO2_kg": 100,
            "optimized_CO2_kg": 60,
            "saved_CO2_kg": 40,
            "percent_saved": 40,
            "car_miles_avoided": 95,
            "trees_planted_equivalent": 2
        });
        let summary = to_emissions_summary(&raw);
        assert_eq!(summary.baseline_co2_kg, 100.0);
        assert_eq!(summary.optimized_co2_kg, 60.0);
        assert_eq!(summary.saved_co2_kg, 40.0);
        assert_eq!(summary.percent_saved, 40.0);
        assert_eq!(summary.car_miles_avoided, 95.0);
        assert_eq!(summary.trees_planted_equivalent, 2.0);
    }

    #[test]
    fn test_emissions_defaults_missing_fields() {
        let summary = to_emissions_summary(&json!({"saved_CO2_kg": 12.5}));
        assert_eq!(summary.saved_co2_kg, 12.5);
        assert_eq!(summary.baseline_co2_kg, 0.0);
    }

    #[test]
    fn test_adapt_dispatches_per_feature() {
        let forecast = adapt(Feature::Forecast, &json!({"labels": [0], "data": [1]}));
        assert!(matches!(forecast, Series::Forecast(_)));
        let optimizer = adapt(Feature::Optimizer, &json!([]));
        assert!(matches!(optimizer, Series::Optimizer(_)));
        let emissions = adapt(Feature::Emissions, &json!({}));
        assert!(matches!(emissions, Series::Emissions(_)));
    }
}
