//! Operational accuracy cards: distance, ETA, route deviation and time deviation.
//!
//! Values are precomputed upstream; cards only pick and label them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::error::BoardResult;

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceAccuracy {
    #[serde(default, deserialize_with = "null_as_default")]
    pub accuracy_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analyzed_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_deviation_km: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAccuracy {
    #[serde(default, deserialize_with = "null_as_default")]
    pub accuracy_percentage: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analyzed_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_deviation_minutes: f64,
}

/// Ride-level accuracy statistics comparing completed rides with estimates.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance_accuracy: DistanceAccuracy,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_accuracy: TimeAccuracy,
}

impl OperationalStats {
    /// Accepts `{ "metrics": { ... } }` as well as the bare object.
    pub fn from_json(value: &Value) -> BoardResult<Self> {
        let inner = match value.get("metrics") {
            Some(metrics) if !metrics.is_null() => metrics,
            _ => value,
        };
        Ok(Self::deserialize(inner)?)
    }
}

/// A single labelled figure with its sample size.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccuracyCard {
    pub title: &'static str,
    pub value: f64,
    /// `value` printed as received, e.g. `92.5` or `0.42`.
    pub display_value: String,
    pub unit: &'static str,
    pub sample_size: u64,
    /// `N=` badge text.
    pub sample_label: String,
}

impl AccuracyCard {
    fn new(title: &'static str, value: f64, unit: &'static str, sample_size: u64) -> Self {
        Self {
            title,
            value,
            display_value: value.to_string(),
            unit,
            sample_size,
            sample_label: format!("N={sample_size}"),
        }
    }
}

/// The four operational cards, in display order.
pub fn accuracy_cards(stats: &OperationalStats) -> [AccuracyCard; 4] {
    let distance = &stats.distance_accuracy;
    let time = &stats.time_accuracy;
    [
        AccuracyCard::new(
            "Distance Accuracy",
            distance.accuracy_percentage,
            "%",
            distance.analyzed_count,
        ),
        AccuracyCard::new(
            "ETA Accuracy",
            time.accuracy_percentage,
            "%",
            time.analyzed_count,
        ),
        AccuracyCard::new(
            "Route Precision",
            distance.average_deviation_km,
            "km dev",
            distance.analyzed_count,
        ),
        AccuracyCard::new(
            "Time Deviation",
            time.average_deviation_minutes,
            "min dev",
            time.analyzed_count,
        ),
    ]
}
