//! Domain primitives for per-category classification metrics.

use serde::{Deserialize, Serialize};

/// Confusion counts for one named category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category: String,
    pub tp: u64,
    pub fp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
}

impl CategoryRecord {
    pub fn new<S: Into<String>>(category: S, tp: u64, fp: u64, fn_: u64) -> Self {
        Self {
            category: category.into(),
            tp,
            fp,
            fn_,
        }
    }
}

/// Ratios derived from a [`CategoryRecord`].
///
/// `accuracy` is only populated for the primary category of a result set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub accuracy: Option<f64>,
}

/// One output row: the input counts plus what was derived from them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryMetrics {
    #[serde(flatten)]
    pub record: CategoryRecord,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

/// How the system-wide accuracy figure was obtained.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationRule {
    /// Arithmetic mean of every defined per-category accuracy.
    MeanOfDefined,
    /// Provided by the caller, not derived from the records.
    Supplied,
}

/// Where the caller wants the system-wide accuracy to come from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SystemAccuracySource {
    #[default]
    Derived,
    Supplied(f64),
}

/// System-wide accuracy together with its provenance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SystemAccuracy {
    pub value: Option<f64>,
    pub rule: AggregationRule,
    /// Number of per-category accuracies that fed a derived value.
    pub contributing: usize,
}

/// Unweighted averages across all rows plus count totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MacroAverages {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub total_tp: u64,
    pub total_fp: u64,
    pub total_fn: u64,
}

/// Knobs for a single computation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsOptions {
    /// Category that receives an accuracy value; the first row when `None`.
    pub primary_category: Option<String>,
    pub system_accuracy: SystemAccuracySource,
}

impl MetricsOptions {
    pub fn with_primary<S: Into<String>>(mut self, category: S) -> Self {
        self.primary_category = Some(category.into());
        self
    }

    pub fn with_supplied_accuracy(mut self, value: f64) -> Self {
        self.system_accuracy = SystemAccuracySource::Supplied(value);
        self
    }
}

/// Output of the metrics calculator, rows in input order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsResult {
    pub rows: Vec<CategoryMetrics>,
    pub primary_category: Option<String>,
    pub system_accuracy: SystemAccuracy,
    pub macro_averages: MacroAverages,
}

impl MetricsResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row carrying the per-category accuracy, if any.
    pub fn primary(&self) -> Option<&CategoryMetrics> {
        let name = self.primary_category.as_deref()?;
        self.rows.iter().find(|row| row.record.category == name)
    }
}
