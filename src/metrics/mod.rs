//! Classification metrics derived from per-category confusion counts.

pub mod domain;
pub mod service;
pub mod validate;

pub use domain::{
    AggregationRule, CategoryMetrics, CategoryRecord, DerivedMetrics, MacroAverages,
    MetricsOptions, MetricsResult, SystemAccuracy, SystemAccuracySource,
};
pub use service::{compute_metrics, compute_with, derive};
pub use validate::parse_records;
