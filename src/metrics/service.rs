//! Metric calculators turning confusion counts into display figures.
//!
//! Every division falls back to zero when its denominator is zero, so a
//! category with no observations renders as 0 rather than NaN.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::common::error::{BoardError, BoardResult};

use super::domain::{
    AggregationRule, CategoryMetrics, CategoryRecord, DerivedMetrics, MacroAverages,
    MetricsOptions, MetricsResult, SystemAccuracy, SystemAccuracySource,
};

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// tp / (tp + fp), 0 without predictions.
pub fn precision(tp: u64, fp: u64) -> f64 {
    ratio(tp as f64, tp as f64 + fp as f64)
}

/// tp / (tp + fn), 0 without actual positives.
pub fn recall(tp: u64, fn_: u64) -> f64 {
    ratio(tp as f64, tp as f64 + fn_ as f64)
}

/// Harmonic mean of precision and recall, 0 when both are 0.
pub fn f1(precision: f64, recall: f64) -> f64 {
    ratio(2.0 * precision * recall, precision + recall)
}

/// tp / (tp + fp + fn) for a single record.
pub fn accuracy(record: &CategoryRecord) -> f64 {
    ratio(
        record.tp as f64,
        record.tp as f64 + record.fp as f64 + record.fn_ as f64,
    )
}

/// Precision, recall and F1 for one record. Accuracy is left undefined.
pub fn derive(record: &CategoryRecord) -> DerivedMetrics {
    let p = precision(record.tp, record.fp);
    let r = recall(record.tp, record.fn_);
    DerivedMetrics {
        precision: p,
        recall: r,
        f1: f1(p, r),
        accuracy: None,
    }
}

/// Compute metrics for `records`, giving accuracy to `primary` (or the first row).
pub fn compute_metrics(
    records: &[CategoryRecord],
    primary: Option<&str>,
) -> BoardResult<MetricsResult> {
    let options = MetricsOptions {
        primary_category: primary.map(str::to_string),
        ..MetricsOptions::default()
    };
    compute_with(records, &options)
}

/// Compute metrics with explicit options.
pub fn compute_with(
    records: &[CategoryRecord],
    options: &MetricsOptions,
) -> BoardResult<MetricsResult> {
    if let SystemAccuracySource::Supplied(value) = options.system_accuracy {
        if !(0.0..=1.0).contains(&value) {
            warn!(value, "rejecting supplied system accuracy");
            return Err(BoardError::AccuracyOutOfRange(value));
        }
    }

    if records.is_empty() {
        debug!("no records, returning empty metrics");
        return Ok(MetricsResult {
            rows: Vec::new(),
            primary_category: None,
            system_accuracy: system_accuracy(&[], options.system_accuracy),
            macro_averages: MacroAverages::default(),
        });
    }

    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.category.as_str()) {
            warn!(category = record.category.as_str(), "duplicate category");
            return Err(BoardError::DuplicateCategory(record.category.clone()));
        }
    }

    let primary_idx = match options.primary_category.as_deref() {
        None => 0,
        Some(name) => records
            .iter()
            .position(|r| r.category == name)
            .ok_or_else(|| BoardError::UnknownPrimary(name.to_string()))?,
    };

    let rows: Vec<CategoryMetrics> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let mut metrics = derive(record);
            if idx == primary_idx {
                metrics.accuracy = Some(accuracy(record));
            }
            CategoryMetrics {
                record: record.clone(),
                metrics,
            }
        })
        .collect();

    let result = MetricsResult {
        system_accuracy: system_accuracy(&rows, options.system_accuracy),
        macro_averages: macro_averages(&rows),
        primary_category: Some(records[primary_idx].category.clone()),
        rows,
    };

    debug!(
        rows = result.rows.len(),
        primary = result.primary_category.as_deref().unwrap_or_default(),
        system_accuracy = result.system_accuracy.value,
        "computed metrics"
    );

    Ok(result)
}

fn system_accuracy(rows: &[CategoryMetrics], source: SystemAccuracySource) -> SystemAccuracy {
    let defined: Vec<f64> = rows.iter().filter_map(|row| row.metrics.accuracy).collect();
    match source {
        SystemAccuracySource::Supplied(value) => SystemAccuracy {
            value: Some(value),
            rule: AggregationRule::Supplied,
            contributing: 0,
        },
        SystemAccuracySource::Derived => SystemAccuracy {
            value: if defined.is_empty() {
                None
            } else {
                Some(defined.iter().sum::<f64>() / defined.len() as f64)
            },
            rule: AggregationRule::MeanOfDefined,
            contributing: defined.len(),
        },
    }
}

fn macro_averages(rows: &[CategoryMetrics]) -> MacroAverages {
    if rows.is_empty() {
        return MacroAverages::default();
    }
    let n = rows.len() as f64;
    let mean = |pick: fn(&DerivedMetrics) -> f64| {
        rows.iter().map(|r| pick(&r.metrics)).sum::<f64>() / n
    };

    MacroAverages {
        precision: mean(|m| m.precision),
        recall: mean(|m| m.recall),
        f1: mean(|m| m.f1),
        total_tp: rows.iter().map(|r| r.record.tp).fold(0, u64::saturating_add),
        total_fp: rows.iter().map(|r| r.record.fp).fold(0, u64::saturating_add),
        total_fn: rows.iter().map(|r| r.record.fn_).fold(0, u64::saturating_add),
    }
}
