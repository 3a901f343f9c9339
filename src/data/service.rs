//! Resolves a request payload into records and runs the calculator over them.

use serde_json::Value;
use tracing::debug;

use crate::common::error::{BoardError, BoardResult};
use crate::common::json::lookup_alias;
use crate::metrics::{self, MetricsOptions, MetricsResult, SystemAccuracySource};

use super::domain::{DataSource, DataSourceKind};

/// A fully validated computation request.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsRequest {
    pub source: DataSource,
    pub options: MetricsOptions,
}

impl MetricsRequest {
    /// Validate a request object.
    ///
    /// Recognised keys: `records`, `source`, `primary_category`
    /// (`primaryCategory`) and `system_accuracy` (`systemAccuracy`).
    pub fn from_json(value: &Value, default_source: DataSourceKind) -> BoardResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| BoardError::malformed("request must be an object"))?;

        let kind = match object.get("source") {
            None | Some(Value::Null) => default_source,
            Some(raw) => serde_json::from_value(raw.clone())
                .map_err(|_| BoardError::malformed(format!("unknown source {raw}")))?,
        };

        let source = match kind {
            DataSourceKind::Demo => {
                if object.contains_key("records") {
                    debug!("demo source selected, ignoring supplied records");
                }
                DataSource::Demo
            }
            DataSourceKind::Live => match object.get("records") {
                None | Some(Value::Null) => DataSource::Live(Vec::new()),
                Some(records) => DataSource::Live(metrics::parse_records(records)?),
            },
        };

        let primary = lookup_alias(object, &["primary_category", "primaryCategory"]);
        let primary_category = match primary {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(BoardError::malformed(format!(
                    "primary_category must be a string, got {other}"
                )))
            }
        };

        let supplied = lookup_alias(object, &["system_accuracy", "systemAccuracy"]);
        let system_accuracy = match supplied {
            None | Some(Value::Null) => SystemAccuracySource::Derived,
            Some(Value::Number(n)) => n
                .as_f64()
                .map(SystemAccuracySource::Supplied)
                .ok_or_else(|| BoardError::malformed("system_accuracy is not a float"))?,
            Some(other) => {
                return Err(BoardError::malformed(format!(
                    "system_accuracy must be a number, got {other}"
                )))
            }
        };

        Ok(Self {
            source,
            options: MetricsOptions {
                primary_category,
                system_accuracy,
            },
        })
    }

    pub fn evaluate(&self) -> BoardResult<MetricsResult> {
        evaluate(&self.source, &self.options)
    }
}

/// Compute metrics over whatever `source` resolves to.
pub fn evaluate(source: &DataSource, options: &MetricsOptions) -> BoardResult<MetricsResult> {
    let records = source.records();
    debug!(source = ?source.kind(), records = records.len(), "evaluating");
    metrics::compute_with(&records, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{AggregationRule, CategoryRecord};
    use serde_json::json;

    #[test]
    fn parses_full_request() {
        let req = MetricsRequest::from_json(
            &json!({
                "records": [{ "category": "A", "tp": 1, "fp": 0, "fn": 1 }],
                "primaryCategory": "A",
                "system_accuracy": 0.5,
            }),
            DataSourceKind::Live,
        )
        .unwrap();
        assert_eq!(req.source, DataSource::Live(vec![CategoryRecord::new("A", 1, 0, 1)]));
        assert_eq!(
            req.options,
            MetricsOptions::default().with_primary("A").with_supplied_accuracy(0.5)
        );
    }

    #[test]
    fn missing_records_on_live_source_is_empty() {
        let req = MetricsRequest::from_json(&json!({}), DataSourceKind::Live).unwrap();
        let result = req.evaluate().unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn demo_source_from_request_or_default() {
        let explicit = MetricsRequest::from_json(
            &json!({ "source": "demo", "records": [] }),
            DataSourceKind::Live,
        )
        .unwrap();
        assert_eq!(explicit.source, DataSource::Demo);

        let defaulted = MetricsRequest::from_json(&json!({}), DataSourceKind::Demo).unwrap();
        let result = defaulted.evaluate().unwrap();
        assert_eq!(result.rows.len(), 6);
        assert_eq!(result.system_accuracy.value, Some(0.75));
        assert_eq!(result.system_accuracy.rule, AggregationRule::MeanOfDefined);
    }

    #[test]
    fn rejects_bad_fields() {
        for bad in [
            json!([]),
            json!({ "source": "cache" }),
            json!({ "primary_category": 3 }),
            json!({ "system_accuracy": "high" }),
            json!({ "records": [{ "category": "A", "tp": -1, "fp": 0, "fn": 0 }] }),
        ] {
            assert!(
                MetricsRequest::from_json(&bad, DataSourceKind::Live).is_err(),
                "{bad}"
            );
        }
    }

    #[test]
    fn evaluate_demo_with_named_primary() {
        let opts = MetricsOptions::default().with_primary("ETA Prediction");
        let result = evaluate(&DataSource::Demo, &opts).unwrap();
        let eta = result.primary().unwrap();
        assert_eq!(eta.record.category, "ETA Prediction");
        assert!((eta.metrics.accuracy.unwrap() - 19.0 / 23.0).abs() < 1e-12);
    }
}
