//! Boundary validation for untyped record payloads.
//!
//! Counts must be non-negative integers. Negative, fractional or non-numeric
//! values are rejected, never clamped.

use serde_json::{Map, Value};
use tracing::warn;

use crate::common::error::{BoardError, BoardResult};
use crate::common::json::lookup_alias;

use super::domain::CategoryRecord;

const TP_KEYS: &[&str] = &["tp", "truePositives"];
const FP_KEYS: &[&str] = &["fp", "falsePositives"];
const FN_KEYS: &[&str] = &["fn", "falseNegatives"];

/// Parse a JSON array of records into typed [`CategoryRecord`]s.
pub fn parse_records(value: &Value) -> BoardResult<Vec<CategoryRecord>> {
    let items = value
        .as_array()
        .ok_or_else(|| BoardError::malformed("records must be an array"))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item.as_object().ok_or_else(|| {
                BoardError::malformed(format!("record {index} must be an object"))
            })?;
            parse_record(index, object).map_err(|err| {
                warn!(%err, "rejecting record");
                err
            })
        })
        .collect()
}

fn parse_record(index: usize, object: &Map<String, Value>) -> BoardResult<CategoryRecord> {
    let category = match object.get("category") {
        None | Some(Value::Null) => {
            return Err(BoardError::MissingField {
                index,
                field: "category",
            })
        }
        Some(Value::String(name)) if name.trim().is_empty() => {
            return Err(BoardError::malformed(format!(
                "record {index}: `category` must not be blank"
            )))
        }
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(BoardError::malformed(format!(
                "record {index}: `category` must be a string"
            )))
        }
    };

    Ok(CategoryRecord {
        category,
        tp: count(index, object, "tp", TP_KEYS)?,
        fp: count(index, object, "fp", FP_KEYS)?,
        fn_: count(index, object, "fn", FN_KEYS)?,
    })
}

fn count(
    index: usize,
    object: &Map<String, Value>,
    field: &'static str,
    keys: &[&str],
) -> BoardResult<u64> {
    let value = lookup_alias(object, keys).ok_or(BoardError::MissingField { index, field })?;
    let invalid = || BoardError::InvalidCount {
        index,
        field,
        value: value.to_string(),
    };

    let Value::Number(number) = value else {
        return Err(invalid());
    };
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }
    // Integral floats such as `4.0` are accepted, anything else is not.
    match number.as_f64() {
        // u64::MAX as f64 is 2^64, one past the largest count
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => {
            Ok(f as u64)
        }
        _ => Err(invalid()),
    }
}
