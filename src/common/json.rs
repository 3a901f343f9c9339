//! Small JSON helpers shared by the validation boundary and the C ABI.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::common::error::{BoardError, BoardResult};

/// First value present under any of `keys`.
pub fn lookup_alias<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| object.get(*key))
}

/// Parse a request body, mapping syntax errors onto [`BoardError::Malformed`].
pub fn parse(raw: &str) -> BoardResult<Value> {
    Ok(serde_json::from_str(raw)?)
}

/// `{"ok":true,"result":...}` envelope.
pub fn ok_envelope<T: Serialize>(result: &T) -> String {
    match serde_json::to_value(result) {
        Ok(value) => json!({ "ok": true, "result": value }).to_string(),
        Err(_) => err_envelope(&BoardError::Internal("result serialisation failed")),
    }
}

/// `{"ok":false,"code":..,"error":..}` envelope.
pub fn err_envelope(err: &BoardError) -> String {
    json!({
        "ok": false,
        "code": err.code() as u32,
        "error": err.to_string(),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_prefers_first_key() {
        let value = json!({ "tp": 1, "truePositives": 2 });
        let object = value.as_object().unwrap();
        assert_eq!(lookup_alias(object, &["tp", "truePositives"]), Some(&json!(1)));
        assert_eq!(lookup_alias(object, &["truePositives"]), Some(&json!(2)));
        assert_eq!(lookup_alias(object, &["fn"]), None);
    }

    #[test]
    fn syntax_errors_are_malformed() {
        let err = parse("{not json").unwrap_err();
        assert!(matches!(err, BoardError::Malformed(_)));
    }

    #[test]
    fn envelopes_carry_code() {
        let ok: Value = serde_json::from_str(&ok_envelope(&vec![1, 2])).unwrap();
        assert_eq!(ok, json!({ "ok": true, "result": [1, 2] }));

        let body = err_envelope(&BoardError::DuplicateCategory("A".into()));
        let err: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(err["ok"], json!(false));
        assert_eq!(err["code"], json!(1));
        assert_eq!(err["error"], json!("duplicate category `A`"));
    }
}
