//! C-compatible API exposed to the dashboard host.
//!
//! Every call takes a NUL-terminated JSON string and returns a JSON envelope
//! allocated by Rust. Callers must release it with [`perfboard_free_str`].

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use serde::Serialize;
use tracing::warn;

use crate::common::config::AppCfg;
use crate::common::error::{BoardError, BoardResult};
use crate::common::{json, log};
use crate::data::MetricsRequest;
use crate::display::{accuracy_cards, OperationalStats, PerformanceTable, Theme};

/// ABI version to coordinate with the host.
#[no_mangle]
pub extern "C" fn perfboard_api_version() -> u32 {
    1
}

/// Install the JSON log subscriber. Idempotent.
#[no_mangle]
pub extern "C" fn perfboard_init_logging() {
    log::init_tracing();
}

/// Compute metrics for a request and return `{"ok":true,"result":MetricsResult}`.
#[no_mangle]
pub extern "C" fn perfboard_compute(request: *const c_char) -> *const c_char {
    let body = read_str(request).and_then(|raw| compute_json(&raw, &AppCfg::load()));
    string_to_raw(envelope(body))
}

/// Compute metrics and return the table view model plus its text rendering.
///
/// Any non-zero `dark` selects the dark theme.
#[no_mangle]
pub extern "C" fn perfboard_render_table(request: *const c_char, dark: u8) -> *const c_char {
    let mut cfg = AppCfg::load();
    cfg.theme = if dark != 0 { Theme::Dark } else { Theme::Light };
    let body = read_str(request).and_then(|raw| render_table_json(&raw, &cfg));
    string_to_raw(envelope(body))
}

/// Build the four operational accuracy cards from a stats payload.
#[no_mangle]
pub extern "C" fn perfboard_accuracy_cards(stats: *const c_char) -> *const c_char {
    let body = read_str(stats).and_then(|raw| cards_json(&raw));
    string_to_raw(envelope(body))
}

/// Free strings allocated by Rust.
#[no_mangle]
pub extern "C" fn perfboard_free_str(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        let _ = CString::from_raw(ptr as *mut c_char);
    }
}

#[derive(Serialize)]
struct RenderedTable {
    view: PerformanceTable,
    text: String,
}

/// Envelope body produced by a successful call.
type Body = BoardResult<serde_json::Value>;

fn compute_json(raw: &str, cfg: &AppCfg) -> Body {
    let request = MetricsRequest::from_json(&json::parse(raw)?, cfg.source)?;
    Ok(serde_json::to_value(request.evaluate()?)?)
}

fn render_table_json(raw: &str, cfg: &AppCfg) -> Body {
    let request = MetricsRequest::from_json(&json::parse(raw)?, cfg.source)?;
    let view = PerformanceTable::build(&request.evaluate()?, &cfg.display());
    let text = view.render_text();
    Ok(serde_json::to_value(RenderedTable { view, text })?)
}

fn cards_json(raw: &str) -> Body {
    let stats = OperationalStats::from_json(&json::parse(raw)?)?;
    Ok(serde_json::to_value(accuracy_cards(&stats))?)
}

fn envelope(body: Body) -> String {
    match body {
        Ok(value) => json::ok_envelope(&value),
        Err(err) => {
            warn!(code = err.code() as u32, %err, "ffi call failed");
            json::err_envelope(&err)
        }
    }
}

fn read_str(ptr: *const c_char) -> BoardResult<String> {
    if ptr.is_null() {
        return Err(BoardError::malformed("null pointer"));
    }
    let raw = unsafe { CStr::from_ptr(ptr) };
    raw.to_str()
        .map(str::to_string)
        .map_err(|_| BoardError::malformed("input is not valid UTF-8"))
}

fn string_to_raw(s: String) -> *const c_char {
    match CString::new(s) {
        Ok(cstring) => cstring.into_raw(),
        Err(_) => fallback_json_raw(),
    }
}

fn fallback_json_raw() -> *const c_char {
    let body = json::err_envelope(&BoardError::Internal("response contained NUL"));
    CString::new(body).unwrap_or_default().into_raw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn call(f: impl FnOnce(*const c_char) -> *const c_char, input: &str) -> Value {
        let input = CString::new(input).unwrap();
        let out = f(input.as_ptr());
        let text = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_string();
        perfboard_free_str(out);
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn version_is_stable() {
        assert_eq!(perfboard_api_version(), 1);
    }

    #[test]
    fn compute_returns_rows() {
        let out = compute_json(
            r#"{"records":[{"category":"Ride Booking","tp":15,"fp":1,"fn":4}]}"#,
            &AppCfg::default(),
        )
        .unwrap();
        assert_eq!(out["rows"][0]["precision"], json!(0.9375));
        assert_eq!(out["rows"][0]["accuracy"], json!(0.75));
        assert_eq!(out["system_accuracy"]["rule"], json!("mean_of_defined"));
    }

    #[test]
    fn compute_through_the_abi() {
        let out = call(|ptr| perfboard_compute(ptr), r#"{"records":[]}"#);
        assert_eq!(out["ok"], json!(true));
        assert_eq!(out["result"]["rows"], json!([]));
        assert_eq!(out["result"]["system_accuracy"]["value"], Value::Null);
    }

    #[test]
    fn errors_come_back_as_envelopes() {
        let out = call(
            |ptr| perfboard_compute(ptr),
            r#"{"records":[{"category":"A","tp":-1,"fp":0,"fn":0}]}"#,
        );
        assert_eq!(out["ok"], json!(false));
        assert_eq!(out["code"], json!(1));

        let out = call(|ptr| perfboard_compute(ptr), "not json");
        assert_eq!(out["code"], json!(1));
    }

    #[test]
    fn null_pointer_is_an_error_not_a_crash() {
        let out = perfboard_compute(std::ptr::null());
        let text = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_string();
        perfboard_free_str(out);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["ok"], json!(false));
        perfboard_free_str(std::ptr::null());
    }

    #[test]
    fn render_table_carries_theme_and_text() {
        let out = call(
            |ptr| perfboard_render_table(ptr, 1),
            r#"{"source":"demo"}"#,
        );
        let result = &out["result"];
        assert_eq!(result["view"]["theme"], json!("dark"));
        assert_eq!(result["view"]["system_accuracy"], json!("75%"));
        assert_eq!(result["view"]["rows"].as_array().unwrap().len(), 6);
        assert!(result["text"].as_str().unwrap().contains("System Up-time"));
    }

    #[test]
    fn cards_through_the_abi() {
        let out = call(
            |ptr| perfboard_accuracy_cards(ptr),
            r#"{"metrics":{"timeAccuracy":{"accuracyPercentage":81.5,"analyzedCount":12}}}"#,
        );
        let cards = out["result"].as_array().unwrap();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[1]["title"], json!("ETA Accuracy"));
        assert_eq!(cards[1]["value"], json!(81.5));
        assert_eq!(cards[0]["sample_size"], json!(0));
        assert_eq!(cards[1]["display_value"], json!("81.5"));
        assert_eq!(cards[1]["sample_label"], json!("N=12"));
    }
}
