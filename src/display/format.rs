//! Number formatting for dashboard cells.

use serde::Serialize;

use crate::common::config::DEFAULT_DECIMALS;

/// Colour scheme requested by the host. Passed explicitly to every renderer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Render parameters for a single pass.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DisplayConfig {
    pub theme: Theme,
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl DisplayConfig {
    pub fn number(&self, value: f64) -> String {
        format_number_with(value, self.decimals)
    }

    pub fn percent(&self, ratio: f64) -> String {
        format_percent_with(ratio, self.decimals)
    }
}

/// Integral values print bare, everything else with four decimals.
pub fn format_number(value: f64) -> String {
    format_number_with(value, DEFAULT_DECIMALS)
}

pub fn format_number_with(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    match round_tie_away(value.abs(), decimals) {
        Some(digits) if value < 0.0 => format!("-{digits}"),
        Some(digits) => digits,
        None => format!("{value:.decimals$}"),
    }
}

/// Fixed-point digits of `magnitude` when it sits exactly halfway between two
/// `decimals`-place values, rounded up. `None` when there is no tie.
///
/// `{:.N}` breaks exact ties to even; dashboards round them up (`0.03125` ->
/// `0.0313`).
fn round_tie_away(magnitude: f64, decimals: usize) -> Option<String> {
    // Every finite f64 has at most 1074 fractional digits, so this is exact.
    let exact = format!("{magnitude:.1100}");
    let (int_part, frac) = exact.split_once('.')?;
    if decimals >= frac.len() {
        return None;
    }
    let (kept, rest) = frac.split_at(decimals);
    let mut tail = rest.bytes();
    if tail.next() != Some(b'5') || !tail.all(|b| b == b'0') {
        return None;
    }

    let mut digits: Vec<u8> = format!("{int_part}{kept}").into_bytes();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let split = digits.len() - decimals;
    let (whole, fraction) = digits.split_at(split);
    let whole = String::from_utf8_lossy(whole);
    let fraction = String::from_utf8_lossy(fraction);
    Some(if decimals == 0 {
        whole.into_owned()
    } else {
        format!("{whole}.{fraction}")
    })
}

/// A ratio in [0, 1] shown as a percentage, e.g. `0.75` -> `75%`.
pub fn format_percent(ratio: f64) -> String {
    format_percent_with(ratio, DEFAULT_DECIMALS)
}

pub fn format_percent_with(ratio: f64, decimals: usize) -> String {
    let body = format_number_with(ratio * 100.0, decimals);
    if body.is_empty() {
        body
    } else {
        format!("{body}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_decimals() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(32.0), "32");
    }

    #[test]
    fn fractions_use_four_decimals() {
        assert_eq!(format_number(0.9375), "0.9375");
        assert_eq!(format_number(0.7894736842), "0.7895");
        assert_eq!(format_number(0.5), "0.5000");
    }

    #[test]
    fn non_finite_is_blank() {
        assert_eq!(format_number(f64::NAN), "");
        assert_eq!(format_number(f64::INFINITY), "");
        assert_eq!(format_percent(f64::NAN), "");
    }

    #[test]
    fn exact_ties_round_up() {
        // tp=1, fp=31 and tp=5, fp=27 give these precisions exactly
        assert_eq!(format_number(1.0 / 32.0), "0.0313");
        assert_eq!(format_number(5.0 / 32.0), "0.1563");
        assert_eq!(format_number(-0.03125), "-0.0313");
        assert_eq!(format_number_with(9.5, 0), "10");
        assert_eq!(format_number_with(0.125, 2), "0.13");
        assert_eq!(format_number_with(0.375, 2), "0.38");
    }

    #[test]
    fn near_ties_follow_the_binary_value() {
        // 1.00005 is stored just above the midpoint, 2.675 just below
        assert_eq!(format_number(1.00005), "1.0001");
        assert_eq!(format_number_with(2.675, 2), "2.67");
    }

    #[test]
    fn percent() {
        assert_eq!(format_percent(0.75), "75%");
        assert_eq!(format_percent(0.8372093023), "83.7209%");
    }

    #[test]
    fn config_controls_decimals() {
        let cfg = DisplayConfig {
            theme: Theme::Dark,
            decimals: 2,
        };
        assert_eq!(cfg.number(0.61538462), "0.62");
        assert_eq!(cfg.percent(0.5), "50%");
    }
}
