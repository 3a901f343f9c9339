//! Runtime configuration loaded from the environment.
//!
//! Every key has a default so a bare process still renders something sane.

use std::env;

use tracing::warn;

use crate::data::DataSourceKind;
use crate::display::{DisplayConfig, Theme};

/// Default number of decimals for non-integral metric values.
pub const DEFAULT_DECIMALS: usize = 4;

/// Snapshot of configuration values consumed by the core.
#[derive(Clone, Debug, PartialEq)]
pub struct AppCfg {
    pub log_filter: String,
    pub theme: Theme,
    pub source: DataSourceKind,
    pub decimals: usize,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            theme: Theme::Light,
            source: DataSourceKind::Live,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let theme = match env_or("PERFBOARD_THEME", "light").to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            other => {
                warn!(value = other, "unknown PERFBOARD_THEME, using light");
                defaults.theme
            }
        };

        let source = match env_or("PERFBOARD_SOURCE", "live").to_ascii_lowercase().as_str() {
            "live" => DataSourceKind::Live,
            "demo" => DataSourceKind::Demo,
            other => {
                warn!(value = other, "unknown PERFBOARD_SOURCE, using live");
                defaults.source
            }
        };

        let decimals = match lookup("PERFBOARD_DECIMALS") {
            None => defaults.decimals,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = raw.as_str(), "unparseable PERFBOARD_DECIMALS");
                defaults.decimals
            }),
        };

        Self {
            log_filter: env_or("PERFBOARD_LOG", &defaults.log_filter),
            theme,
            source,
            decimals,
        }
    }

    /// Render parameters derived from this snapshot.
    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            theme: self.theme,
            decimals: self.decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(AppCfg::from_lookup(lookup(&[])), AppCfg::default());
    }

    #[test]
    fn reads_every_key() {
        let cfg = AppCfg::from_lookup(lookup(&[
            ("PERFBOARD_LOG", "perfboard=debug"),
            ("PERFBOARD_THEME", "Dark"),
            ("PERFBOARD_SOURCE", "demo"),
            ("PERFBOARD_DECIMALS", "2"),
        ]));
        assert_eq!(cfg.log_filter, "perfboard=debug");
        assert_eq!(cfg.theme, Theme::Dark);
        assert_eq!(cfg.source, DataSourceKind::Demo);
        assert_eq!(cfg.decimals, 2);
        assert_eq!(cfg.display().theme, Theme::Dark);
    }

    #[test]
    fn garbage_falls_back() {
        let cfg = AppCfg::from_lookup(lookup(&[
            ("PERFBOARD_THEME", "sepia"),
            ("PERFBOARD_SOURCE", "cache"),
            ("PERFBOARD_DECIMALS", "four"),
        ]));
        assert_eq!(cfg.theme, Theme::Light);
        assert_eq!(cfg.source, DataSourceKind::Live);
        assert_eq!(cfg.decimals, DEFAULT_DECIMALS);
    }
}
