//! Structured logging setup.
//!
//! Call sites use the `tracing` macros directly; this module only installs the
//! JSON subscriber for hosts that want output.

use tracing_subscriber::EnvFilter;

use crate::common::config::AppCfg;

/// Install a JSON subscriber filtered by `PERFBOARD_LOG` (default `info`).
///
/// Safe to call more than once: later calls are no-ops.
pub fn init_tracing() {
    init_tracing_with_filter(&AppCfg::load().log_filter);
}

/// Install a JSON subscriber with an explicit filter directive.
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_tracing_with_filter("perfboard=debug");
        init_tracing_with_filter("not a ==== directive");
        tracing::debug!("still alive");
    }
}
