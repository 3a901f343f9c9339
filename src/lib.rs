// lib.rs - crate root
pub mod common;
pub mod data;
pub mod metrics;
pub mod display;
pub mod api;

pub use common::{AppCfg, BoardCode, BoardError, BoardResult};
pub use data::{DataSource, DataSourceKind, MetricsRequest};
pub use metrics::{compute_metrics, compute_with, CategoryRecord, MetricsOptions, MetricsResult};
