//! Data sources: live records from the caller or the built-in demo set.

pub mod domain;
pub mod service;

pub use domain::{demo_records, DataSource, DataSourceKind};
pub use service::{evaluate, MetricsRequest};
