//! Where category records come from for a rendering pass.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::metrics::CategoryRecord;

/// Configuration-level selector for a [`DataSource`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Live,
    Demo,
}

/// Records for one computation: supplied by the caller, or the built-in demo set.
#[derive(Clone, Debug, PartialEq)]
pub enum DataSource {
    Live(Vec<CategoryRecord>),
    Demo,
}

impl DataSource {
    pub fn kind(&self) -> DataSourceKind {
        match self {
            DataSource::Live(_) => DataSourceKind::Live,
            DataSource::Demo => DataSourceKind::Demo,
        }
    }

    /// Records in display order.
    pub fn records(&self) -> Cow<'_, [CategoryRecord]> {
        match self {
            DataSource::Live(records) => Cow::Borrowed(records.as_slice()),
            DataSource::Demo => Cow::Owned(demo_records()),
        }
    }
}

/// Counts shown when a dashboard runs without live statistics.
///
/// Only counts live here; every ratio is computed like any other input.
pub fn demo_records() -> Vec<CategoryRecord> {
    vec![
        CategoryRecord::new("Ride Booking", 15, 1, 4),
        CategoryRecord::new("Fare Management", 32, 20, 1),
        CategoryRecord::new("Route Optimization", 4, 0, 5),
        CategoryRecord::new("ETA Prediction", 19, 4, 0),
        CategoryRecord::new("User Matching", 2, 1, 2),
        CategoryRecord::new("System Up-time", 0, 2, 2),
    ]
}
