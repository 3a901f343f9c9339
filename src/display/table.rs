//! Performance table view model and its plain-text rendering.

use serde::Serialize;

use crate::metrics::{CategoryMetrics, MetricsResult};

use super::format::{DisplayConfig, Theme};

pub const TITLE: &str = "Model Performance Metrics";
pub const SUBTITLE: &str = "Detailed breakdown by category";

pub const COLUMNS: [&str; 8] = [
    "Category Names",
    "True Positives",
    "False Positives",
    "False Negatives",
    "Precision",
    "Recall",
    "F1-Score",
    "Global Accuracy",
];

/// Placeholder for values that are undefined rather than zero.
pub const UNDEFINED: &str = "-";

/// One formatted table row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub category: String,
    pub tp: String,
    pub fp: String,
    #[serde(rename = "fn")]
    pub fn_: String,
    pub precision: String,
    pub recall: String,
    pub f1: String,
    pub accuracy: String,
}

impl TableRow {
    fn from_metrics(row: &CategoryMetrics, cfg: &DisplayConfig) -> Self {
        Self {
            category: row.record.category.clone(),
            tp: row.record.tp.to_string(),
            fp: row.record.fp.to_string(),
            fn_: row.record.fn_.to_string(),
            precision: cfg.number(row.metrics.precision),
            recall: cfg.number(row.metrics.recall),
            f1: cfg.number(row.metrics.f1),
            accuracy: row
                .metrics
                .accuracy
                .map(|a| cfg.number(a))
                .unwrap_or_else(|| UNDEFINED.to_string()),
        }
    }

    fn cells(&self) -> [&str; 8] {
        [
            self.category.as_str(),
            self.tp.as_str(),
            self.fp.as_str(),
            self.fn_.as_str(),
            self.precision.as_str(),
            self.recall.as_str(),
            self.f1.as_str(),
            self.accuracy.as_str(),
        ]
    }
}

/// Everything a front end needs to draw the performance table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PerformanceTable {
    pub theme: Theme,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Headline figure, e.g. `75%`, or `-` when undefined.
    pub system_accuracy: String,
    pub columns: [&'static str; 8],
    pub rows: Vec<TableRow>,
    pub insight: Option<String>,
}

impl PerformanceTable {
    pub fn build(result: &MetricsResult, cfg: &DisplayConfig) -> Self {
        let system_accuracy = result
            .system_accuracy
            .value
            .map(|v| cfg.percent(v))
            .unwrap_or_else(|| UNDEFINED.to_string());

        let insight = result.primary().and_then(|row| {
            let accuracy = row.metrics.accuracy?;
            Some(format!(
                "Primary category {} achieves an accuracy score of {}.",
                row.record.category,
                cfg.number(accuracy)
            ))
        });

        Self {
            theme: cfg.theme,
            title: TITLE,
            subtitle: SUBTITLE,
            system_accuracy,
            columns: COLUMNS,
            rows: result
                .rows
                .iter()
                .map(|row| TableRow::from_metrics(row, cfg))
                .collect(),
            insight,
        }
    }

    /// Fixed-width text rendering with left-aligned columns.
    pub fn render_text(&self) -> String {
        let mut widths = COLUMNS.map(str::len);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: [&str; 8]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        let mut out = String::new();
        out.push_str(self.title);
        out.push('\n');
        out.push_str(&format!("System Accuracy: {}\n\n", self.system_accuracy));
        out.push_str(&line(self.columns));
        out.push('\n');
        let total = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        out.push_str(&"-".repeat(total));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row.cells()));
            out.push('\n');
        }
        if let Some(insight) = &self.insight {
            out.push('\n');
            out.push_str(insight);
            out.push('\n');
        }
        out
    }
}
