//! Display adapter: formats computed figures into view models.
//!
//! Nothing here computes or alters metric values; it only formats them.

pub mod cards;
pub mod format;
pub mod table;

pub use cards::{accuracy_cards, AccuracyCard, OperationalStats};
pub use format::{format_number, format_percent, DisplayConfig, Theme};
pub use table::{PerformanceTable, TableRow};
