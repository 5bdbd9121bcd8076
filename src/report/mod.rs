//! Reporting: the display projection and its text rendering.
//!
//! `projection` turns records into table rows and chart series; both the TUI
//! and the `table` command render from it.

pub mod format;
pub mod projection;

pub use format::{format_summary, format_table};
pub use projection::{chart_series, table_rows, ChartData, Series, TableRow, TABLE_HEADERS};
