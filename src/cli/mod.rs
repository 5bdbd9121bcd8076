//! Command-line parsing for the income-statement screener.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the filter/sort engine and the front-ends.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::DEFAULT_SYMBOL;
use crate::domain::{AmountRange, Constraints, DateRange, SortColumn, SortOrder};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fins", version, about = "Annual income-statement screener (FMP-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (default).
    Tui(TuiArgs),
    /// Fetch, filter and sort once, then print the table (and optionally a chart).
    Table(TableArgs),
}

/// Options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Ticker symbol to fetch.
    #[arg(short = 's', long, default_value = DEFAULT_SYMBOL)]
    pub symbol: String,

    /// Write logs to this file (`RUST_LOG` controls the level).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Earliest fiscal date (YYYY-MM-DD); needs --date-end to take effect.
    #[arg(long, value_name = "DATE")]
    pub date_start: Option<String>,

    /// Latest fiscal date (YYYY-MM-DD); needs --date-start to take effect.
    #[arg(long, value_name = "DATE")]
    pub date_end: Option<String>,

    /// Minimum revenue in billions; needs --revenue-max.
    #[arg(long, value_name = "BN", allow_hyphen_values = true)]
    pub revenue_min: Option<String>,

    /// Maximum revenue in billions; needs --revenue-min.
    #[arg(long, value_name = "BN", allow_hyphen_values = true)]
    pub revenue_max: Option<String>,

    /// Minimum net income in billions; needs --net-income-max.
    #[arg(long, value_name = "BN", allow_hyphen_values = true)]
    pub net_income_min: Option<String>,

    /// Maximum net income in billions; needs --net-income-min.
    #[arg(long, value_name = "BN", allow_hyphen_values = true)]
    pub net_income_max: Option<String>,

    /// Sort column. Without it the source order is kept.
    #[arg(long, value_enum)]
    pub sort_by: Option<SortColumn>,

    /// Sort order; only meaningful together with --sort-by.
    #[arg(long, value_enum, default_value_t = SortOrder::Asc, requires = "sort_by")]
    pub order: SortOrder,

    /// Render an ASCII chart below the table.
    #[arg(long)]
    pub chart: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the displayed records (`.json`, otherwise CSV).
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

impl TableArgs {
    /// Bounds and sort selectors as the engine sees them.
    pub fn constraints(&self) -> Constraints {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Constraints {
            date_range: DateRange {
                start: text(&self.date_start),
                end: text(&self.date_end),
            },
            revenue_range: AmountRange::new(text(&self.revenue_min), text(&self.revenue_max)),
            net_income_range: AmountRange::new(text(&self.net_income_min), text(&self.net_income_max)),
            sort_column: self.sort_by.unwrap_or_default(),
            sort_order: self.order,
        }
    }
}
