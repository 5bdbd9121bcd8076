//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - decoded straight from the FMP JSON payload
//! - filtered and sorted in-memory
//! - exported to JSON/CSV

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// Amounts are reported in whole currency units; the UI shows billions.
pub const BILLION: f64 = 1e9;

/// One fiscal year of reported income-statement figures.
///
/// Unknown JSON fields are ignored. Missing or `null` amounts decode as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    /// Fiscal period end date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub revenue: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub net_income: i64,
    #[serde(default, deserialize_with = "de_amount")]
    pub gross_profit: i64,
    #[serde(default, deserialize_with = "de_eps")]
    pub eps: f64,
    #[serde(default, deserialize_with = "de_amount")]
    pub operating_income: i64,
}

impl FinancialRecord {
    /// Calendar date of the record, if `date` is a valid `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Amount in billions (display unit) for one of the amount columns.
    pub fn billions(&self, amount: Amount) -> f64 {
        self.amount(amount) as f64 / BILLION
    }

    pub fn amount(&self, amount: Amount) -> i64 {
        match amount {
            Amount::Revenue => self.revenue,
            Amount::NetIncome => self.net_income,
            Amount::GrossProfit => self.gross_profit,
            Amount::OperatingIncome => self.operating_income,
        }
    }
}

/// The integer amount columns of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Revenue,
    NetIncome,
    GrossProfit,
    OperatingIncome,
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
}

fn de_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawNumber>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawNumber::Int(v)) => Ok(v),
        Some(RawNumber::Float(v)) if v.is_finite() => Ok(v.round() as i64),
        Some(RawNumber::Float(v)) => Err(serde::de::Error::custom(format!("non-finite amount {v}"))),
    }
}

fn de_eps<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        None => 0.0,
        Some(RawNumber::Int(v)) => v as f64,
        Some(RawNumber::Float(v)) => v,
    })
}

/// Column used by the sort engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    #[default]
    Date,
    Revenue,
    NetIncome,
    GrossProfit,
    Eps,
    OperatingIncome,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Date,
        SortColumn::Revenue,
        SortColumn::NetIncome,
        SortColumn::GrossProfit,
        SortColumn::Eps,
        SortColumn::OperatingIncome,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            SortColumn::Date => "Date",
            SortColumn::Revenue => "Revenue",
            SortColumn::NetIncome => "Net Income",
            SortColumn::GrossProfit => "Gross Profit",
            SortColumn::Eps => "EPS",
            SortColumn::OperatingIncome => "Operating Income",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn display_name(self) -> &'static str {
        match self {
            SortOrder::Asc => "Ascending",
            SortOrder::Desc => "Descending",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Inclusive date bounds as typed by the user. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Inclusive amount bounds in billions as typed by the user. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountRange {
    pub min: String,
    pub max: String,
}

impl AmountRange {
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

/// Everything the user can constrain the displayed view with.
///
/// Bounds are kept as raw text: whether a filter is active is decided by
/// the engine when it parses them, never by the input layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub date_range: DateRange,
    pub revenue_range: AmountRange,
    pub net_income_range: AmountRange,
    pub sort_column: SortColumn,
    pub sort_order: SortOrder,
}

/// Resolved fetch configuration (environment + CLI flags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub symbol: String,
    pub api_key: String,
}
