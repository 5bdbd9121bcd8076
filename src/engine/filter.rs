//! Range filters over the fetched records.
//!
//! Each filter group is active only when both of its bounds parse. Anything
//! else (empty text, garbage, a half-filled range) leaves the group inactive,
//! so filtering is total over arbitrary user input.

use chrono::NaiveDate;

use crate::domain::{parse_date, Amount, AmountRange, Constraints, DateRange, FinancialRecord};

/// Parsed, active filter bounds. `None` means the group is inactive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterSet {
    pub date: Option<(NaiveDate, NaiveDate)>,
    /// Revenue bounds in billions.
    pub revenue: Option<(f64, f64)>,
    /// Net income bounds in billions.
    pub net_income: Option<(f64, f64)>,
}

impl FilterSet {
    pub fn parse(constraints: &Constraints) -> Self {
        Self {
            date: parse_date_range(&constraints.date_range),
            revenue: parse_amount_range(&constraints.revenue_range),
            net_income: parse_amount_range(&constraints.net_income_range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.revenue.is_none() && self.net_income.is_none()
    }

    /// Number of active filter groups.
    pub fn active_count(&self) -> usize {
        [self.date.is_some(), self.revenue.is_some(), self.net_income.is_some()]
            .into_iter()
            .filter(|a| *a)
            .count()
    }

    pub fn matches(&self, record: &FinancialRecord) -> bool {
        if let Some((start, end)) = self.date {
            match record.parsed_date() {
                Some(d) if start <= d && d <= end => {}
                _ => return false,
            }
        }
        if let Some((min, max)) = self.revenue {
            if !within(record.billions(Amount::Revenue), min, max) {
                return false;
            }
        }
        if let Some((min, max)) = self.net_income {
            if !within(record.billions(Amount::NetIncome), min, max) {
                return false;
            }
        }
        true
    }
}

/// Keep the records that satisfy every active constraint, in input order.
pub fn filter(records: &[FinancialRecord], constraints: &Constraints) -> Vec<FinancialRecord> {
    filter_with(records, &FilterSet::parse(constraints))
}

pub fn filter_with(records: &[FinancialRecord], filters: &FilterSet) -> Vec<FinancialRecord> {
    records.iter().filter(|r| filters.matches(r)).cloned().collect()
}

fn within(v: f64, min: f64, max: f64) -> bool {
    // min > max never matches; the bounds are not swapped.
    min <= v && v <= max
}

fn parse_date_range(range: &DateRange) -> Option<(NaiveDate, NaiveDate)> {
    let start = parse_date(&range.start)?;
    let end = parse_date(&range.end)?;
    Some((start, end))
}

fn parse_amount_range(range: &AmountRange) -> Option<(f64, f64)> {
    let min = parse_bound(&range.min)?;
    let max = parse_bound(&range.max)?;
    Some((min, max))
}

fn parse_bound(raw: &str) -> Option<f64> {
    let v = raw.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
