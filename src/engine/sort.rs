//! Column sort for the displayed view.

use std::cmp::Ordering;

use crate::domain::{FinancialRecord, SortColumn, SortOrder};

/// Return a reordered copy of `records`.
///
/// The sort is stable and uses a three-way comparator, so records with
/// equal keys keep their input order in either direction.
pub fn sort(records: &[FinancialRecord], column: SortColumn, order: SortOrder) -> Vec<FinancialRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| match order {
        SortOrder::Asc => compare(a, b, column),
        SortOrder::Desc => compare(b, a, column),
    });
    out
}

/// Ascending comparison of two records on `column`.
pub fn compare(a: &FinancialRecord, b: &FinancialRecord, column: SortColumn) -> Ordering {
    match column {
        // ISO dates order lexically the same as chronologically.
        SortColumn::Date => a.date.cmp(&b.date),
        SortColumn::Revenue => a.revenue.cmp(&b.revenue),
        SortColumn::NetIncome => a.net_income.cmp(&b.net_income),
        SortColumn::GrossProfit => a.gross_profit.cmp(&b.gross_profit),
        SortColumn::Eps => a.eps.total_cmp(&b.eps),
        SortColumn::OperatingIncome => a.operating_income.cmp(&b.operating_income),
    }
}
