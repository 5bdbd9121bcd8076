//! Formatted terminal output for the `table` command.
//!
//! We keep formatting code in one place so output changes are localized
//! (important for the snapshot-style tests below).

use crate::domain::{Constraints, SortColumn, SortOrder};
use crate::engine::FilterSet;
use crate::report::projection::{TableRow, TABLE_HEADERS};

const WIDTHS: [usize; 6] = [12, 10, 12, 14, 8, 18];

/// Summary header: symbol, row counts, the applied filters and the applied sort.
///
/// `sort` is `None` while the rows are still in source order.
pub fn format_summary(
    symbol: &str,
    total: usize,
    shown: usize,
    constraints: &Constraints,
    sort: Option<(SortColumn, SortOrder)>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== fins - {symbol} annual income statements ===\n"));
    out.push_str(&format!("Records: {shown} of {total}\n"));

    let filters = FilterSet::parse(constraints);
    if filters.is_empty() {
        out.push_str("Filters: none\n");
    } else {
        out.push_str("Filters:");
        if let Some((start, end)) = filters.date {
            out.push_str(&format!(" date=[{start}, {end}]"));
        }
        if let Some((min, max)) = filters.revenue {
            out.push_str(&format!(" revenue=[{min}, {max}]B"));
        }
        if let Some((min, max)) = filters.net_income {
            out.push_str(&format!(" net_income=[{min}, {max}]B"));
        }
        out.push('\n');
    }
    match sort {
        Some((column, order)) => out.push_str(&format!(
            "Sort: {} ({})\n",
            column.display_name(),
            order.display_name()
        )),
        None => out.push_str("Sort: source order\n"),
    }
    out
}

/// Fixed-width table; the date column is left-aligned, amounts right-aligned.
pub fn format_table(rows: &[TableRow]) -> String {
    let mut out = String::new();
    push_line(&mut out, TABLE_HEADERS);

    let rule = WIDTHS.map(|w| "-".repeat(w));
    push_line(&mut out, rule.each_ref().map(|s| s.as_str()));

    for row in rows {
        push_line(&mut out, row.cells());
    }
    if rows.is_empty() {
        out.push_str("(no records)\n");
    }
    out
}

fn push_line(out: &mut String, cells: [&str; 6]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(WIDTHS).enumerate() {
        if i == 0 {
            line.push_str(&format!("{:<width$}", truncate(cell, width)));
        } else {
            line.push_str(&format!(" {:>width$}", truncate(cell, width)));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AmountRange, FinancialRecord};
    use crate::report::projection::table_rows;

    #[test]
    fn table_golden_snapshot() {
        let records = vec![FinancialRecord {
            date: "2024-09-28".to_string(),
            revenue: 391_035_000_000,
            net_income: 93_736_000_000,
            gross_profit: 180_683_000_000,
            eps: 6.11,
            operating_income: 123_216_000_000,
        }];
        let txt = format_table(&table_rows(&records));
        let expected = concat!(
            "Date            Revenue   Net Income   Gross Profit      EPS   Operating Income\n",
            "------------ ---------- ------------ -------------- -------- ------------------\n",
            "2024-09-28       391.0B        93.7B         180.7B     6.11             123.2B\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_table_says_so() {
        assert!(format_table(&[]).ends_with("(no records)\n"));
    }

    #[test]
    fn summary_lists_only_active_filters() {
        let constraints = Constraints {
            revenue_range: AmountRange::new("2", "8.5"),
            net_income_range: AmountRange::new("1", ""),
            ..Constraints::default()
        };
        let txt = format_summary(
            "AAPL",
            10,
            3,
            &constraints,
            Some((SortColumn::Revenue, SortOrder::Desc)),
        );
        assert!(txt.contains("Records: 3 of 10\n"));
        assert!(txt.contains("Filters: revenue=[2, 8.5]B\n"));
        assert!(txt.contains("Sort: Revenue (Descending)\n"));
    }

    #[test]
    fn summary_without_applied_sort_reports_source_order() {
        // Draft selectors default to Date/Ascending; they must not leak into the header.
        let txt = format_summary("AAPL", 3, 3, &Constraints::default(), None);
        assert!(txt.contains("Filters: none\n"));
        assert!(txt.ends_with("Sort: source order\n"));
        assert!(!txt.contains("Ascending"));
    }

    #[test]
    fn truncate_marks_cut_cells() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
