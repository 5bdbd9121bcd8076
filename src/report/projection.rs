//! Display projection: records -> table rows and chart series.
//!
//! Scaling to billions happens here and only here. The records passed in are
//! never modified.

use crate::domain::{Amount, FinancialRecord, BILLION};

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub date: String,
    pub revenue: String,
    pub net_income: String,
    pub gross_profit: String,
    pub eps: String,
    pub operating_income: String,
}

impl TableRow {
    pub fn cells(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.revenue.as_str(),
            self.net_income.as_str(),
            self.gross_profit.as_str(),
            self.eps.as_str(),
            self.operating_income.as_str(),
        ]
    }
}

pub const TABLE_HEADERS: [&str; 6] = [
    "Date",
    "Revenue",
    "Net Income",
    "Gross Profit",
    "EPS",
    "Operating Income",
];

/// A labeled chart line. `values[i]` belongs to `ChartData::labels[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub color: (u8, u8, u8),
    /// Glyph used by the text renderer.
    pub glyph: char,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// X-axis labels (record dates), in display order.
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Padded y range over every series.
    ///
    /// Falls back to `[0, 1]` for empty data and widens a flat range.
    pub fn y_bounds(&self) -> [f64; 2] {
        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for s in &self.series {
            for &v in &s.values {
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        if !lo.is_finite() || !hi.is_finite() {
            return [0.0, 1.0];
        }
        if hi <= lo {
            return [lo - 1.0, hi + 1.0];
        }
        let pad = (hi - lo) * 0.05;
        [lo - pad, hi + pad]
    }
}

const CHART_LINES: [(Amount, &str, (u8, u8, u8), char); 3] = [
    (Amount::Revenue, "Revenue (in billions)", (0x4C, 0xAF, 0x50), 'R'),
    (Amount::NetIncome, "Net Income (in billions)", (0xFF, 0x57, 0x33), 'N'),
    (Amount::GrossProfit, "Gross Profit (in billions)", (0x2E, 0x86, 0xC1), 'G'),
];

pub fn table_rows(records: &[FinancialRecord]) -> Vec<TableRow> {
    records
        .iter()
        .map(|r| TableRow {
            date: r.date.clone(),
            revenue: fmt_billions(r.revenue),
            net_income: fmt_billions(r.net_income),
            gross_profit: fmt_billions(r.gross_profit),
            eps: format!("{}", r.eps),
            operating_income: fmt_billions(r.operating_income),
        })
        .collect()
}

pub fn chart_series(records: &[FinancialRecord]) -> ChartData {
    let labels = records.iter().map(|r| r.date.clone()).collect();
    let series = CHART_LINES
        .iter()
        .map(|&(amount, label, color, glyph)| Series {
            label,
            color,
            glyph,
            values: records.iter().map(|r| r.billions(amount)).collect(),
        })
        .collect();
    ChartData { labels, series }
}

/// `391035000000` -> `"391.0B"`. Halves round away from zero (`1.25B` -> `"1.3B"`).
pub fn fmt_billions(amount: i64) -> String {
    let tenths = (amount as f64 / (BILLION / 10.0)).round();
    format!("{:.1}B", tenths / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FinancialRecord {
        FinancialRecord {
            date: "2024-09-28".to_string(),
            revenue: 391_035_000_000,
            net_income: -93_736_000_000,
            gross_profit: 180_683_000_000,
            eps: 6.11,
            operating_income: 123_216_000_000,
        }
    }

    #[test]
    fn table_rows_scale_and_suffix_amounts() {
        let rows = table_rows(&[record()]);
        assert_eq!(
            rows[0].cells(),
            ["2024-09-28", "391.0B", "-93.7B", "180.7B", "6.11", "123.2B"]
        );
    }

    #[test]
    fn table_rows_round_half_tenths_away_from_zero() {
        let mut r = record();
        r.revenue = 1_250_000_000;
        r.net_income = -250_000_000;
        r.gross_profit = 2_250_000_000;
        r.operating_income = 250_000_000;
        let row = &table_rows(&[r])[0];
        assert_eq!(row.revenue, "1.3B");
        assert_eq!(row.net_income, "-0.3B");
        assert_eq!(row.gross_profit, "2.3B");
        assert_eq!(row.operating_income, "0.3B");
    }

    #[test]
    fn eps_keeps_shortest_representation() {
        let mut r = record();
        r.eps = 6.0;
        assert_eq!(table_rows(&[r])[0].eps, "6");
    }

    #[test]
    fn chart_has_three_series_over_dates() {
        let mut older = record();
        older.date = "2023-09-30".to_string();
        older.revenue = 383_285_000_000;
        let records = vec![record(), older];

        let chart = chart_series(&records);
        assert_eq!(chart.labels, ["2024-09-28", "2023-09-30"]);
        let labels: Vec<&str> = chart.series.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            ["Revenue (in billions)", "Net Income (in billions)", "Gross Profit (in billions)"]
        );
        assert!((chart.series[0].values[1] - 383.285).abs() < 1e-9);
        assert!((chart.series[1].values[0] + 93.736).abs() < 1e-9);
        // Projection must not touch the source.
        assert_eq!(records[0], record());
    }

    #[test]
    fn y_bounds_fall_back_for_empty_and_flat_data() {
        assert_eq!(chart_series(&[]).y_bounds(), [0.0, 1.0]);

        let flat = FinancialRecord {
            date: "2020-01-01".to_string(),
            revenue: 2_000_000_000,
            net_income: 2_000_000_000,
            gross_profit: 2_000_000_000,
            eps: 0.0,
            operating_income: 0,
        };
        assert_eq!(chart_series(&[flat]).y_bounds(), [1.0, 3.0]);
    }
}
