//! ASCII/Unicode line chart for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each series is drawn with its own glyph (`R` revenue, `N` net income,
//! `G` gross profit). Data points overwrite connecting lines; connecting
//! lines only fill empty cells.

use crate::report::projection::ChartData;

/// Render the chart into a `width` x `height` character grid plus header and legend.
pub fn render_ascii_chart(chart: &ChartData, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let n = chart.labels.len();

    let mut out = String::new();
    if n == 0 {
        out.push_str("Plot: no records\n");
        return out;
    }

    let [y_min, y_max] = chart.y_bounds();
    let mut grid = vec![vec![' '; width]; height];

    // Lines first (so points can overlay).
    for s in &chart.series {
        let mut prev = None;
        for (i, &v) in s.values.iter().enumerate() {
            let cell = (map_x(i, n, width), map_y(v, y_min, y_max, height));
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, cell.0, cell.1, '.');
            }
            prev = Some(cell);
        }
    }
    for s in &chart.series {
        for (i, &v) in s.values.iter().enumerate() {
            grid[map_y(v, y_min, y_max, height)][map_x(i, n, width)] = s.glyph;
        }
    }

    out.push_str(&format!(
        "Plot: {} .. {} | y=[{y_min:.1}, {y_max:.1}]B\n",
        chart.labels[0],
        chart.labels[n - 1]
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    let legend: Vec<String> = chart
        .series
        .iter()
        .map(|s| format!("{} {}", s.glyph, s.label))
        .collect();
    out.push_str(&legend.join("  "));
    out.push('\n');

    out
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FinancialRecord;
    use crate::report::projection::chart_series;

    fn rec(date: &str, revenue: i64, net_income: i64, gross_profit: i64) -> FinancialRecord {
        FinancialRecord {
            date: date.to_string(),
            revenue,
            net_income,
            gross_profit,
            eps: 0.0,
            operating_income: 0,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let records = vec![
            rec("2020-01-01", 10_000_000_000, 0, 5_000_000_000),
            rec("2021-01-01", 20_000_000_000, 0, 5_000_000_000),
        ];
        let txt = render_ascii_chart(&chart_series(&records), 10, 5);
        let expected = concat!(
            "Plot: 2020-01-01 .. 2021-01-01 | y=[-1.0, 21.0]B\n",
            "       ..R\n",
            "   ....\n",
            "R..\n",
            "G........G\n",
            "N........N\n",
            "R Revenue (in billions)  N Net Income (in billions)  G Gross Profit (in billions)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_record_plots_in_first_column() {
        let records = vec![rec("2020-01-01", 3_000_000_000, 1_000_000_000, 2_000_000_000)];
        let txt = render_ascii_chart(&chart_series(&records), 10, 5);
        let grid: Vec<&str> = txt.lines().skip(1).take(5).collect();
        assert!(grid.iter().all(|row| row.len() <= 1));
        assert_eq!(grid.iter().filter(|row| !row.is_empty()).count(), 3);
    }

    #[test]
    fn empty_chart_renders_placeholder() {
        assert_eq!(render_ascii_chart(&chart_series(&[]), 20, 5), "Plot: no records\n");
    }
}
