//! Plotters-powered line chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::report::Series;

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call, from the
/// display projection.
pub struct LinePlottersChart<'a> {
    /// X-axis labels; series value `i` is drawn at `x = i`.
    pub labels: &'a [String],
    pub series: &'a [Series],
    /// Y bounds in billions.
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
}

impl<'a> Widget for LinePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.labels.len();
        if n == 0 {
            return;
        }
        // A single record still gets a non-degenerate x range.
        let (x0, x1) = if n == 1 { (-0.5, 0.5) } else { (0.0, (n - 1) as f64) };
        let [y0, y1] = self.y_bounds;
        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }

        let labels = self.labels;
        let fmt_x = move |v: &f64| -> String {
            let idx = v.round();
            if (v - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels
                .get(idx as usize)
                // Fiscal year is enough on a terminal axis.
                .map(|d| d.get(..4).unwrap_or(d.as_str()).to_string())
                .unwrap_or_default()
        };

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(self.y_label)
                .x_labels(n.clamp(2, 8))
                .y_labels(5)
                .x_label_formatter(&fmt_x)
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for s in self.series {
                let (r, g, b) = s.color;
                let color = RGBColor(r, g, b);
                let points = s.values.iter().enumerate().map(|(i, &v)| (i as f64, v));

                chart.draw_series(LineSeries::new(points.clone(), &color))?;
                // `Circle` radii are mis-scaled by the ratatui backend; mark points with pixels.
                chart.draw_series(points.map(|p| Pixel::new(p, color)))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
