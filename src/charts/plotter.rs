//! Chart Plotter Module
//! Interactive time-series line charts using egui_plot.

use crate::pipeline::DatasetChart;
use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{HLine, Legend, Line, LineStyle, Plot, PlotPoints, Points};

/// Color palette for plotted series
pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
];

/// Median reference line color
pub const MEDIAN_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange

const CHART_HEIGHT: f32 = 300.0;
const MARKER_RADIUS: f32 = 2.5;

/// Creates time-series visualizations using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// X coordinate of a calendar date (days since CE).
    pub fn day_number(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    fn format_day(value: f64) -> String {
        NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Draw the line chart for one dataset, with markers per point and an
    /// optional dashed median reference line.
    pub fn draw_line_chart(ui: &mut egui::Ui, chart: &DatasetChart) {
        Plot::new(format!("chart_{}", chart.key))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_formatter(|mark, _range| Self::format_day(mark.value))
            .label_formatter(|name, point| {
                if name.is_empty() {
                    format!("{}\n{:.0}", Self::format_day(point.x), point.y)
                } else {
                    format!("{}\n{}: {:.0}", Self::format_day(point.x), name, point.y)
                }
            })
            .show(ui, |plot_ui| {
                for (idx, series) in chart.series.iter().enumerate() {
                    let color = PALETTE[idx % PALETTE.len()];
                    let line_points: PlotPoints = series
                        .points
                        .iter()
                        .map(|(date, value)| [Self::day_number(*date), *value])
                        .collect();
                    plot_ui.line(
                        Line::new(line_points)
                            .name(&series.label)
                            .color(color)
                            .width(2.0),
                    );

                    let markers: PlotPoints = series
                        .points
                        .iter()
                        .map(|(date, value)| [Self::day_number(*date), *value])
                        .collect();
                    plot_ui.points(Points::new(markers).color(color).radius(MARKER_RADIUS));
                }

                if let Some(median) = chart.median {
                    plot_ui.hline(
                        HLine::new(median)
                            .color(MEDIAN_COLOR)
                            .style(LineStyle::dashed_loose())
                            .name(format!("Median: {}", median as i64)),
                    );
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_number_round_trips_through_formatter() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let x = ChartPlotter::day_number(date);
        assert_eq!(ChartPlotter::format_day(x), "2024-02-29");
    }
}
