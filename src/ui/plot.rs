use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Corner, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::present::{self, PieSeries, StackedBars, TrendSeries};
use crate::theme::Theme;

/// Donut ring radii (the ring is 0.4 of the radius wide).
const OUTER_RADIUS: f64 = 1.0;
const INNER_RADIUS: f64 = 0.6;
/// Largest angle covered by one ring segment, in radians.
const MAX_SEGMENT: f64 = 0.035;

// ---------------------------------------------------------------------------
// Loan status donut
// ---------------------------------------------------------------------------

/// Donut chart of the loan amount per status.
pub fn status_pie(ui: &mut Ui, series: &PieSeries, theme: &Theme, height: f32) {
    if !series.is_drawable() {
        no_data(ui, height);
        return;
    }

    let total: f64 = series.slices.iter().map(|s| s.amount.max(0.0)).sum();

    Plot::new("loan_status_pie")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default().position(Corner::RightTop))
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.4)
        .include_x(1.4)
        .include_y(-1.3)
        .include_y(1.3)
        .show(ui, |plot_ui| {
            let mut start = FRAC_PI_2;
            for slice in &series.slices {
                let sweep = TAU * slice.amount.max(0.0) / total;
                if sweep <= 0.0 {
                    continue;
                }

                // Same name on every segment → one legend entry per slice.
                for quad in ring_segments(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(quad))
                            .fill_color(slice.color)
                            .stroke(Stroke::new(1.0, slice.color))
                            .name(&slice.label),
                    );
                }

                let mid = start + sweep / 2.0;
                let r = OUTER_RADIUS + 0.15;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(r * mid.cos(), r * mid.sin()),
                        format!("{:.1}%", slice.percentage),
                    )
                    .color(theme.text.0),
                );
                start += sweep;
            }
        });
}

/// Split an arc of the ring into small convex quads.
fn ring_segments(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let steps = ((sweep / MAX_SEGMENT).ceil() as usize).max(1);
    let step = sweep / steps as f64;
    let polar = |r: f64, a: f64| [r * a.cos(), r * a.sin()];

    (0..steps)
        .map(|i| {
            let a0 = start + step * i as f64;
            let a1 = a0 + step;
            vec![
                polar(OUTER_RADIUS, a0),
                polar(OUTER_RADIUS, a1),
                polar(INNER_RADIUS, a1),
                polar(INNER_RADIUS, a0),
            ]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Yearly trend
// ---------------------------------------------------------------------------

/// Line chart of the loan amount per year, with a marker on each year.
pub fn trend_line(ui: &mut Ui, series: &TrendSeries, height: f32) {
    if series.points.is_empty() {
        no_data(ui, height);
        return;
    }

    Plot::new("loan_trend_line")
        .height(height)
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .y_axis_formatter(|mark, _range| present::group_thousands(mark.value, 0))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(series.points.clone()))
                    .color(series.color)
                    .width(2.0)
                    .name("Loan Amount"),
            );
            plot_ui.points(
                Points::new(series.points.clone())
                    .radius(4.0)
                    .color(series.color)
                    .name("Loan Amount"),
            );
        });
}

// ---------------------------------------------------------------------------
// Branch × status stacked bars
// ---------------------------------------------------------------------------

/// Stacked bar chart: one bar per branch, one layer per loan status.
pub fn branch_bars(ui: &mut Ui, bars: &StackedBars, height: f32) {
    if bars.branches.is_empty() {
        no_data(ui, height);
        return;
    }

    let labels = bars.branches.clone();

    Plot::new("branches_loan_status")
        .height(height)
        .legend(Legend::default().position(Corner::LeftTop))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .y_axis_formatter(|mark, _range| present::group_thousands(mark.value, 0))
        .show(ui, |plot_ui| {
            let mut charts: Vec<BarChart> = Vec::with_capacity(bars.layers.len());
            for layer in &bars.layers {
                let items: Vec<Bar> = layer
                    .values
                    .iter()
                    .zip(&bars.branches)
                    .enumerate()
                    .map(|(i, (&v, branch))| Bar::new(i as f64, v).width(0.6).name(branch))
                    .collect();

                let below: Vec<&BarChart> = charts.iter().collect();
                let chart = BarChart::new(items)
                    .color(layer.color)
                    .name(&layer.status)
                    .stack_on(&below);
                charts.push(chart);
            }
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn no_data(ui: &mut Ui, height: f32) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No data for the current filters");
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_segments_cover_the_sweep() {
        let segs = ring_segments(0.0, TAU);
        assert!(segs.len() > 100);
        assert!(segs.iter().all(|q| q.len() == 4));

        let first = segs.first().unwrap();
        let last = segs.last().unwrap();
        assert!((first[0][0] - OUTER_RADIUS).abs() < 1e-9);
        assert!((last[1][0] - OUTER_RADIUS).abs() < 1e-9);
        assert!(last[1][1].abs() < 1e-9);
    }

    #[test]
    fn tiny_sweep_is_one_segment() {
        assert_eq!(ring_segments(1.0, 0.001).len(), 1);
    }
}
