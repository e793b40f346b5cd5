use eframe::egui::Ui;
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};

use crate::color::BucketColors;
use crate::report::{PercentileTable, Report, PERCENTILE_BUCKETS};

// ---------------------------------------------------------------------------
// Percentile plot
// ---------------------------------------------------------------------------

/// Split a `(year, value)` series into runs of consecutive present values,
/// so missing cells show as gaps instead of being bridged.
pub fn segments(series: impl IntoIterator<Item = (i32, Option<f64>)>) -> Vec<Vec<[f64; 2]>> {
    let mut out = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (year, value) in series {
        match value {
            Some(v) => current.push([f64::from(year), v]),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Render one line per percentile bucket against year.
pub fn percentile_plot(ui: &mut Ui, report: &Report, colors: &BucketColors) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(report.title());
    });

    if report.percentiles.is_empty() {
        ui.label("No years to plot for this range.");
        return;
    }

    Plot::new("percentile_plot")
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label("Year")
        .y_axis_label("Salary percentiles in $1M")
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .height(600.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for line in bucket_lines(&report.percentiles, colors) {
                plot_ui.line(line);
            }
        });
}

/// Lines sharing a bucket share a name, so the legend lists each bucket once.
fn bucket_lines(table: &PercentileTable, colors: &BucketColors) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (col, percent) in PERCENTILE_BUCKETS.iter().enumerate() {
        let name = percent.to_string();
        for run in segments(table.column(col)) {
            lines.push(
                Line::new(PlotPoints::new(run))
                    .name(&name)
                    .color(colors.color_for(col))
                    .width(1.5),
            );
        }
    }
    lines
}
