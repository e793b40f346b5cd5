use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::SalaryRecord;
use crate::report::{PercentileTable, PERCENTILE_BUCKETS};

/// Text shown for a missing percentile cell.
pub const MISSING_MARKER: &str = "n/a";

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Record tables (raw head, filtered head, outliers)
// ---------------------------------------------------------------------------

/// Render `rows` as a table with a leading index column.
///
/// Each row is `(index, record)`; the index is whatever the caller wants to
/// show (source row number, or rank for the outlier list).
pub fn records_table(ui: &mut Ui, id: &str, columns: &[String], rows: &[(usize, &SalaryRecord)]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(40.0))
            .columns(Column::auto().at_least(70.0), columns.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("");
                });
                for name in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for (index, rec) in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.strong(index.to_string());
                        });
                        for name in columns {
                            row.col(|ui: &mut Ui| {
                                ui.label(rec.cell_text(name));
                            });
                        }
                    });
                }
            });
    });
    if rows.is_empty() {
        ui.weak("(no rows)");
    }
}

// ---------------------------------------------------------------------------
// Percentile table
// ---------------------------------------------------------------------------

/// Format a percentile cell in millions.
pub fn format_cell(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.6}"))
        .unwrap_or_else(|| MISSING_MARKER.to_string())
}

/// Render the year × bucket table.
pub fn percentile_table(ui: &mut Ui, table: &PercentileTable) {
    ui.push_id("percentile_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(50.0))
            .columns(Column::auto().at_least(70.0), PERCENTILE_BUCKETS.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("year");
                });
                for percent in PERCENTILE_BUCKETS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(percent.to_string());
                    });
                }
            })
            .body(|mut body| {
                for r in &table.rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.strong(r.year.to_string());
                        });
                        for value in r.values {
                            row.col(|ui: &mut Ui| {
                                ui.label(format_cell(value));
                            });
                        }
                    });
                }
            });
    });
    if table.is_empty() {
        ui.weak("(no years in range)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cells_use_marker() {
        assert_eq!(format_cell(None), MISSING_MARKER);
        assert_eq!(format_cell(Some(0.1)), "0.100000");
    }
}
