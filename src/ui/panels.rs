use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::state::AppState;
use crate::ui::{plot, tables};

// ---------------------------------------------------------------------------
// Left side panel – description and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("About");
    ui.label(
        "This is a small interactive dashboard that does a simple visualization of \
         Major League Baseball players' salary trends.",
    );
    ui.separator();

    let (min_year, max_year) = state.config.year_bounds;

    ui.strong("Select year range to focus on:");
    let mut first = state.selection.first_year;
    if ui
        .add(Slider::new(&mut first, min_year..=max_year).text("from").step_by(1.0))
        .changed()
    {
        state.set_first_year(first);
    }
    let mut last = state.selection.last_year;
    if ui
        .add(Slider::new(&mut last, min_year..=max_year).text("to").step_by(1.0))
        .changed()
    {
        state.set_last_year(last);
    }
    ui.add_space(8.0);

    ui.strong("What position would you like to focus on?");
    let current = state.selection.position.clone();
    // Codes absent from the data are still selectable; they just yield an
    // empty report.
    let positions: Vec<(String, bool)> = state
        .config
        .positions
        .iter()
        .map(|p| (p.clone(), state.dataset.map_or(true, |ds| ds.has_position(p))))
        .collect();
    egui::ComboBox::from_id_salt("position")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for (pos, present) in &positions {
                let mut text = RichText::new(pos);
                if !present {
                    text = text.weak();
                }
                if ui.selectable_label(current == *pos, text).clicked() {
                    state.set_position(pos);
                }
            }
        });
    if positions.iter().any(|(p, present)| *p == current && !present) {
        ui.weak(format!("No {current} rows in this dataset."));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Baseball Salaries");
        ui.separator();

        if let (Some(ds), Some(report)) = (state.dataset, &state.report) {
            ui.label(format!(
                "{} records loaded, {} selected",
                ds.len(),
                report.subset_len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – the report
// ---------------------------------------------------------------------------

/// Render the report top to bottom: raw head, filtered head, percentile
/// table, chart, outliers.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Visualizing Baseball Salaries");
            ui.label("A description of the dashboard as well as input constraints are located in the sidebar.");
            ui.add_space(8.0);

            if let Some(msg) = &state.status_message {
                ui.label(RichText::new(msg).color(Color32::RED).strong());
                return;
            }
            let (Some(dataset), Some(report)) = (state.dataset, &state.report) else {
                ui.label("No dataset loaded.");
                return;
            };
            let head = state.config.head_rows;

            ui.label(format!(
                "The first {head} rows of the ORIGINAL dataset:"
            ));
            let raw: Vec<_> = dataset.records.iter().take(head).enumerate().collect();
            tables::records_table(ui, "raw_head", &dataset.column_names, &raw);
            ui.add_space(12.0);

            ui.label(format!(
                "Use the input controls in the sidebar to filter the dataset. \
                 Below you will see the first {head} rows of the FILTERED dataset."
            ));
            let filtered: Vec<_> = report
                .subset
                .iter()
                .take(head)
                .map(|&i| (i, &dataset.records[i]))
                .collect();
            tables::records_table(ui, "filtered_head", &dataset.column_names, &filtered);
            ui.add_space(12.0);

            ui.label(
                "There are too many data points to plot them all, so we plot salary \
                 percentiles over time instead (in millions of dollars):",
            );
            tables::percentile_table(ui, &report.percentiles);
            ui.add_space(12.0);

            ui.label("Now we can view the trends in the salary distribution over time.");
            plot::percentile_plot(ui, report, &state.colors);
            ui.add_space(12.0);

            ui.label("Makes you wonder who created the spikes on the graph... Let's find out!");
            let outliers: Vec<_> = report.outliers.iter().enumerate().collect();
            tables::records_table(ui, "outliers", &dataset.column_names, &outliers);
        });
}
