use crate::color::BucketColors;
use crate::config::DashboardConfig;
use crate::data::cache::shared_dataset;
use crate::data::filter::FilterSelection;
use crate::data::model::SalaryDataset;
use crate::report::{generate_report_with, Report};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Shared dataset (None until loaded, or when loading failed).
    pub dataset: Option<&'static SalaryDataset>,

    /// Current sidebar selection.
    pub selection: FilterSelection,

    /// Report for `selection` (cached until the selection changes).
    pub report: Option<Report>,

    /// Line colour per percentile bucket.
    pub colors: BucketColors,

    /// Load error shown in place of the report.
    pub status_message: Option<String>,
}

impl AppState {
    /// Fresh state: the full year range and the first position selected.
    pub fn new(config: DashboardConfig) -> Self {
        let (first_year, last_year) = config.year_bounds;
        let position = config.positions.first().cloned().unwrap_or_default();
        Self {
            config,
            dataset: None,
            selection: FilterSelection::new(first_year, last_year, position),
            report: None,
            colors: BucketColors::default(),
            status_message: None,
        }
    }

    /// Load the dataset through the process-wide handle.
    pub fn load(&mut self) {
        match shared_dataset(&self.config.data_path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!(
                    "Failed to load {}: {e}",
                    self.config.data_path.display()
                );
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a loaded dataset and build the first report.
    pub fn set_dataset(&mut self, dataset: &'static SalaryDataset) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.report = None;
        self.refresh();
    }

    /// Move the lower year bound, pushing the upper bound along if needed.
    pub fn set_first_year(&mut self, year: i32) {
        let year = self.config.clamp_year(year);
        self.selection.first_year = year;
        if self.selection.last_year < year {
            self.selection.last_year = year;
        }
        self.refresh();
    }

    /// Move the upper year bound, pushing the lower bound along if needed.
    pub fn set_last_year(&mut self, year: i32) {
        let year = self.config.clamp_year(year);
        self.selection.last_year = year;
        if self.selection.first_year > year {
            self.selection.first_year = year;
        }
        self.refresh();
    }

    pub fn set_position(&mut self, position: &str) {
        self.selection.position = position.to_string();
        self.refresh();
    }

    /// Regenerate the report if the selection differs from the cached one.
    pub fn refresh(&mut self) {
        let Some(dataset) = self.dataset else {
            return;
        };
        let stale = self
            .report
            .as_ref()
            .map_or(true, |r| r.selection != self.selection);
        if stale {
            self.report = Some(generate_report_with(
                dataset,
                &self.selection,
                self.config.outlier_count,
            ));
        }
    }
}
