use std::path::PathBuf;

use clap::Parser;

use crate::data::model::POSITIONS;
use crate::report::DEFAULT_OUTLIER_COUNT;

/// Data file read when none is given on the command line.
pub const DEFAULT_DATA_PATH: &str = "baseball-salaries-simplified.csv";

/// Command line of the dashboard binary.
#[derive(Debug, Parser)]
#[command(name = "salary-dashboard", about = "Visualize baseball salary percentiles")]
pub struct Cli {
    /// Salary dataset (.csv, .json or .parquet)
    #[arg(default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,
}

/// Static settings of the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Inclusive bounds of the year sliders.
    pub year_bounds: (i32, i32),
    pub positions: Vec<String>,
    /// Rows shown in the raw and filtered head tables.
    pub head_rows: usize,
    pub outlier_count: usize,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            year_bounds: (1991, 2017),
            positions: POSITIONS.iter().map(|p| p.to_string()).collect(),
            head_rows: 5,
            outlier_count: DEFAULT_OUTLIER_COUNT,
            window_size: [1100.0, 900.0],
        }
    }
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        Self {
            data_path: cli.data,
            ..Default::default()
        }
    }
}

impl DashboardConfig {
    /// Clamp a year into the slider bounds.
    pub fn clamp_year(&self, year: i32) -> i32 {
        year.clamp(self.year_bounds.0, self.year_bounds.1)
    }
}
