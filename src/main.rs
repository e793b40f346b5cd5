use clap::Parser;
use eframe::egui;

use salary_dashboard::app::SalaryDashboardApp;
use salary_dashboard::config::{Cli, DashboardConfig};

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from(Cli::parse());
    log::info!("Using dataset {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Baseball Salaries – Percentile Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashboardApp::new(config)))),
    )
}
