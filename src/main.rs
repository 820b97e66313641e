//! Lira Rates - Lebanese Currency Exchange Rate Dashboard
//!
//! Loads the public exchange rate table and shows it through four interactive charts.

mod charts;
mod config;
mod data;
mod gui;
mod presenter;
mod report;

use config::DashboardConfig;
use eframe::egui;
use gui::DashboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(config.title.as_str()),
        ..Default::default()
    };

    eframe::run_native(
        "Lira Rates",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
