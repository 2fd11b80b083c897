//! Creative Practice Dashboard
//!
//! Renders subscription, trial and student time series from remotely hosted
//! CSV files, filtered by a user-selected date range.

mod charts;
mod config;
mod data;
mod daterange;
mod gui;
mod pipeline;
mod stats;

use config::DashboardConfig;
use eframe::egui;
use gui::DashboardApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Optional JSON config as the first argument; built-in sources otherwise.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match DashboardConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!("falling back to built-in sources: {error:#}");
            DashboardConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Creative Practice Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Creative Practice Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
