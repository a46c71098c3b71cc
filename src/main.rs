mod app;
mod ui;

use app::RadarApp;
use eframe::egui;
use sa3_radar::config::{DashboardConfig, DEFAULT_TITLE};

fn main() -> eframe::Result {
    env_logger::init();

    let app = match DashboardConfig::resolve() {
        Ok(config) => RadarApp::load(&config),
        Err(e) => {
            log::error!("Failed to read settings: {e:#}");
            RadarApp::failed(DEFAULT_TITLE, format!("Error: {e:#}"))
        }
    };
    let title = app.title().to_string();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
}
