use std::path::Path;

use country_panda::app::CountryPandaApp;
use country_panda::config::{CONFIG_FILE, DashboardConfig};
use country_panda::data::loader;
use country_panda::state::AppState;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match DashboardConfig::load_or_default(Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring {CONFIG_FILE}: {e:#}");
            DashboardConfig::default()
        }
    };

    // The dataset is read exactly once; a bad source ends the process here.
    let dataset = match loader::load_file(&config.data_path, &config.key_column) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} rows with {} columns keyed by '{}' from {}",
        dataset.len(),
        dataset.columns().len(),
        dataset.key_column(),
        config.data_path.display()
    );

    let state = AppState::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(CountryPandaApp::new(state)))),
    )
}
