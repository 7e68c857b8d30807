// Device Authorization Portal - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config file loading and logging initialisation
// 3. Opening the request store
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can
// use `crate::app::...`, `crate::core::...` etc.
pub use device_auth::app;

pub use device_auth::core;
pub use device_auth::platform;
pub use device_auth::ui;
pub use device_auth::util;

use clap::Parser;
use std::path::PathBuf;

/// Device Authorization Portal - submit and review device requests.
///
/// Requests are kept in a local JSON file and can be exported to CSV.
#[derive(Parser, Debug)]
#[command(name = "device-auth", version, about)]
struct Cli {
    /// JSON file holding the request collection (overrides config.toml).
    #[arg(short = 'f', long = "data-file")]
    data_file: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and read config.toml before logging so the
    // configured level and log file take effect.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Device Authorization Portal starting"
    );

    // Storage file: CLI override > config > platform default
    let data_file = cli
        .data_file
        .or_else(|| config.data_file.clone())
        .unwrap_or_else(|| platform_paths.storage_file());

    let persistence = app::persistence::JsonFileStore::new(data_file);
    tracing::info!(path = %persistence.path().display(), "Using request storage file");

    let store = app::store::RequestStore::open(Box::new(persistence));

    let mut state = app::state::AppState::new(store, cli.debug);
    state.dark_mode = config.dark_mode;
    state.ui_font_size = config.font_size;
    state.csv_file_name = config.csv_file_name.clone();

    tracing::info!(requests = state.store.len(), "Ready to launch GUI");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, state.dark_mode, state.ui_font_size);
            Ok(Box::new(gui::DeviceAuthApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch Device Authorization Portal: {e}");
        std::process::exit(1);
    }
}
