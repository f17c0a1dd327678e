//! The orrery binary: configuration, logging, and the event loop.

use clap::Parser;

use orrery_app::window;
use orrery_config::{CliArgs, Config, default_config_dir};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .unwrap_or_else(default_config_dir);
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {err}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(err) = window::run(config) {
        tracing::error!("Event loop error: {err}");
        std::process::exit(1);
    }
}
