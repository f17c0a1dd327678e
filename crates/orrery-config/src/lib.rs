//! Configuration: RON-persisted settings with CLI overrides.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, InputConfig, SceneConfig, WindowConfig, default_config_dir};
pub use error::ConfigError;
