//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments. CLI values override `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Sun-and-earth orbital scene viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Sphere longitude subdivisions (minimum 3).
    #[arg(long)]
    pub sectors: Option<u32>,

    /// Sphere latitude subdivisions (minimum 2).
    #[arg(long)]
    pub stacks: Option<u32>,

    /// Texture directory.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides the platform default).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(sectors) = args.sectors {
            self.scene.sector_count = sectors;
        }
        if let Some(stacks) = args.stacks {
            self.scene.stack_count = stacks;
        }
        if let Some(ref assets) = args.assets {
            self.scene.assets_dir = assets.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            width: None,
            height: None,
            sectors: None,
            stacks: None,
            assets: None,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            sectors: Some(72),
            stacks: Some(36),
            ..empty_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.scene.sector_count, 72);
        assert_eq!(config.scene.stack_count, 36);
        // Non-overridden fields keep their defaults.
        assert_eq!(config.window.height, 960);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&empty_args());
        assert_eq!(config, original);
    }
}
