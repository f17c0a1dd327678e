//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Scene settings.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Mouse look sensitivity, radians per pixel.
    pub mouse_sensitivity: f32,
    /// Fly camera speed in world units per second.
    pub move_speed: f32,
}

/// Scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Sphere longitude subdivisions. The mesher requires at least 3.
    pub sector_count: u32,
    /// Sphere latitude subdivisions. The mesher requires at least 2.
    pub stack_count: u32,
    /// Directory holding body textures (`<body>_diffuse.png` /
    /// `<body>_specular.png`). Procedural fallbacks are used when empty or
    /// when a file is missing.
    pub assets_dir: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter override (e.g. "debug", "info,wgpu=warn").
    pub log_level: String,
    /// Log the per-body mesh statistics at startup.
    pub log_mesh_stats: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1416,
            height: 960,
            title: "Orrery".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.003,
            move_speed: 4.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sector_count: 192,
            stack_count: 96,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: String::new(),
            log_mesh_stats: false,
        }
    }
}

/// Platform config directory for the application, e.g.
/// `~/.config/orrery` on Linux. Falls back to the current directory when the
/// platform offers no config location.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("orrery"))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Load config from `config_dir/config.ron`, writing a default file when
    /// none exists yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save this config to `config_dir/config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::Write)?;

        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;
        std::fs::write(config_dir.join("config.ron"), serialized).map_err(ConfigError::Write)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1416"));
        assert!(ron_str.contains("sector_count: 192"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (width: 800))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, WindowConfig::default().height);
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.scene.sector_count = 72;
        config.scene.stack_count = 36;
        config.window.title = "Test Orrery".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
