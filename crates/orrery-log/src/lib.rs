//! Structured logging via the `tracing` ecosystem.
//!
//! Console output with uptime timestamps and module targets; in debug builds
//! an additional JSON file layer for post-mortem analysis. `RUST_LOG` wins
//! over everything; otherwise the config's `debug.log_level` (when set)
//! overrides the default filter.

use orrery_config::Config;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter: info everywhere, with the noisier GPU crates at warn.
const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - optional directory for the JSON log file (debug builds only)
/// * `debug_build` - whether to attach the file layer
/// * `config` - optional config whose `debug.log_level` overrides the default
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = config
        .map(|c| c.debug.log_level.as_str())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("orrery.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The default [`EnvFilter`], exposed for tests and tools.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_quiets_gpu_crates() {
        let filter_str = format!("{}", default_env_filter());
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_config_level_overrides_default() {
        let mut config = Config::default();
        config.debug.log_level = "debug,orrery_mesh=trace".to_string();

        let filter_str = config.debug.log_level.as_str();
        let filter = EnvFilter::new(filter_str);
        let rendered = format!("{filter}");
        assert!(rendered.contains("orrery_mesh=trace"));
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let config = Config::default();
        assert!(config.debug.log_level.is_empty());
        // An empty override must not produce an empty filter.
        let effective = Some(&config)
            .map(|c| c.debug.log_level.as_str())
            .filter(|level| !level.is_empty())
            .unwrap_or(DEFAULT_FILTER);
        assert_eq!(effective, DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parses_common_inputs() {
        for filter_str in ["info", "debug,orrery_render=trace", "warn", "error"] {
            assert!(
                EnvFilter::try_from(filter_str).is_ok(),
                "failed to parse filter {filter_str}"
            );
        }
    }

    #[test]
    fn test_log_file_path_shape() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join("orrery.log");
        assert_eq!(log_file_path.file_name().unwrap(), "orrery.log");
    }
}
