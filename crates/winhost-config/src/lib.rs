//! winhost configuration system.
//!
//! Provides TOML-based configuration for the host application. All config
//! sections use defaults, so partial configs (or none at all) work.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use winhost_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{EmbedConfig, LogLevel, LoggingConfig, WinhostConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use winhost_common::ConfigError;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<WinhostConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<WinhostConfig, ConfigError> {
    toml_loader::load_from_path(path)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &WinhostConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = WinhostConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"embed\""));
        assert!(json.contains("\"idle_timeout_ms\": 10000"));
        assert!(json.contains("\"logging\""));
        assert!(json.contains("\"info\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = WinhostConfig::default();
        let json = config_to_json(&config);
        let parsed: WinhostConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
