//! TOML config file loading and creation.

use crate::schema::WinhostConfig;
use crate::validation;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use winhost_common::ConfigError;

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. A file that parses but fails
/// validation is logged and replaced by the default config.
pub fn load_from_path(path: &Path) -> Result<WinhostConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: WinhostConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(WinhostConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Windows: `%APPDATA%\winhost\config.toml`
/// On Linux: `~/.config/winhost/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<WinhostConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(WinhostConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("winhost").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Generate the default TOML config content with comments.
fn default_config_toml() -> &'static str {
    r##"# winhost configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[embed]
# Application whose main window is embedded. Empty disables embedding.
# executable = 'C:\Program Files\Viewer\viewer.exe'
# idle_timeout_ms = 10000   # 100-300000

[logging]
# level = "info"            # trace, debug, info, warn, error
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LogLevel;

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(p) if p == path));
    }

    #[test]
    fn loads_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[embed]\nexecutable = \"viewer.exe\"\nidle_timeout_ms = 500\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.embed.executable, "viewer.exe");
        assert_eq!(config.embed.idle_timeout_ms, 500);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[embed\nexecutable = ").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[embed]\nexecutable = \"viewer.exe\"\nidle_timeout_ms = 1\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config, WinhostConfig::default());
    }

    #[test]
    fn created_default_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        create_default_config(&path).unwrap();

        assert!(path.exists());
        let config = load_from_path(&path).unwrap();
        assert_eq!(config, WinhostConfig::default());
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("winhost/config.toml") || path.ends_with("winhost\\config.toml"));
        }
    }
}
