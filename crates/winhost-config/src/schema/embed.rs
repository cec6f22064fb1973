//! Embedded-application settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default bound on the input-idle wait, in milliseconds.
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 10_000;

/// Which executable to embed and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmbedConfig {
    /// Path of the application to launch. Empty disables embedding.
    pub executable: String,
    /// Upper bound on waiting for the launched process to become input-idle
    /// (valid range: 100-300000).
    pub idle_timeout_ms: u64,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            executable: String::new(),
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
        }
    }
}

impl EmbedConfig {
    /// The executable path, or `None` when it is empty or whitespace.
    pub fn executable_path(&self) -> Option<PathBuf> {
        let trimmed = self.executable.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_disabled() {
        let config = EmbedConfig::default();
        assert!(config.executable.is_empty());
        assert_eq!(config.executable_path(), None);
        assert_eq!(config.idle_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn whitespace_executable_is_disabled() {
        let config = EmbedConfig {
            executable: "   \t".into(),
            ..Default::default()
        };
        assert_eq!(config.executable_path(), None);
    }

    #[test]
    fn executable_path_is_trimmed() {
        let config = EmbedConfig {
            executable: "  C:\\Tools\\viewer.exe ".into(),
            ..Default::default()
        };
        assert_eq!(
            config.executable_path(),
            Some(PathBuf::from("C:\\Tools\\viewer.exe"))
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: EmbedConfig = toml::from_str(r#"executable = "notepad.exe""#).unwrap();
        assert_eq!(config.executable, "notepad.exe");
        assert_eq!(config.idle_timeout_ms, DEFAULT_IDLE_TIMEOUT_MS);
    }
}
