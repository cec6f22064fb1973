//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Minimum level emitted by the log subscriber.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// An `EnvFilter` directive scoped to the winhost crates.
    pub fn directive(self) -> String {
        format!("winhost={}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_info() {
        assert_eq!(LoggingConfig::default().level, LogLevel::Info);
    }

    #[test]
    fn directive_targets_winhost() {
        assert_eq!(LogLevel::Debug.directive(), "winhost=debug");
        assert_eq!(LogLevel::Error.directive(), "winhost=error");
    }

    #[test]
    fn level_parses_lowercase() {
        let config: LoggingConfig = toml::from_str(r#"level = "warn""#).unwrap();
        assert_eq!(config.level, LogLevel::Warn);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let result: Result<LoggingConfig, _> = toml::from_str(r#"level = "verbose""#);
        assert!(result.is_err());
    }
}
