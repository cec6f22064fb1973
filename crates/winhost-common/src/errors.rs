use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("process error: {0}")]
    ProcessError(String),

    #[error("window error: {0}")]
    WindowError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Failure kinds of an embedding attempt.
///
/// None of these escape to the host framework as a panic; the session logs
/// them, hides the host surface, and reports them through `LaunchOutcome`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedError {
    #[error("launch failed: {0}")]
    Launch(String),

    #[error("window bind failed: {0}")]
    WindowBind(String),

    #[error("reparent failed: {0}")]
    Reparent(String),

    #[error("process did not become input-idle within {0:?}")]
    Timeout(Duration),

    #[error("host surface has no native window handle")]
    HostDetached,

    #[error("session disposed while the launch was in flight")]
    Aborted,
}

impl EmbedError {
    /// Whether this failure should collapse the host surface.
    ///
    /// An aborted launch belongs to a session that is already being torn
    /// down, so there is nothing left to hide.
    pub fn hides_surface(&self) -> bool {
        !matches!(self, EmbedError::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("idle_timeout_ms out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: idle_timeout_ms out of range"
        );
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::ProcessError("access denied".into());
        assert_eq!(err.to_string(), "process error: access denied");

        let err = PlatformError::WindowError("invalid window handle".into());
        assert_eq!(err.to_string(), "window error: invalid window handle");

        let err = PlatformError::NotSupported("linux wayland".into());
        assert_eq!(err.to_string(), "not supported: linux wayland");
    }

    #[test]
    fn embed_error_display() {
        let err = EmbedError::Launch("file not found".into());
        assert_eq!(err.to_string(), "launch failed: file not found");

        let err = EmbedError::WindowBind("no main window".into());
        assert_eq!(err.to_string(), "window bind failed: no main window");

        let err = EmbedError::Reparent("invalid handle".into());
        assert_eq!(err.to_string(), "reparent failed: invalid handle");

        let err = EmbedError::Timeout(Duration::from_millis(250));
        assert_eq!(
            err.to_string(),
            "process did not become input-idle within 250ms"
        );
    }

    #[test]
    fn only_aborted_keeps_surface_visible() {
        assert!(EmbedError::Launch("x".into()).hides_surface());
        assert!(EmbedError::WindowBind("x".into()).hides_surface());
        assert!(EmbedError::Reparent("x".into()).hides_surface());
        assert!(EmbedError::Timeout(Duration::from_secs(1)).hides_surface());
        assert!(EmbedError::HostDetached.hides_surface());
        assert!(!EmbedError::Aborted.hides_surface());
    }
}
