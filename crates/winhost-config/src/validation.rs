//! Configuration validation.
//!
//! Collects every range violation into a single `ConfigError`.

use crate::schema::WinhostConfig;
use winhost_common::ConfigError;

/// Accepted range for `embed.idle_timeout_ms`.
pub const IDLE_TIMEOUT_RANGE_MS: (u64, u64) = (100, 300_000);

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WinhostConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    let (min, max) = IDLE_TIMEOUT_RANGE_MS;
    validate_range(
        &mut errors,
        "embed.idle_timeout_ms",
        config.embed.idle_timeout_ms,
        min,
        max,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&WinhostConfig::default()).is_ok());
    }

    #[test]
    fn empty_executable_is_valid() {
        let mut config = WinhostConfig::default();
        config.embed.executable = String::new();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn timeout_bounds_are_inclusive() {
        let mut config = WinhostConfig::default();
        config.embed.idle_timeout_ms = 100;
        assert!(validate(&config).is_ok());
        config.embed.idle_timeout_ms = 300_000;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = WinhostConfig::default();
        config.embed.idle_timeout_ms = 0;
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("embed.idle_timeout_ms = 0"));
    }

    #[test]
    fn huge_timeout_is_rejected() {
        let mut config = WinhostConfig::default();
        config.embed.idle_timeout_ms = 3_600_000;
        assert!(validate(&config).is_err());
    }
}
