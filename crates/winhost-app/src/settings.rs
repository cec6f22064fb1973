//! Effective settings: config file merged with command-line overrides.

use tracing::warn;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winhost_common::ConfigError;
use winhost_config::validation::IDLE_TIMEOUT_RANGE_MS;
use winhost_config::{LogLevel, WinhostConfig};

use crate::cli::Args;

/// Directive used when nothing else parses.
pub const FALLBACK_DIRECTIVE: &str = "winhost=info";

/// Load the config named by `--config`, or the default one.
pub fn load(args: &Args) -> Result<WinhostConfig, ConfigError> {
    match &args.config {
        Some(path) => winhost_config::load_config_from(path),
        None => winhost_config::load_config(),
    }
}

/// Apply command-line overrides on top of `config`. An out-of-range
/// timeout override is ignored with a warning.
pub fn apply_overrides(mut config: WinhostConfig, args: &Args) -> WinhostConfig {
    if let Some(executable) = &args.executable {
        config.embed.executable = executable.to_string_lossy().into_owned();
    }
    if let Some(timeout) = args.idle_timeout_ms {
        let (min, max) = IDLE_TIMEOUT_RANGE_MS;
        if (min..=max).contains(&timeout) {
            config.embed.idle_timeout_ms = timeout;
        } else {
            warn!(
                timeout,
                min, max, "--idle-timeout-ms out of range, keeping configured value"
            );
        }
    }
    config
}

/// The `winhost` filter directive: `--log-level` wins over the config.
///
/// A bare level name is scoped to winhost crates; anything else is passed
/// through as a filter directive.
pub fn log_directive(cli_level: Option<&str>, config_level: LogLevel) -> String {
    match cli_level.map(str::trim).filter(|level| !level.is_empty()) {
        Some(level) => match level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {
                format!("winhost={}", level.to_ascii_lowercase())
            }
            _ => level.to_string(),
        },
        None => config_level.directive(),
    }
}

/// `RUST_LOG` plus the winhost directive.
pub fn env_filter(directive: &str) -> EnvFilter {
    let directive = directive
        .parse::<Directive>()
        .or_else(|_| FALLBACK_DIRECTIVE.parse::<Directive>());
    match directive {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    }
}
