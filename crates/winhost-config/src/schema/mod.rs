//! Configuration schema types for winhost.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod embed;
mod logging;

pub use embed::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for the winhost host application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct WinhostConfig {
    pub embed: EmbedConfig,
    pub logging: LoggingConfig,
}
