//! Values passed into and out of an embedding session.

use std::sync::Arc;
use std::time::Duration;

use winhost_common::errors::EmbedError;
use winhost_common::types::WindowHandle;
use winhost_config::schema::{EmbedConfig, DEFAULT_IDLE_TIMEOUT_MS};

use crate::shutdown::ShutdownRegistry;

/// Knobs for a session. `Default` uses the global shutdown registry.
#[derive(Clone)]
pub struct SessionOptions {
    /// Upper bound on the input-idle wait.
    pub idle_timeout: Duration,
    pub registry: Arc<ShutdownRegistry>,
}

impl SessionOptions {
    pub fn from_config(config: &EmbedConfig) -> Self {
        Self {
            idle_timeout: config.idle_timeout(),
            ..Self::default()
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_registry(mut self, registry: Arc<ShutdownRegistry>) -> Self {
        self.registry = registry;
        self
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_millis(DEFAULT_IDLE_TIMEOUT_MS),
            registry: ShutdownRegistry::global(),
        }
    }
}

impl std::fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionOptions")
            .field("idle_timeout", &self.idle_timeout)
            .field("shutdown_listeners", &self.registry.len())
            .finish()
    }
}

/// Why `on_ready` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or whitespace-only path.
    NoExecutable,
    AlreadyCreated,
    /// An earlier `on_ready` already spawned (or tried to spawn) a process.
    AlreadyLaunched,
    Disposed,
}

/// Result of `on_ready`. Failures are reported here, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Skipped(SkipReason),
    Embedded { pid: u32, window: WindowHandle },
    Failed(EmbedError),
}

impl LaunchOutcome {
    pub fn is_embedded(&self) -> bool {
        matches!(self, LaunchOutcome::Embedded { .. })
    }

    pub fn error(&self) -> Option<&EmbedError> {
        match self {
            LaunchOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}
