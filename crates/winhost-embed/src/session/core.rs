//! EmbeddingSession struct and read-only accessors.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::sync::broadcast;
use tracing::{debug, warn};
use winhost_common::events::{EmbedEvent, EventBus};
use winhost_common::types::WindowHandle;
use winhost_platform::{ChildProcess, WindowSystem};

use super::types::SessionOptions;
use crate::shutdown::SubscriptionId;
use crate::surface::HostSurface;

// =============================================================================
// STATE
// =============================================================================

/// Handles held by a session. Only `process` is owned; the windows belong
/// to the OS and are dropped from here without being destroyed.
#[derive(Default)]
pub(super) struct SessionInner {
    pub(super) executable: Option<PathBuf>,
    pub(super) process: Option<Arc<dyn ChildProcess>>,
    pub(super) embedded_window: Option<WindowHandle>,
    pub(super) host_window: Option<WindowHandle>,
    pub(super) shutdown_subscription: Option<SubscriptionId>,
}

/// The embedding controller for one host surface and one executable.
///
/// Always handled through `Arc` so the shutdown registry can reach it
/// weakly. Every method is safe to call from any thread, in any order,
/// any number of times; none of them panic or return errors to the host.
pub struct EmbeddingSession {
    pub(super) system: Arc<dyn WindowSystem>,
    pub(super) surface: Arc<dyn HostSurface>,
    pub(super) options: SessionOptions,
    pub(super) events: EventBus,
    pub(super) launch_started: AtomicBool,
    pub(super) created: AtomicBool,
    pub(super) disposed: AtomicBool,
    pub(super) inner: Mutex<SessionInner>,
    pub(super) weak_self: Weak<EmbeddingSession>,
}

impl EmbeddingSession {
    pub fn new(
        system: Arc<dyn WindowSystem>,
        surface: Arc<dyn HostSurface>,
        options: SessionOptions,
    ) -> Arc<Self> {
        debug!(idle_timeout = ?options.idle_timeout, "embedding session created");
        Arc::new_cyclic(|weak_self| Self {
            system,
            surface,
            options,
            events: EventBus::default(),
            launch_started: AtomicBool::new(false),
            created: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
            inner: Mutex::new(SessionInner::default()),
            weak_self: weak_self.clone(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// True once a process and window were bound. Never resets.
    pub fn is_created(&self) -> bool {
        self.created.load(Ordering::SeqCst)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// The path passed to the first non-empty `on_ready`.
    pub fn executable(&self) -> Option<PathBuf> {
        self.lock_inner().executable.clone()
    }

    /// Present only while created and not disposed.
    pub fn embedded_window(&self) -> Option<WindowHandle> {
        self.lock_inner().embedded_window
    }

    pub fn host_window(&self) -> Option<WindowHandle> {
        self.lock_inner().host_window
    }

    /// Pid of the launched process while the session still owns it.
    pub fn process_id(&self) -> Option<u32> {
        self.lock_inner().process.as_ref().map(|process| process.id())
    }

    /// Receive `HostProcessStarted`, `LaunchFailed`, and `Disposed`.
    pub fn subscribe(&self) -> broadcast::Receiver<EmbedEvent> {
        self.events.subscribe()
    }

    // -------------------------------------------------------------------------
    // Embedded window operations
    // -------------------------------------------------------------------------

    /// Send basic activation to the embedded window. False when there is
    /// nothing embedded or the OS refused.
    pub fn activate(&self) -> bool {
        let Some(window) = self.embedded_window() else {
            return false;
        };
        match self.system.activate(window) {
            Ok(()) => true,
            Err(e) => {
                warn!(%window, error = %e, "failed to activate embedded window");
                false
            }
        }
    }

    /// Children of the embedded window. Empty when nothing is embedded.
    pub fn child_windows(&self) -> Vec<WindowHandle> {
        let Some(window) = self.embedded_window() else {
            return Vec::new();
        };
        self.system.child_windows(window).unwrap_or_else(|e| {
            warn!(%window, error = %e, "failed to enumerate child windows");
            Vec::new()
        })
    }

    pub(super) fn lock_inner(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for EmbeddingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock_inner();
        f.debug_struct("EmbeddingSession")
            .field("executable", &inner.executable)
            .field("created", &self.is_created())
            .field("disposed", &self.is_disposed())
            .field("pid", &inner.process.as_ref().map(|p| p.id()))
            .field("embedded_window", &inner.embedded_window)
            .field("host_window", &inner.host_window)
            .finish()
    }
}
