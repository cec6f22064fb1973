//! The one-time teardown shared by every trigger.

use std::sync::atomic::Ordering;

use tracing::{debug, info, trace, warn};
use winhost_common::events::EmbedEvent;
use winhost_common::types::TeardownTrigger;
use winhost_platform::ChildProcess;

use super::core::EmbeddingSession;

// =============================================================================
// TRIGGERS
// =============================================================================

impl EmbeddingSession {
    /// Explicit disposal. Returns true only for the call that tore down.
    pub fn dispose(&self) -> bool {
        self.teardown(TeardownTrigger::Explicit)
    }

    /// The host surface was unloaded.
    pub fn on_unload(&self) -> bool {
        self.teardown(TeardownTrigger::Unload)
    }

    /// The owning application is exiting.
    pub fn on_application_exit(&self) -> bool {
        self.teardown(TeardownTrigger::ApplicationExit)
    }

    /// Kill the owned process (if still running), forget the embedded
    /// window, and leave the shutdown registry. Only the first call from any
    /// trigger does anything.
    pub(super) fn teardown(&self, trigger: TeardownTrigger) -> bool {
        if self.disposed.swap(true, Ordering::SeqCst) {
            trace!(%trigger, "session already disposed");
            return false;
        }

        let (process, subscription, window) = {
            let mut inner = self.lock_inner();
            (
                inner.process.take(),
                inner.shutdown_subscription.take(),
                inner.embedded_window.take(),
            )
        };

        if let Some(id) = subscription {
            self.options.registry.unsubscribe(id);
        }
        if let Some(process) = process {
            terminate(process.as_ref());
        }

        info!(%trigger, window = ?window, "embedding session disposed");
        self.events.publish(EmbedEvent::Disposed { trigger });
        true
    }

    /// Register for application exit. No-op once disposed or already
    /// registered.
    pub(super) fn subscribe_to_shutdown(&self) {
        let mut inner = self.lock_inner();
        if self.is_disposed() || inner.shutdown_subscription.is_some() {
            return;
        }
        let session = self.weak_self.clone();
        let id = self.options.registry.subscribe(move || {
            if let Some(session) = session.upgrade() {
                session.on_application_exit();
            }
        });
        inner.shutdown_subscription = Some(id);
    }
}

// =============================================================================
// FINALIZER
// =============================================================================

impl Drop for EmbeddingSession {
    fn drop(&mut self) {
        self.teardown(TeardownTrigger::Finalize);
    }
}

/// Kill `process` unless it is already gone.
pub(super) fn terminate(process: &dyn ChildProcess) {
    let pid = process.id();
    if process.has_exited() {
        debug!(pid, "process already exited, skipping kill");
        return;
    }
    match process.kill() {
        Ok(()) => info!(pid, "embedded process killed"),
        Err(e) => warn!(pid, error = %e, "failed to kill embedded process"),
    }
}
