//! `on_ready`: launch, bind, reparent, initial layout.

use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::{debug, info, warn};
use winhost_common::errors::EmbedError;
use winhost_common::events::EmbedEvent;
use winhost_common::types::{LogicalSize, PixelRect, ScaleFactor, WindowHandle};
use winhost_platform::ChildProcess;

use super::core::EmbeddingSession;
use super::types::{LaunchOutcome, SkipReason};
use crate::{launcher, layout, reparent};

impl EmbeddingSession {
    /// The host surface is attached and `executable` is known.
    ///
    /// Blocks the calling thread for at most the configured idle timeout.
    /// An empty path is a quiet no-op. At most one process is ever spawned
    /// per session; later calls are skipped.
    pub fn on_ready(&self, executable: impl AsRef<Path>) -> LaunchOutcome {
        let executable = executable.as_ref();
        if executable.to_string_lossy().trim().is_empty() {
            debug!("no executable configured, nothing to embed");
            return LaunchOutcome::Skipped(SkipReason::NoExecutable);
        }
        if self.is_disposed() {
            debug!("on_ready after disposal ignored");
            return LaunchOutcome::Skipped(SkipReason::Disposed);
        }
        if self.is_created() {
            return LaunchOutcome::Skipped(SkipReason::AlreadyCreated);
        }
        if self.launch_started.swap(true, Ordering::SeqCst) {
            debug!("launch already started for this session");
            return LaunchOutcome::Skipped(SkipReason::AlreadyLaunched);
        }

        self.lock_inner().executable = Some(executable.to_path_buf());
        self.subscribe_to_shutdown();

        match self.launch(executable) {
            Ok((pid, window)) => LaunchOutcome::Embedded { pid, window },
            Err(err) => {
                // Anything that fails after teardown is reported as an abort.
                let err = if self.is_disposed() {
                    EmbedError::Aborted
                } else {
                    err
                };
                self.fail(&err);
                LaunchOutcome::Failed(err)
            }
        }
    }

    /// Re-apply geometry for a new host size. Returns the frame applied, or
    /// `None` when nothing is embedded.
    pub fn on_size_changed(&self, size: LogicalSize, scale: ScaleFactor) -> Option<PixelRect> {
        let inner = self.lock_inner();
        if self.is_disposed() {
            return None;
        }
        let window = inner.embedded_window?;
        layout::apply(self.system.as_ref(), window, size, scale)
    }

    fn launch(&self, executable: &Path) -> Result<(u32, WindowHandle), EmbedError> {
        let host = self.surface.native_handle().ok_or(EmbedError::HostDetached)?;
        self.lock_inner().host_window = Some(host);

        let process = launcher::spawn(self.system.as_ref(), executable)?;
        self.track_process(&process)?;

        launcher::await_input_idle(process.as_ref(), self.options.idle_timeout, || {
            self.is_disposed()
        })?;
        self.ensure_live()?;
        let window = launcher::main_window(process.as_ref())?;
        reparent::reparent(self.system.as_ref(), window, host, || self.is_disposed())?;

        {
            let mut inner = self.lock_inner();
            if self.is_disposed() {
                return Err(EmbedError::Aborted);
            }
            inner.embedded_window = Some(window);
            self.created.store(true, Ordering::SeqCst);
        }

        let pid = process.id();
        if process.has_exited() {
            warn!(pid, "process exited right after embedding, not announcing it");
        } else {
            info!(pid, %window, %host, "window embedded");
            self.events.publish(EmbedEvent::HostProcessStarted { pid });
        }

        let initial = self.surface.current_layout();
        self.on_size_changed(initial.size, initial.scale);

        Ok((pid, window))
    }

    fn ensure_live(&self) -> Result<(), EmbedError> {
        if self.is_disposed() {
            return Err(EmbedError::Aborted);
        }
        Ok(())
    }

    /// Hand the process to the session before the wait, so a concurrent
    /// teardown can kill it. A teardown that already ran means the caller
    /// must kill it here.
    fn track_process(&self, process: &Arc<dyn ChildProcess>) -> Result<(), EmbedError> {
        {
            let mut inner = self.lock_inner();
            if !self.is_disposed() {
                inner.process = Some(Arc::clone(process));
                return Ok(());
            }
        }
        debug!(pid = process.id(), "session disposed during spawn");
        super::lifecycle::terminate(process.as_ref());
        Err(EmbedError::Aborted)
    }

    fn fail(&self, err: &EmbedError) {
        let process = self.lock_inner().process.take();
        if let Some(process) = process {
            super::lifecycle::terminate(process.as_ref());
        }

        if !err.hides_surface() {
            debug!(error = %err, "launch abandoned");
            return;
        }
        warn!(error = %err, "embedding failed, hiding host surface");
        self.surface.set_visible(false);
        self.events.publish(EmbedEvent::LaunchFailed {
            reason: err.to_string(),
        });
    }
}
