//! Process launch and the bounded input-idle wait.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};
use winhost_common::errors::EmbedError;
use winhost_common::types::WindowHandle;
use winhost_platform::{ChildProcess, IdleStatus, SpawnRequest, WindowSystem};

/// Longest single block inside the idle wait. Cancellation and process exit
/// are noticed within one slice.
pub const IDLE_POLL_SLICE: Duration = Duration::from_millis(50);

/// Start `executable` with its own directory as the working directory.
pub fn spawn(
    system: &dyn WindowSystem,
    executable: &Path,
) -> Result<Arc<dyn ChildProcess>, EmbedError> {
    let request = SpawnRequest::for_executable(executable);
    let process = system
        .spawn(&request)
        .map_err(|e| EmbedError::Launch(format!("{}: {e}", executable.display())))?;
    info!(pid = process.id(), program = %executable.display(), "process launched");
    Ok(Arc::from(process))
}

/// Wait until `process` is ready for input, in slices of [`IDLE_POLL_SLICE`].
///
/// Gives up with `Aborted` once `cancelled` returns true, with `Launch` if
/// the process exits first, and with `Timeout` after `timeout` in total.
pub fn await_input_idle(
    process: &dyn ChildProcess,
    timeout: Duration,
    cancelled: impl Fn() -> bool,
) -> Result<(), EmbedError> {
    let started = Instant::now();
    let deadline = started + timeout;
    let mut slices = 0u32;

    loop {
        if cancelled() {
            debug!(pid = process.id(), "idle wait cancelled");
            return Err(EmbedError::Aborted);
        }
        if process.has_exited() {
            return Err(EmbedError::Launch(format!(
                "process {} exited before becoming input-idle",
                process.id()
            )));
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(EmbedError::Timeout(timeout));
        }

        slices += 1;
        match process.wait_for_input_idle(remaining.min(IDLE_POLL_SLICE)) {
            Ok(IdleStatus::Ready) => {
                debug!(
                    pid = process.id(),
                    slices,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "process is input-idle"
                );
                return Ok(());
            }
            Ok(IdleStatus::Pending) => trace!(pid = process.id(), slices, "still waiting for input-idle"),
            Err(e) => return Err(EmbedError::Launch(e.to_string())),
        }
    }
}

/// The process's main window, which must exist and belong to a live process.
pub fn main_window(process: &dyn ChildProcess) -> Result<WindowHandle, EmbedError> {
    let pid = process.id();
    if process.has_exited() {
        return Err(EmbedError::WindowBind(format!(
            "process {pid} exited before its window was located"
        )));
    }
    match process.main_window() {
        Ok(Some(window)) => Ok(window),
        Ok(None) => Err(EmbedError::WindowBind(format!(
            "process {pid} has no main window"
        ))),
        Err(e) => Err(EmbedError::WindowBind(e.to_string())),
    }
}
