//! `std::process` backed child ownership shared by the native backends.

use std::io;
use std::process::Child;
use std::sync::Mutex;

use tracing::debug;
use winhost_common::errors::PlatformError;

use crate::{Result, SpawnRequest};

/// Owns a spawned `std::process::Child`.
///
/// The child sits behind a mutex so exit checks and kills can come from any
/// thread holding a shared reference.
#[derive(Debug)]
pub struct StdProcess {
    pid: u32,
    child: Mutex<Child>,
}

impl StdProcess {
    pub fn spawn(request: &SpawnRequest) -> Result<Self> {
        let child = request.to_command().spawn().map_err(|e| {
            PlatformError::ProcessError(format!(
                "failed to spawn {}: {e}",
                request.program.display()
            ))
        })?;
        let pid = child.id();
        debug!(pid, program = %request.program.display(), "process spawned");
        Ok(Self {
            pid,
            child: Mutex::new(child),
        })
    }

    pub fn id(&self) -> u32 {
        self.pid
    }

    /// Run `f` against the child, tolerating a poisoned lock.
    pub fn with_child<R>(&self, f: impl FnOnce(&mut Child) -> R) -> R {
        let mut guard = self.child.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    pub fn has_exited(&self) -> bool {
        self.with_child(|child| match child.try_wait() {
            Ok(Some(_)) => true,
            Ok(None) => false,
            // Unqueryable processes are treated as gone.
            Err(_) => true,
        })
    }

    /// Kill the child and reap it. Killing an already-exited child succeeds.
    pub fn kill(&self) -> Result<()> {
        self.with_child(|child| match child.kill() {
            Ok(()) => {
                let status = child.wait().map_err(|e| {
                    PlatformError::ProcessError(format!("failed to reap {}: {e}", self.pid))
                })?;
                debug!(pid = self.pid, ?status, "process killed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(()),
            Err(e) => Err(PlatformError::ProcessError(format!(
                "failed to kill {}: {e}",
                self.pid
            ))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_missing_program_fails() {
        let request = SpawnRequest::for_executable("/definitely/not/here/viewer");
        let err = StdProcess::spawn(&request).unwrap_err();
        assert!(matches!(err, PlatformError::ProcessError(ref msg) if msg.contains("failed to spawn")));
    }

    #[test]
    #[cfg(unix)]
    fn kill_running_process() {
        let request = SpawnRequest {
            program: "/bin/sleep".into(),
            working_dir: None,
        };
        let mut command = request.to_command();
        command.arg("30");
        let child = command.spawn().expect("spawn sleep");
        let process = StdProcess {
            pid: child.id(),
            child: Mutex::new(child),
        };

        assert!(!process.has_exited());
        process.kill().unwrap();
        assert!(process.has_exited());
        // A second kill on the reaped child is harmless.
        process.kill().unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn exited_process_is_detected() {
        let request = SpawnRequest::for_executable("/bin/true");
        let process = StdProcess::spawn(&request).expect("spawn true");
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !process.has_exited() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert!(process.has_exited());
    }
}
