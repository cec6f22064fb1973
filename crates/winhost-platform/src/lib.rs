//! OS boundary for window embedding.
//!
//! Everything the embedding controller needs from the operating system goes
//! through [`WindowSystem`] and [`ChildProcess`]: spawning a process, waiting
//! for it to become input-idle, locating its main window, and rewriting that
//! window's parent, style, and geometry.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use winhost_common::errors::PlatformError;
use winhost_common::types::{PixelRect, WindowHandle, WindowStyle};

pub mod mock;
pub mod process;
pub mod unsupported;
#[cfg(target_os = "windows")]
pub mod win32;

pub type Result<T> = std::result::Result<T, PlatformError>;

/// What to launch and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub program: PathBuf,
    pub working_dir: Option<PathBuf>,
}

impl SpawnRequest {
    /// Launch `path` with its containing directory as the working directory.
    pub fn for_executable(path: impl AsRef<Path>) -> Self {
        let program = path.as_ref().to_path_buf();
        let working_dir = program
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Self {
            program,
            working_dir,
        }
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

/// Result of one bounded input-idle wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleStatus {
    /// The process's message loop is running.
    Ready,
    /// The wait slice elapsed first.
    Pending,
}

/// A launched process, exclusively owned by whoever spawned it.
///
/// Methods take `&self` so the launcher can wait on the process while a
/// disposer on another thread checks or kills it.
pub trait ChildProcess: Send + Sync {
    fn id(&self) -> u32;

    /// Block for at most `timeout` waiting for the process to accept input.
    fn wait_for_input_idle(&self, timeout: Duration) -> Result<IdleStatus>;

    /// The process's primary top-level window, if it has one yet.
    fn main_window(&self) -> Result<Option<WindowHandle>>;

    fn has_exited(&self) -> bool;

    fn kill(&self) -> Result<()>;
}

/// Platform-agnostic window hierarchy operations.
pub trait WindowSystem: Send + Sync {
    fn spawn(&self, request: &SpawnRequest) -> Result<Box<dyn ChildProcess>>;

    /// Move `child` into `parent`'s child list.
    fn set_parent(&self, child: WindowHandle, parent: WindowHandle) -> Result<()>;

    fn window_style(&self, window: WindowHandle) -> Result<WindowStyle>;

    fn set_window_style(&self, window: WindowHandle, style: WindowStyle) -> Result<()>;

    /// Position and size `window` within its parent, repainting it.
    fn move_window(&self, window: WindowHandle, frame: PixelRect) -> Result<()>;

    fn child_windows(&self, parent: WindowHandle) -> Result<Vec<WindowHandle>>;

    /// Tell `window` it has become the active window.
    fn activate(&self, window: WindowHandle) -> Result<()>;
}

/// Create the platform-appropriate WindowSystem.
///
/// On Windows: returns the Win32 implementation.
/// On other platforms: returns an implementation that refuses every call.
pub fn create_window_system() -> Box<dyn WindowSystem> {
    #[cfg(target_os = "windows")]
    {
        Box::new(win32::Win32WindowSystem::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        Box::new(unsupported::UnsupportedWindowSystem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_dir_is_parent_directory() {
        let request = SpawnRequest::for_executable("/opt/viewer/bin/viewer");
        assert_eq!(request.program, PathBuf::from("/opt/viewer/bin/viewer"));
        assert_eq!(request.working_dir, Some(PathBuf::from("/opt/viewer/bin")));
    }

    #[test]
    fn bare_program_has_no_working_dir() {
        let request = SpawnRequest::for_executable("viewer");
        assert_eq!(request.working_dir, None);
    }

    #[test]
    fn command_uses_working_dir() {
        let request = SpawnRequest::for_executable("/opt/viewer/viewer");
        let command = request.to_command();
        assert_eq!(command.get_program(), "/opt/viewer/viewer");
        assert_eq!(command.get_current_dir(), Some(Path::new("/opt/viewer")));
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn create_window_system_refuses_on_this_platform() {
        let system = create_window_system();
        let result = system.spawn(&SpawnRequest::for_executable("/bin/true"));
        assert!(matches!(result, Err(PlatformError::NotSupported(_))));
    }
}
