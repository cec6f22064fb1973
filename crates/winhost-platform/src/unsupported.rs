//! Fallback WindowSystem for platforms without embedding support.
//!
//! Every call fails with `NotSupported`, which the embedding controller
//! turns into a hidden host surface instead of a crash.

use winhost_common::errors::PlatformError;
use winhost_common::types::{PixelRect, WindowHandle, WindowStyle};

use crate::{ChildProcess, Result, SpawnRequest, WindowSystem};

/// A window system that supports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedWindowSystem;

fn unsupported<T>(operation: &str) -> Result<T> {
    Err(PlatformError::NotSupported(format!(
        "{operation} on {}",
        std::env::consts::OS
    )))
}

impl WindowSystem for UnsupportedWindowSystem {
    fn spawn(&self, _request: &SpawnRequest) -> Result<Box<dyn ChildProcess>> {
        unsupported("window embedding")
    }

    fn set_parent(&self, _child: WindowHandle, _parent: WindowHandle) -> Result<()> {
        unsupported("reparenting")
    }

    fn window_style(&self, _window: WindowHandle) -> Result<WindowStyle> {
        unsupported("window styles")
    }

    fn set_window_style(&self, _window: WindowHandle, _style: WindowStyle) -> Result<()> {
        unsupported("window styles")
    }

    fn move_window(&self, _window: WindowHandle, _frame: PixelRect) -> Result<()> {
        unsupported("moving windows")
    }

    fn child_windows(&self, _parent: WindowHandle) -> Result<Vec<WindowHandle>> {
        unsupported("child window enumeration")
    }

    fn activate(&self, _window: WindowHandle) -> Result<()> {
        unsupported("window activation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_is_refused() {
        let system = UnsupportedWindowSystem;
        let result = system.spawn(&SpawnRequest::for_executable("viewer"));
        assert!(matches!(result, Err(PlatformError::NotSupported(_))));
    }

    #[test]
    fn window_operations_are_refused() {
        let system = UnsupportedWindowSystem;
        let window = WindowHandle(1);
        assert!(system.set_parent(window, WindowHandle(2)).is_err());
        assert!(system.window_style(window).is_err());
        assert!(system.set_window_style(window, WindowStyle::VISIBLE).is_err());
        assert!(system.move_window(window, PixelRect::default()).is_err());
        assert!(system.child_windows(window).is_err());
        assert!(system.activate(window).is_err());
    }
}
