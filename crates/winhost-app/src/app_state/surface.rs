//! The winit window as a `HostSurface`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::window::Window;

use winhost_common::types::{LogicalSize, ScaleFactor, WindowHandle};
use winhost_embed::{HostLayout, HostSurface};

/// The host area is the whole window, which has no content of its own.
///
/// Collapsing it leaves the window open and empty: layout sync stops and
/// the title carries the failure (see `title.rs`).
pub struct WinitSurface {
    window: Arc<Window>,
    collapsed: AtomicBool,
}

impl WinitSurface {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            collapsed: AtomicBool::new(false),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed.load(Ordering::SeqCst)
    }
}

impl HostSurface for WinitSurface {
    fn native_handle(&self) -> Option<WindowHandle> {
        let handle = self.window.window_handle().ok()?;
        match handle.as_raw() {
            RawWindowHandle::Win32(win32) => WindowHandle::from_raw(win32.hwnd.get()),
            _ => None,
        }
    }

    fn current_layout(&self) -> HostLayout {
        let scale = self.window.scale_factor();
        let logical = self.window.inner_size().to_logical::<f64>(scale);
        HostLayout::new(
            LogicalSize::new(logical.width, logical.height),
            ScaleFactor::uniform(scale),
        )
    }

    fn set_visible(&self, visible: bool) {
        let was_collapsed = self.collapsed.swap(!visible, Ordering::SeqCst);
        if was_collapsed != !visible {
            tracing::info!(collapsed = !visible, "host surface visibility changed");
        }
        self.window.request_redraw();
    }
}
