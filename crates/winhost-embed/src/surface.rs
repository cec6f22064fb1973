//! The host side of an embedding: the container the child window lives in.

use winhost_common::types::{LogicalSize, ScaleFactor, WindowHandle};

/// Current size of the host area and its logical-to-device transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostLayout {
    pub size: LogicalSize,
    pub scale: ScaleFactor,
}

impl HostLayout {
    pub fn new(size: LogicalSize, scale: ScaleFactor) -> Self {
        Self { size, scale }
    }
}

/// What the host UI framework exposes to an embedding session.
///
/// The session never owns the host window; it only parents into it.
pub trait HostSurface: Send + Sync {
    /// Native handle of the window the child is parented into, or `None`
    /// while the surface is not attached to a window.
    fn native_handle(&self) -> Option<WindowHandle>;

    /// Size and scale right now. A surface not yet on a display reports
    /// `ScaleFactor::IDENTITY`.
    fn current_layout(&self) -> HostLayout;

    /// Show or collapse the host area. Failed embeds collapse it.
    fn set_visible(&self, visible: bool);
}
