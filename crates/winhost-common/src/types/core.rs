use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque native window reference (an `HWND` on Windows).
///
/// Holding one grants no ownership; the window belongs to whichever process
/// created it. Absence is modelled with `Option<WindowHandle>`, never with a
/// zero sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    /// Wrap a raw value, mapping the null handle to `None`.
    pub fn from_raw(raw: isize) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn as_raw(self) -> isize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Host size in framework (logical) units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Logical-to-device transform, independent per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactor {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactor {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: sanitize_scale(x),
            y: sanitize_scale(y),
        }
    }

    pub fn uniform(scale: f64) -> Self {
        Self::new(scale, scale)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Non-finite or non-positive factors carry no usable scale information.
fn sanitize_scale(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Device-pixel geometry relative to the parent window's client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// What caused a session's one-time teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownTrigger {
    Explicit,
    Unload,
    ApplicationExit,
    Finalize,
}

impl fmt::Display for TeardownTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TeardownTrigger::Explicit => "explicit",
            TeardownTrigger::Unload => "unload",
            TeardownTrigger::ApplicationExit => "application-exit",
            TeardownTrigger::Finalize => "finalize",
        };
        f.write_str(name)
    }
}
