use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Window style bits, laid out as Win32 `GWL_STYLE` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WindowStyle(pub u32);

impl WindowStyle {
    pub const NONE: Self = Self(0);
    pub const MAXIMIZEBOX: Self = Self(0x0001_0000);
    pub const MINIMIZEBOX: Self = Self(0x0002_0000);
    pub const THICKFRAME: Self = Self(0x0004_0000);
    pub const SYSMENU: Self = Self(0x0008_0000);
    pub const CAPTION: Self = Self(0x00C0_0000);
    pub const VISIBLE: Self = Self(0x1000_0000);
    pub const CHILD: Self = Self(0x4000_0000);
    pub const POPUP: Self = Self(0x8000_0000);

    /// Bits that give a window its own frame and taskbar presence.
    pub const TOP_LEVEL_DECORATIONS: Self = Self(
        Self::CAPTION.0
            | Self::THICKFRAME.0
            | Self::SYSMENU.0
            | Self::MINIMIZEBOX.0
            | Self::MAXIMIZEBOX.0
            | Self::POPUP.0,
    );

    /// Style written to an embedded window: visible, nothing else.
    pub const EMBEDDED: Self = Self::VISIBLE;

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for WindowStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for WindowStyle {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for WindowStyle {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for WindowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
