//! Win32 WindowSystem implementation.
//!
//! Processes are spawned through `std::process`; everything that touches the
//! window hierarchy goes through `user32` via the `windows` crate.

use std::ffi::c_void;
use std::os::windows::io::AsRawHandle;
use std::time::Duration;

use tracing::{debug, trace};
use windows::Win32::Foundation::{
    GetLastError, SetLastError, BOOL, FALSE, HANDLE, HWND, LPARAM, TRUE, WIN32_ERROR, WPARAM,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumChildWindows, EnumWindows, GetWindow, GetWindowLongW, GetWindowThreadProcessId,
    IsWindowVisible, MoveWindow, SendMessageW, SetParent, SetWindowLongW, WaitForInputIdle,
    GWL_STYLE, GW_OWNER, WM_ACTIVATE,
};

use winhost_common::errors::PlatformError;
use winhost_common::types::{PixelRect, WindowHandle, WindowStyle};

use crate::process::StdProcess;
use crate::{ChildProcess, IdleStatus, Result, SpawnRequest, WindowSystem};

const WAIT_TIMEOUT: u32 = 0x0000_0102;
const WA_ACTIVE: usize = 1;

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.as_raw() as *mut c_void)
}

fn handle_of(hwnd: HWND) -> Option<WindowHandle> {
    WindowHandle::from_raw(hwnd.0 as isize)
}

fn last_error() -> WIN32_ERROR {
    unsafe { GetLastError() }
}

fn window_error(operation: &str, window: WindowHandle, detail: impl std::fmt::Display) -> PlatformError {
    PlatformError::WindowError(format!("{operation} on {window} failed: {detail}"))
}

// =============================================================================
// PROCESS
// =============================================================================

/// A spawned process plus the raw handle `WaitForInputIdle` needs.
pub struct Win32Process {
    inner: StdProcess,
    /// Owned by `inner`'s `Child`; valid for as long as `inner` lives.
    raw_handle: isize,
}

impl Win32Process {
    fn spawn(request: &SpawnRequest) -> Result<Self> {
        let inner = StdProcess::spawn(request)?;
        let raw_handle = inner.with_child(|child| child.as_raw_handle() as isize);
        Ok(Self { inner, raw_handle })
    }
}

struct MainWindowSearch {
    pid: u32,
    found: Option<HWND>,
}

/// Matches the first visible, unowned top-level window of `search.pid`.
unsafe extern "system" fn find_main_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let search = &mut *(lparam.0 as *mut MainWindowSearch);
    let mut pid: u32 = 0;
    GetWindowThreadProcessId(hwnd, Some(&mut pid));
    if pid != search.pid || !IsWindowVisible(hwnd).as_bool() {
        return TRUE;
    }
    let unowned = GetWindow(hwnd, GW_OWNER).map_or(true, |owner| owner.is_invalid());
    if unowned {
        search.found = Some(hwnd);
        return FALSE;
    }
    TRUE
}

impl ChildProcess for Win32Process {
    fn id(&self) -> u32 {
        self.inner.id()
    }

    fn wait_for_input_idle(&self, timeout: Duration) -> Result<IdleStatus> {
        // u32::MAX is INFINITE; the caller always wants a bounded wait.
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX - 1);
        let status = unsafe { WaitForInputIdle(HANDLE(self.raw_handle as *mut c_void), millis) };
        match status {
            0 => Ok(IdleStatus::Ready),
            WAIT_TIMEOUT => Ok(IdleStatus::Pending),
            _ => Err(PlatformError::ProcessError(format!(
                "WaitForInputIdle failed for {} (error {})",
                self.id(),
                last_error().0
            ))),
        }
    }

    fn main_window(&self) -> Result<Option<WindowHandle>> {
        let mut search = MainWindowSearch {
            pid: self.id(),
            found: None,
        };
        // EnumWindows reports an error when the callback stops it early.
        let _ = unsafe {
            EnumWindows(
                Some(find_main_window),
                LPARAM(&mut search as *mut MainWindowSearch as isize),
            )
        };
        let window = search.found.and_then(handle_of);
        trace!(pid = self.id(), ?window, "main window lookup");
        Ok(window)
    }

    fn has_exited(&self) -> bool {
        self.inner.has_exited()
    }

    fn kill(&self) -> Result<()> {
        self.inner.kill()
    }
}

// =============================================================================
// WINDOW SYSTEM
// =============================================================================

/// Win32-based window system.
#[derive(Debug, Default)]
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        Self
    }
}

unsafe extern "system" fn collect_child(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let children = &mut *(lparam.0 as *mut Vec<WindowHandle>);
    if let Some(handle) = handle_of(hwnd) {
        children.push(handle);
    }
    TRUE
}

impl WindowSystem for Win32WindowSystem {
    fn spawn(&self, request: &SpawnRequest) -> Result<Box<dyn ChildProcess>> {
        Ok(Box::new(Win32Process::spawn(request)?))
    }

    fn set_parent(&self, child: WindowHandle, parent: WindowHandle) -> Result<()> {
        match unsafe { SetParent(hwnd(child), hwnd(parent)) } {
            Ok(_) => Ok(()),
            // A top-level window has no previous parent; SetParent returns
            // null for it without setting an error.
            Err(e) if e.code().is_ok() => Ok(()),
            Err(e) => Err(window_error("SetParent", child, e)),
        }
    }

    fn window_style(&self, window: WindowHandle) -> Result<WindowStyle> {
        unsafe { SetLastError(WIN32_ERROR(0)) };
        let style = unsafe { GetWindowLongW(hwnd(window), GWL_STYLE) };
        if style == 0 && last_error().0 != 0 {
            return Err(window_error("GetWindowLongW", window, last_error().0));
        }
        Ok(WindowStyle(style as u32))
    }

    fn set_window_style(&self, window: WindowHandle, style: WindowStyle) -> Result<()> {
        unsafe { SetLastError(WIN32_ERROR(0)) };
        let previous = unsafe { SetWindowLongW(hwnd(window), GWL_STYLE, style.bits() as i32) };
        if previous == 0 && last_error().0 != 0 {
            return Err(window_error("SetWindowLongW", window, last_error().0));
        }
        debug!(%window, previous = %WindowStyle(previous as u32), new = %style, "window style set");
        Ok(())
    }

    fn move_window(&self, window: WindowHandle, frame: PixelRect) -> Result<()> {
        unsafe {
            MoveWindow(
                hwnd(window),
                frame.x,
                frame.y,
                frame.width,
                frame.height,
                TRUE,
            )
        }
        .map_err(|e| window_error("MoveWindow", window, e))
    }

    fn child_windows(&self, parent: WindowHandle) -> Result<Vec<WindowHandle>> {
        let mut children: Vec<WindowHandle> = Vec::new();
        let _ = unsafe {
            EnumChildWindows(
                hwnd(parent),
                Some(collect_child),
                LPARAM(&mut children as *mut Vec<WindowHandle> as isize),
            )
        };
        Ok(children)
    }

    fn activate(&self, window: WindowHandle) -> Result<()> {
        unsafe { SendMessageW(hwnd(window), WM_ACTIVATE, WPARAM(WA_ACTIVE), LPARAM(0)) };
        Ok(())
    }
}
