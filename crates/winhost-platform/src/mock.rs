//! Scriptable in-memory WindowSystem.
//!
//! Used for testing the embedding controller without a desktop session. The
//! script decides how spawned processes behave; every call is recorded so
//! tests can assert on exactly what reached the "OS".

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use winhost_common::errors::PlatformError;
use winhost_common::types::{PixelRect, WindowHandle, WindowStyle};

use crate::{ChildProcess, IdleStatus, Result, SpawnRequest, WindowSystem};

/// How a mock process answers input-idle waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleBehavior {
    Immediate,
    /// Report `Pending` for this many waits, then `Ready`.
    AfterPolls(u32),
    /// Sleep through every wait and stay `Pending`.
    Never,
    Fails,
}

/// Behavior of the next spawned process and of window operations.
#[derive(Debug, Clone)]
pub struct MockScript {
    pub spawn_error: Option<String>,
    pub idle: IdleBehavior,
    pub main_window: Option<WindowHandle>,
    /// The process dies during its first idle wait.
    pub exit_before_idle: bool,
    /// The process dies right after reporting idle.
    pub exit_after_idle: bool,
    pub reparent_error: Option<String>,
    pub style_error: Option<String>,
    pub initial_style: WindowStyle,
    pub children: Vec<WindowHandle>,
}

impl MockScript {
    pub const DEFAULT_WINDOW: WindowHandle = WindowHandle(0x2000);
}

impl Default for MockScript {
    fn default() -> Self {
        Self {
            spawn_error: None,
            idle: IdleBehavior::Immediate,
            main_window: Some(Self::DEFAULT_WINDOW),
            exit_before_idle: false,
            exit_after_idle: false,
            reparent_error: None,
            style_error: None,
            initial_style: WindowStyle::TOP_LEVEL_DECORATIONS & !WindowStyle::POPUP
                | WindowStyle::VISIBLE,
            children: Vec::new(),
        }
    }
}

/// One recorded OS call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Spawn(SpawnRequest),
    SetParent {
        child: WindowHandle,
        parent: WindowHandle,
    },
    SetStyle {
        window: WindowHandle,
        style: WindowStyle,
    },
    Move {
        window: WindowHandle,
        frame: PixelRect,
    },
    ChildWindows(WindowHandle),
    Activate(WindowHandle),
    Kill(u32),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

// =============================================================================
// PROCESS
// =============================================================================

/// Shared state of one mock process, observable from tests.
#[derive(Debug)]
pub struct MockProcessState {
    pid: u32,
    exited: AtomicBool,
    kills: AtomicUsize,
    idle_waits: AtomicU32,
    idle: IdleBehavior,
    exit_before_idle: bool,
    exit_after_idle: bool,
    main_window: Option<WindowHandle>,
}

impl MockProcessState {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Simulate the process exiting on its own.
    pub fn exit(&self) {
        self.exited.store(true, Ordering::SeqCst);
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::SeqCst)
    }

    pub fn kill_count(&self) -> usize {
        self.kills.load(Ordering::SeqCst)
    }

    pub fn idle_waits(&self) -> u32 {
        self.idle_waits.load(Ordering::SeqCst)
    }
}

struct MockProcess {
    state: Arc<MockProcessState>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl ChildProcess for MockProcess {
    fn id(&self) -> u32 {
        self.state.pid
    }

    fn wait_for_input_idle(&self, timeout: Duration) -> Result<IdleStatus> {
        let waits = self.state.idle_waits.fetch_add(1, Ordering::SeqCst) + 1;
        if self.state.exit_before_idle {
            self.state.exit();
            return Ok(IdleStatus::Pending);
        }
        let status = match self.state.idle {
            IdleBehavior::Immediate => IdleStatus::Ready,
            IdleBehavior::AfterPolls(pending) if waits > pending => IdleStatus::Ready,
            IdleBehavior::AfterPolls(_) => {
                thread::sleep(timeout.min(Duration::from_millis(1)));
                IdleStatus::Pending
            }
            IdleBehavior::Never => {
                thread::sleep(timeout);
                IdleStatus::Pending
            }
            IdleBehavior::Fails => {
                return Err(PlatformError::ProcessError(format!(
                    "process {} has no message loop",
                    self.state.pid
                )))
            }
        };
        if status == IdleStatus::Ready && self.state.exit_after_idle {
            self.state.exit();
        }
        Ok(status)
    }

    fn main_window(&self) -> Result<Option<WindowHandle>> {
        if self.state.has_exited() {
            return Ok(None);
        }
        Ok(self.state.main_window)
    }

    fn has_exited(&self) -> bool {
        self.state.has_exited()
    }

    fn kill(&self) -> Result<()> {
        lock(&self.calls).push(MockCall::Kill(self.state.pid));
        self.state.kills.fetch_add(1, Ordering::SeqCst);
        self.state.exit();
        Ok(())
    }
}

// =============================================================================
// WINDOW SYSTEM
// =============================================================================

/// In-memory window system driven by a [`MockScript`].
pub struct MockWindowSystem {
    script: Mutex<MockScript>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    processes: Mutex<Vec<Arc<MockProcessState>>>,
    next_pid: AtomicU32,
}

impl MockWindowSystem {
    pub fn new() -> Self {
        Self::with_script(MockScript::default())
    }

    pub fn with_script(script: MockScript) -> Self {
        Self {
            script: Mutex::new(script),
            calls: Arc::new(Mutex::new(Vec::new())),
            processes: Mutex::new(Vec::new()),
            next_pid: AtomicU32::new(1000),
        }
    }

    /// Change the script for subsequent calls.
    pub fn update_script(&self, f: impl FnOnce(&mut MockScript)) {
        f(&mut lock(&self.script));
    }

    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, MockCall::Spawn(_)))
            .count()
    }

    pub fn kill_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, MockCall::Kill(_)))
            .count()
    }

    /// Every frame applied to `window`, oldest first.
    pub fn frames(&self, window: WindowHandle) -> Vec<PixelRect> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Move { window: w, frame } if w == window => Some(frame),
                _ => None,
            })
            .collect()
    }

    pub fn last_frame(&self, window: WindowHandle) -> Option<PixelRect> {
        self.frames(window).pop()
    }

    /// The most recent style written to `window`.
    pub fn style_of(&self, window: WindowHandle) -> Option<WindowStyle> {
        self.calls().into_iter().rev().find_map(|call| match call {
            MockCall::SetStyle { window: w, style } if w == window => Some(style),
            _ => None,
        })
    }

    /// The parent most recently assigned to `window`.
    pub fn parent_of(&self, window: WindowHandle) -> Option<WindowHandle> {
        self.calls().into_iter().rev().find_map(|call| match call {
            MockCall::SetParent { child, parent } if child == window => Some(parent),
            _ => None,
        })
    }

    pub fn last_process(&self) -> Option<Arc<MockProcessState>> {
        lock(&self.processes).last().cloned()
    }

    fn record(&self, call: MockCall) {
        lock(&self.calls).push(call);
    }
}

impl Default for MockWindowSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSystem for MockWindowSystem {
    fn spawn(&self, request: &SpawnRequest) -> Result<Box<dyn ChildProcess>> {
        let script = lock(&self.script).clone();
        if let Some(reason) = script.spawn_error {
            return Err(PlatformError::ProcessError(reason));
        }
        self.record(MockCall::Spawn(request.clone()));

        let state = Arc::new(MockProcessState {
            pid: self.next_pid.fetch_add(1, Ordering::SeqCst),
            exited: AtomicBool::new(false),
            kills: AtomicUsize::new(0),
            idle_waits: AtomicU32::new(0),
            idle: script.idle,
            exit_before_idle: script.exit_before_idle,
            exit_after_idle: script.exit_after_idle,
            main_window: script.main_window,
        });
        lock(&self.processes).push(Arc::clone(&state));

        Ok(Box::new(MockProcess {
            state,
            calls: Arc::clone(&self.calls),
        }))
    }

    fn set_parent(&self, child: WindowHandle, parent: WindowHandle) -> Result<()> {
        if let Some(reason) = lock(&self.script).reparent_error.clone() {
            return Err(PlatformError::WindowError(reason));
        }
        self.record(MockCall::SetParent { child, parent });
        Ok(())
    }

    fn window_style(&self, window: WindowHandle) -> Result<WindowStyle> {
        let initial = lock(&self.script).initial_style;
        Ok(self.style_of(window).unwrap_or(initial))
    }

    fn set_window_style(&self, window: WindowHandle, style: WindowStyle) -> Result<()> {
        if let Some(reason) = lock(&self.script).style_error.clone() {
            return Err(PlatformError::WindowError(reason));
        }
        self.record(MockCall::SetStyle { window, style });
        Ok(())
    }

    fn move_window(&self, window: WindowHandle, frame: PixelRect) -> Result<()> {
        self.record(MockCall::Move { window, frame });
        Ok(())
    }

    fn child_windows(&self, parent: WindowHandle) -> Result<Vec<WindowHandle>> {
        self.record(MockCall::ChildWindows(parent));
        Ok(lock(&self.script).children.clone())
    }

    fn activate(&self, window: WindowHandle) -> Result<()> {
        self.record(MockCall::Activate(window));
        Ok(())
    }
}
