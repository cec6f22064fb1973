//! Moves a launched process's window under the host and strips its chrome.

use tracing::debug;
use winhost_common::errors::EmbedError;
use winhost_common::types::{WindowHandle, WindowStyle};
use winhost_platform::WindowSystem;

/// Parent `child` to `host` and replace its style with a plain visible one.
///
/// `cancelled` is checked before each hierarchy write; once it returns true
/// nothing more reaches the OS and the result is `Aborted`. Nothing here is
/// undone on teardown: killing the owning process removes the window from
/// the hierarchy.
pub fn reparent(
    system: &dyn WindowSystem,
    child: WindowHandle,
    host: WindowHandle,
    cancelled: impl Fn() -> bool,
) -> Result<(), EmbedError> {
    let previous = system.window_style(child).ok();

    if cancelled() {
        return Err(EmbedError::Aborted);
    }
    system
        .set_parent(child, host)
        .map_err(|e| EmbedError::Reparent(e.to_string()))?;
    if cancelled() {
        return Err(EmbedError::Aborted);
    }
    system
        .set_window_style(child, WindowStyle::EMBEDDED)
        .map_err(|e| EmbedError::Reparent(e.to_string()))?;

    debug!(
        %child,
        %host,
        previous_style = ?previous,
        style = %WindowStyle::EMBEDDED,
        "window reparented"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use winhost_platform::mock::{MockCall, MockScript, MockWindowSystem};

    const CHILD: WindowHandle = WindowHandle(0x2000);
    const HOST: WindowHandle = WindowHandle(0x1000);

    #[test]
    fn parent_then_style() {
        let system = MockWindowSystem::new();
        reparent(&system, CHILD, HOST, || false).unwrap();

        assert_eq!(
            system.calls(),
            vec![
                MockCall::SetParent {
                    child: CHILD,
                    parent: HOST
                },
                MockCall::SetStyle {
                    window: CHILD,
                    style: WindowStyle::VISIBLE
                },
            ]
        );
    }

    #[test]
    fn decorations_are_cleared() {
        let system = MockWindowSystem::new();
        assert!(system
            .window_style(CHILD)
            .unwrap()
            .intersects(WindowStyle::TOP_LEVEL_DECORATIONS));

        reparent(&system, CHILD, HOST, || false).unwrap();

        let style = system.style_of(CHILD).unwrap();
        assert!(style.contains(WindowStyle::VISIBLE));
        assert!(!style.intersects(WindowStyle::TOP_LEVEL_DECORATIONS));
    }

    #[test]
    fn parent_failure_is_reported() {
        let system = MockWindowSystem::with_script(MockScript {
            reparent_error: Some("invalid window handle".into()),
            ..Default::default()
        });
        let err = reparent(&system, CHILD, HOST, || false).unwrap_err();
        assert!(matches!(err, EmbedError::Reparent(ref msg) if msg.contains("invalid window handle")));
        assert_eq!(system.style_of(CHILD), None);
    }

    #[test]
    fn cancelled_before_parenting_writes_nothing() {
        let system = MockWindowSystem::new();
        let err = reparent(&system, CHILD, HOST, || true).unwrap_err();
        assert_eq!(err, EmbedError::Aborted);
        assert!(system.calls().is_empty());
    }

    #[test]
    fn cancelled_after_parenting_skips_style() {
        let system = MockWindowSystem::new();
        let checks = std::cell::Cell::new(0);
        let err = reparent(&system, CHILD, HOST, || {
            checks.set(checks.get() + 1);
            checks.get() > 1
        })
        .unwrap_err();

        assert_eq!(err, EmbedError::Aborted);
        assert_eq!(system.parent_of(CHILD), Some(HOST));
        assert_eq!(system.style_of(CHILD), None);
    }

    #[test]
    fn style_failure_is_reported() {
        let system = MockWindowSystem::with_script(MockScript {
            style_error: Some("access denied".into()),
            ..Default::default()
        });
        let err = reparent(&system, CHILD, HOST, || false).unwrap_err();
        assert!(matches!(err, EmbedError::Reparent(_)));
    }
}
