//! Layout sync: host logical size to embedded-window pixels.

use tracing::{trace, warn};
use winhost_common::types::{LogicalSize, PixelRect, ScaleFactor, WindowHandle};
use winhost_platform::WindowSystem;

/// Geometry that makes the embedded window fill the host exactly.
///
/// Each axis is `logical * scale`, truncated toward zero. The origin is
/// always the host's top-left corner. Negative or NaN sizes collapse to 0.
pub fn compute_frame(size: LogicalSize, scale: ScaleFactor) -> PixelRect {
    PixelRect {
        x: 0,
        y: 0,
        width: to_pixels(size.width, scale.x),
        height: to_pixels(size.height, scale.y),
    }
}

fn to_pixels(logical: f64, scale: f64) -> i32 {
    // `as` truncates toward zero, saturates, and maps NaN to 0.
    ((logical * scale) as i32).max(0)
}

/// Compute and apply the frame for `window`, returning what was applied.
pub fn apply(
    system: &dyn WindowSystem,
    window: WindowHandle,
    size: LogicalSize,
    scale: ScaleFactor,
) -> Option<PixelRect> {
    let frame = compute_frame(size, scale);
    match system.move_window(window, frame) {
        Ok(()) => {
            trace!(%window, width = frame.width, height = frame.height, "embedded window resized");
            Some(frame)
        }
        Err(e) => {
            warn!(%window, error = %e, "failed to resize embedded window");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winhost_platform::mock::MockWindowSystem;

    fn frame(width: i32, height: i32) -> PixelRect {
        PixelRect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    #[test]
    fn identity_scale_keeps_logical_size() {
        let result = compute_frame(LogicalSize::new(400.0, 300.0), ScaleFactor::IDENTITY);
        assert_eq!(result, frame(400, 300));
    }

    #[test]
    fn scale_is_applied_per_axis() {
        let result = compute_frame(LogicalSize::new(800.0, 600.0), ScaleFactor::new(1.5, 2.0));
        assert_eq!(result, frame(1200, 1200));
    }

    #[test]
    fn fractional_pixels_truncate() {
        let result = compute_frame(LogicalSize::new(100.7, 33.3), ScaleFactor::uniform(1.25));
        // 125.875 -> 125, 41.625 -> 41
        assert_eq!(result, frame(125, 41));
    }

    #[test]
    fn origin_is_always_zero() {
        let result = compute_frame(LogicalSize::new(1920.0, 1080.0), ScaleFactor::uniform(2.0));
        assert_eq!((result.x, result.y), (0, 0));
    }

    #[test]
    fn degenerate_sizes_clamp_to_zero() {
        assert_eq!(
            compute_frame(LogicalSize::new(-10.0, f64::NAN), ScaleFactor::IDENTITY),
            frame(0, 0)
        );
        assert_eq!(
            compute_frame(LogicalSize::new(0.0, 0.0), ScaleFactor::uniform(3.0)),
            frame(0, 0)
        );
    }

    #[test]
    fn recomputation_is_pure() {
        let size = LogicalSize::new(640.5, 480.25);
        let scale = ScaleFactor::new(1.75, 1.5);
        assert_eq!(compute_frame(size, scale), compute_frame(size, scale));
    }

    #[test]
    fn apply_moves_the_window() {
        let system = MockWindowSystem::new();
        let window = WindowHandle(0x77);
        let applied = apply(&system, window, LogicalSize::new(400.0, 300.0), ScaleFactor::IDENTITY);
        assert_eq!(applied, Some(frame(400, 300)));
        assert_eq!(system.last_frame(window), Some(frame(400, 300)));
    }
}
