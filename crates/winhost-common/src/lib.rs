pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, EmbedError, PlatformError};
pub use events::{EmbedEvent, EventBus};
pub use types::{LogicalSize, PixelRect, ScaleFactor, TeardownTrigger, WindowHandle, WindowStyle};
