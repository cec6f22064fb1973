//! Embedding controller for hosting another process's main window.
//!
//! An [`EmbeddingSession`] launches an executable, waits until it is
//! input-idle, moves its main window under a host-owned window, keeps that
//! window sized to the host, and kills the process exactly once when the
//! host goes away. Provides:
//! - Launching with a bounded, cancellable input-idle wait
//! - Reparenting and style stripping
//! - Layout sync from logical size and device scale
//! - Idempotent teardown from any trigger (dispose, unload, app exit, drop)
//! - A process-wide shutdown registry

pub mod launcher;
pub mod layout;
pub mod reparent;
pub mod session;
pub mod shutdown;
pub mod surface;

pub use layout::compute_frame;
pub use session::{EmbeddingSession, HostEvent, LaunchOutcome, SessionOptions, SkipReason};
pub use shutdown::{ShutdownRegistry, SubscriptionId};
pub use surface::{HostLayout, HostSurface};
pub use winhost_common::{EmbedError, EmbedEvent, TeardownTrigger};
