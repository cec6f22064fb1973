//! One embedding attempt: launch, reparent, keep in sync, tear down.
//!
//! The session is split across files the same way its lifecycle is:
//! `launch` drives `on_ready`, `lifecycle` owns the one-time teardown,
//! and `dispatch` maps host framework events onto both.

mod core;
mod dispatch;
mod launch;
mod lifecycle;
mod types;


pub use self::core::EmbeddingSession;
pub use dispatch::HostEvent;
pub use types::{LaunchOutcome, SessionOptions, SkipReason};
