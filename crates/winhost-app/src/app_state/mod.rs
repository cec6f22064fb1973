//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the host window and the embedding session inside it.

mod core;
mod event_handler;
mod surface;
mod title;

pub use self::core::WinhostApp;
