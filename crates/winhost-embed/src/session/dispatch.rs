//! Host framework events routed onto the session.

use std::path::PathBuf;

use winhost_common::types::{LogicalSize, ScaleFactor};

use super::core::EmbeddingSession;

/// Inbound notifications from the host UI framework.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Surface attached and executable path known.
    Ready { executable: PathBuf },
    SizeChanged { size: LogicalSize, scale: ScaleFactor },
    Unloaded,
    ApplicationExit,
}

impl EmbeddingSession {
    pub fn handle(&self, event: HostEvent) {
        match event {
            HostEvent::Ready { executable } => {
                self.on_ready(&executable);
            }
            HostEvent::SizeChanged { size, scale } => {
                self.on_size_changed(size, scale);
            }
            HostEvent::Unloaded => {
                self.on_unload();
            }
            HostEvent::ApplicationExit => {
                self.on_application_exit();
            }
        }
    }
}
