//! WinhostApp struct definition and constructor.

use std::sync::Arc;

use tokio::sync::broadcast;
use winit::window::Window;

use winhost_common::events::EmbedEvent;
use winhost_config::WinhostConfig;
use winhost_embed::{EmbeddingSession, ShutdownRegistry};
use winhost_platform::WindowSystem;

use super::surface::WinitSurface;

/// Top-level application state.
pub struct WinhostApp {
    pub(super) config: WinhostConfig,
    pub(super) system: Arc<dyn WindowSystem>,
    pub(super) registry: Arc<ShutdownRegistry>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) surface: Option<Arc<WinitSurface>>,

    // Embedding
    pub(super) session: Option<Arc<EmbeddingSession>>,
    pub(super) embed_events: Option<broadcast::Receiver<EmbedEvent>>,
    pub(super) status: Option<String>,
}

impl WinhostApp {
    pub fn new(config: WinhostConfig) -> Self {
        Self {
            config,
            system: Arc::from(winhost_platform::create_window_system()),
            registry: ShutdownRegistry::global(),
            window: None,
            surface: None,
            session: None,
            embed_events: None,
            status: None,
        }
    }
}
