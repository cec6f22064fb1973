//! `ApplicationHandler` implementation for the winit event loop.

use std::sync::Arc;

use tokio::sync::broadcast::error::TryRecvError;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{WindowAttributes, WindowId};

use winhost_common::events::EmbedEvent;
use winhost_embed::{EmbeddingSession, HostEvent, HostSurface, SessionOptions};

use super::core::WinhostApp;
use super::surface::WinitSurface;

impl ApplicationHandler for WinhostApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("winhost")
            .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 768.0));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = Arc::new(WinitSurface::new(Arc::clone(&window)));
        let options = SessionOptions::from_config(&self.config.embed)
            .with_registry(Arc::clone(&self.registry));
        let session = EmbeddingSession::new(
            Arc::clone(&self.system),
            surface.clone(),
            options,
        );
        self.embed_events = Some(session.subscribe());
        self.window = Some(window);
        self.surface = Some(surface);
        self.session = Some(Arc::clone(&session));

        if let Some(executable) = self.config.embed.executable_path() {
            session.handle(HostEvent::Ready { executable });
        }
        self.drain_embed_events();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                let notified = self.registry.notify_shutdown();
                tracing::debug!("Shutdown delivered to {notified} listener(s)");
                event_loop.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.sync_embedded_layout();
            }

            WindowEvent::Focused(true) => {
                if let Some(session) = &self.session {
                    session.activate();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.drain_embed_events();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = self.session.take() {
            session.handle(HostEvent::Unloaded);
        }
        self.drain_embed_events();
    }
}

impl WinhostApp {
    /// Forward the window's current size and scale to the session.
    fn sync_embedded_layout(&self) {
        let (Some(session), Some(surface)) = (&self.session, &self.surface) else {
            return;
        };
        if surface.is_collapsed() {
            return;
        }
        let layout = surface.current_layout();
        session.handle(HostEvent::SizeChanged {
            size: layout.size,
            scale: layout.scale,
        });
    }

    /// Log every pending session event and reflect it in the title.
    fn drain_embed_events(&mut self) {
        let Some(rx) = self.embed_events.as_mut() else {
            return;
        };
        let mut status_changed = false;
        loop {
            match rx.try_recv() {
                Ok(EmbedEvent::HostProcessStarted { pid }) => {
                    tracing::info!("Embedded process {pid} started");
                    self.status = Some(format!("pid {pid}"));
                    status_changed = true;
                }
                Ok(EmbedEvent::LaunchFailed { reason }) => {
                    tracing::warn!("Embedding failed: {reason}");
                    self.status = Some(format!("embed failed: {reason}"));
                    status_changed = true;
                }
                Ok(EmbedEvent::Disposed { trigger }) => {
                    tracing::debug!("Embedding session disposed ({trigger})");
                }
                Ok(EmbedEvent::Unknown) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {skipped} embed event(s)");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if status_changed {
            self.update_window_title();
        }
    }
}
