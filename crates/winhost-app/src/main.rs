mod app_state;
mod cli;
mod settings;

use winit::event_loop::EventLoop;

fn main() {
    let args = cli::parse();

    // Logging needs the configured level, so load first and report after.
    let loaded = settings::load(&args);
    let config_level = loaded
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default();
    let directive = settings::log_directive(args.log_level.as_deref(), config_level);
    tracing_subscriber::fmt()
        .with_env_filter(settings::env_filter(&directive))
        .init();

    tracing::info!("winhost v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        winhost_config::WinhostConfig::default()
    });
    let config = settings::apply_overrides(config, &args);
    tracing::debug!("Effective config: {}", winhost_config::config_to_json(&config));

    if config.embed.executable_path().is_none() {
        tracing::info!("No executable configured; the host window will stay empty");
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            return;
        }
    };
    let mut app = app_state::WinhostApp::new(config);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
