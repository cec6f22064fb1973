use std::path::PathBuf;

use clap::Parser;

/// winhost: run an application inside a host window.
#[derive(Parser, Debug)]
#[command(name = "winhost", version, about)]
pub struct Args {
    /// Executable to embed. Overrides `[embed] executable` in the config.
    pub executable: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Input-idle timeout in milliseconds.
    #[arg(long)]
    pub idle_timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
