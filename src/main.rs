use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use viva_screen::{
    create_router, AppState, Capabilities, CaptureConstraints, CaptureDevice, Config,
    SyntheticCamera,
};

#[derive(Debug, Parser)]
#[command(name = "viva-screen", about = "Candidate screening session service")]
struct Cli {
    /// Config file (without extension)
    #[arg(long, default_value = "config/viva-screen")]
    config: String,

    /// Override the bind address from the config
    #[arg(long)]
    bind: Option<String>,

    /// Override the port from the config
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("viva-screen v0.1.0");
    info!("Loaded config: {}", cfg.service.name);

    let capture: Option<Arc<dyn CaptureDevice>> = match cfg.media.device.as_str() {
        "synthetic" => Some(Arc::new(SyntheticCamera::new(
            Duration::from_millis(cfg.media.chunk_interval_ms),
            4096,
        ))),
        "none" => None,
        other => {
            warn!("unknown capture device {:?}, running without capture", other);
            None
        }
    };
    if capture.is_none() {
        info!("no capture device configured; sessions run in degraded mode");
    }

    // Speech and fullscreen drivers come from the hosting shell; the
    // standalone service runs with both absent and degrades per session
    let capabilities = Capabilities {
        capture,
        speech: None,
        fullscreen: None,
    };

    let constraints = CaptureConstraints {
        width: cfg.media.width,
        height: cfg.media.height,
        audio: cfg.media.audio,
    };

    let state = AppState::new(capabilities, constraints, cfg.session.listing_route.clone());
    let router = create_router(state);

    let bind = cli.bind.unwrap_or(cfg.service.http.bind);
    let port = cli.port.unwrap_or(cfg.service.http.port);
    let addr = format!("{}:{}", bind, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
