use anyhow::Context;
use sandbox_app::SandboxConfig;
use std::path::PathBuf;
use tracing::info;
use web4_sandbox_api::{AppState, router};

/// Path to an optional TOML configuration file
const CONFIG_ENV: &str = "WEB4_SANDBOX_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("Starting web4 sandbox API server");

    let config_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
    let config = SandboxConfig::load(config_path.as_deref())?;
    let addr = config.listen_addr.clone();

    let state = AppState::from_config(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("web4 sandbox API is ready on {}", addr);
    info!("  - Health check: GET /health");
    info!("  - View URL: POST /api/view/url");
    info!("  - View call: POST /api/view/call");
    info!("  - Sign URL: POST /api/sign/url");

    axum::serve(listener, app)
        .await
        .context("Server failed")?;

    Ok(())
}
