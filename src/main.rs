//! Resume matcher - upload a resume, paste a job description, get a match report.
//!
//! This is the main entry point for the web server. See the library crate
//! for the analysis pipeline and route handlers.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_matcher::{build_router, AppState, Config, Overrides};

#[derive(Debug, Parser)]
#[command(name = "resume-matcher", version, about = "AI resume matcher web server")]
struct Args {
    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "RESUME_MATCHER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Directory served under /static
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::resolve(
        args.config.as_deref(),
        Overrides {
            host: args.host,
            port: args.port,
            static_dir: args.static_dir,
        },
    )
    .context("Failed to load configuration")?;

    info!("Starting AI Resume Matcher v{}", env!("CARGO_PKG_VERSION"));
    if !config.static_dir.join("pkg").is_dir() {
        tracing::warn!(
            "{} has no pkg/ directory; the page script will not load. Build it with \
             `wasm-pack build page --target web --out-dir {}`",
            config.static_dir.display(),
            std::path::Path::new("..").join(config.static_dir.join("pkg")).display()
        );
    }

    let address = config.bind_address();
    let app = build_router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
