//! Crop Recommendation Server
//!
//! Serves the crop recommendation form and prediction endpoint. The model
//! artifacts are loaded once at startup; when they are missing the server
//! still starts and answers predictions with 503.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use crop_recommendation::model::{CLASSIFIER_FILE, LABEL_ENCODER_FILE};
use crop_recommendation::state::{AppState, ServerConfig, DEFAULT_ROUTE_PREFIX};
use crop_recommendation::utils::logging::{init_logging, LogConfig};
use crop_recommendation::{build_router, ModelState};

/// Crop Recommendation Server
#[derive(Parser, Debug)]
#[command(name = "crop-recommendation-server")]
#[command(version)]
#[command(about = "HTTP server recommending crops from soil and climate readings")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "CROP_PORT", default_value = "5000")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "CROP_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Directory containing rf_model.json and label_encoder.json
    #[arg(long, env = "CROP_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// Path prefix for the form and predict routes
    #[arg(long, env = "CROP_ROUTE_PREFIX", default_value = DEFAULT_ROUTE_PREFIX)]
    route_prefix: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CROP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Debug-level logging with module targets and thread ids
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(LogConfig::from_flags(&cli.log_level, cli.verbose))?;

    // Build configuration
    let mut config = ServerConfig::default().with_route_prefix(&cli.route_prefix);
    config.host = cli.host;
    config.port = cli.port;
    if let Some(model_dir) = cli.model_dir {
        config = config.with_model_dir(model_dir);
    }

    info!("Crop Recommendation Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Model dir:    {:?}", config.model_dir);
    info!("  Classifier:   {}", CLASSIFIER_FILE);
    info!("  Encoder:      {}", LABEL_ENCODER_FILE);
    info!("  Route prefix: {:?}", config.route_prefix);

    // Load artifacts once; failure degrades the predict route only
    let state = Arc::new(AppState::load(config));
    if let ModelState::Unavailable { reason } = &state.model {
        warn!("Starting in degraded mode, predictions return 503: {}", reason);
    }

    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port).parse()?;
    let home = state.config.home_path();
    let app = build_router(state);

    // Start server
    info!("Starting server on http://{}{}", addr, home);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
