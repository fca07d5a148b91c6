//! Application state for the crop recommendation server
//!
//! Holds the configuration and the artifacts loaded once at startup. Nothing
//! here is mutated after construction, so handlers share it without locks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ModelState;

/// Mount point of the form and predict routes
pub const DEFAULT_ROUTE_PREFIX: &str = "/crop-recommendation";

/// Server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory holding `rf_model.json` and `label_encoder.json`
    pub model_dir: PathBuf,
    /// Path prefix for the form and predict routes ("" mounts at root)
    pub route_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            // Artifacts live next to the service sources
            model_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("model"),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
        }
    }
}

impl ServerConfig {
    /// Set the route prefix, normalising it to "" or "/segment[/segment...]"
    pub fn with_route_prefix(mut self, prefix: &str) -> Self {
        self.route_prefix = normalize_prefix(prefix);
        self
    }

    pub fn with_model_dir(mut self, model_dir: impl Into<PathBuf>) -> Self {
        self.model_dir = model_dir.into();
        self
    }

    /// Path of the form page
    pub fn home_path(&self) -> String {
        format!("{}/", self.route_prefix)
    }

    /// Path the form posts to
    pub fn predict_path(&self) -> String {
        format!("{}/predict", self.route_prefix)
    }
}

/// Leading slash, no trailing slash, "/" alone becomes empty
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Classifier and label encoder, or why they are missing
    pub model: ModelState,
    /// Server start time
    pub started_at: Instant,
    /// Wall-clock start time, for the health report
    pub started_at_utc: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: ServerConfig, model: ModelState) -> Self {
        Self {
            config,
            model,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    /// Load artifacts from the configured model directory
    pub fn load(config: ServerConfig) -> Self {
        let model = ModelState::load(&config.model_dir);
        Self::new(config, model)
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
