//! # Crop Recommendation
//!
//! A small HTTP service that recommends a crop from seven soil and climate
//! readings using a pre-trained random forest.
//!
//! ## Modules
//!
//! - `features`: The seven-value feature vector and form parsing
//! - `model`: Random forest evaluation, label encoding, startup loading
//! - `routes`: Form page, predict handler, health check
//! - `state`: Server configuration and shared application state
//! - `templates`: HTML pages
//! - `utils`: Logging and error types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crop_recommendation::{build_router, AppState, ServerConfig};
//!
//! let state = Arc::new(AppState::load(ServerConfig::default()));
//! let app = build_router(state);
//! // axum::serve(listener, app).await?;
//! ```

pub mod features;
pub mod model;
pub mod routes;
pub mod state;
pub mod templates;
pub mod utils;

// Re-export commonly used items for convenience
pub use features::{FeatureVector, FIELD_NAMES, NUM_FEATURES};
pub use model::{Classifier, CropModel, LabelEncoder, ModelState, RandomForest};
pub use routes::build_router;
pub use state::{AppState, ServerConfig, SharedState};
pub use utils::error::{CropError, PredictError, Result};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
