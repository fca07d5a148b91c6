//! Error Handling Module
//!
//! Defines the error types for the crop recommendation service.
//! Uses thiserror for ergonomic error definitions.
//!
//! Two families exist: [`CropError`] covers loading the model artifacts at
//! startup, [`PredictError`] is the closed set of per-request failures that
//! the predict route turns into an HTTP response.

use std::path::PathBuf;

use axum::http::StatusCode;
use thiserror::Error;

/// Error raised while loading or validating the model artifacts
#[derive(Error, Debug)]
pub enum CropError {
    /// Artifact file could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact file is not valid JSON for the expected shape
    #[error("Failed to parse '{path}': {message}")]
    Serialization { path: PathBuf, message: String },

    /// Artifact parsed but is structurally unusable
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

/// Convenience Result type for artifact loading
pub type Result<T> = std::result::Result<T, CropError>;

/// Failure of a single prediction request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// Artifacts were not loaded at startup
    #[error("Crop Recommendation model is not available. Please ensure the model files are present.")]
    Unavailable,

    /// A form field was missing or not a number
    #[error("Prediction error: {0}")]
    MalformedInput(String),

    /// The classifier or label encoder rejected the input
    #[error("Prediction error: {0}")]
    Inference(String),
}

impl PredictError {
    /// HTTP status the predict route answers with
    pub fn status_code(&self) -> StatusCode {
        match self {
            PredictError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            PredictError::MalformedInput(_) | PredictError::Inference(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Missing form field
    pub fn missing_field(name: &str) -> Self {
        PredictError::MalformedInput(format!("missing field '{}'", name))
    }

    /// Form field that does not parse as a float
    pub fn not_a_number(name: &str, value: &str) -> Self {
        PredictError::MalformedInput(format!(
            "could not convert field '{}' to float: '{}'",
            name, value
        ))
    }
}
