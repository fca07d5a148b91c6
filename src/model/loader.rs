//! Startup loading of the classifier and label encoder
//!
//! Both artifacts are JSON files in a single model directory. Any failure
//! (missing file, bad JSON, inconsistent pair) leaves the service degraded
//! instead of aborting startup.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::{Classifier, CropModel, LabelEncoder, ModelState, RandomForest};
use crate::features::NUM_FEATURES;
use crate::utils::{CropError, Result};

/// Classifier file name inside the model directory
pub const CLASSIFIER_FILE: &str = "rf_model.json";

/// Label encoder file name inside the model directory
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// Read and deserialize one JSON artifact
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| CropError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| CropError::Serialization {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate the random forest
pub fn load_forest(path: &Path) -> Result<RandomForest> {
    let forest: RandomForest = read_json(path)?;
    if forest.n_features != NUM_FEATURES {
        return Err(CropError::InvalidModel(format!(
            "classifier expects {} features, service provides {}",
            forest.n_features, NUM_FEATURES
        )));
    }
    forest.validate()?;
    Ok(forest)
}

/// Load and validate the label encoder
pub fn load_label_encoder(path: &Path) -> Result<LabelEncoder> {
    let encoder: LabelEncoder = read_json(path)?;
    encoder.validate()?;
    Ok(encoder)
}

/// Load both artifacts from `model_dir` and check they agree
pub fn load_crop_model(model_dir: &Path) -> Result<CropModel> {
    let forest = load_forest(&model_dir.join(CLASSIFIER_FILE))?;
    let encoder = load_label_encoder(&model_dir.join(LABEL_ENCODER_FILE))?;

    if let Some(id) = forest.classes().iter().find(|&&id| id >= encoder.len()) {
        return Err(CropError::InvalidModel(format!(
            "classifier class {} has no label ({} labels known)",
            id,
            encoder.len()
        )));
    }

    info!(
        "Crop Recommendation models loaded: {} trees, {} classes",
        forest.trees.len(),
        encoder.len()
    );
    Ok(CropModel::new(Box::new(forest), encoder))
}

impl ModelState {
    /// One-shot load at startup; never fails, degrades instead
    pub fn load(model_dir: &Path) -> Self {
        match load_crop_model(model_dir) {
            Ok(model) => ModelState::Loaded(model),
            Err(e) => {
                warn!("Crop Recommendation model files could not be loaded: {}", e);
                warn!("Crop Recommendation functionality will be limited.");
                ModelState::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}
