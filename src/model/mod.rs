//! Model module: classifier, label encoder, and their loaded state
//!
//! This module provides:
//! - The [`Classifier`] seam the predict route calls through
//! - A random forest evaluator for sklearn exports
//! - The label encoder that turns class ids into crop names
//! - Loading both artifacts once at startup into a [`ModelState`]

pub mod forest;
pub mod label_encoder;
pub mod loader;

use crate::features::FeatureVector;
use crate::utils::PredictError;

// Re-export main types for convenience
pub use forest::{DecisionTree, RandomForest};
pub use label_encoder::LabelEncoder;
pub use loader::{load_crop_model, CLASSIFIER_FILE, LABEL_ENCODER_FILE};

/// A fitted model that maps feature rows to integer class ids
pub trait Classifier: Send + Sync {
    /// Number of features each row must have
    fn n_features(&self) -> usize;

    /// Class ids this model can produce
    fn classes(&self) -> &[usize];

    /// Predict one class id per row
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<usize>, PredictError>;
}

/// Classifier paired with the encoder that names its classes
pub struct CropModel {
    classifier: Box<dyn Classifier>,
    encoder: LabelEncoder,
}

impl CropModel {
    pub fn new(classifier: Box<dyn Classifier>, encoder: LabelEncoder) -> Self {
        Self {
            classifier,
            encoder,
        }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    /// Recommend a crop for one set of readings
    pub fn recommend(&self, features: &FeatureVector) -> Result<String, PredictError> {
        let class_id = self
            .classifier
            .predict(std::slice::from_ref(features))?
            .into_iter()
            .next()
            .ok_or_else(|| PredictError::Inference("classifier returned no prediction".to_string()))?;

        self.encoder
            .inverse_transform(&[class_id])?
            .into_iter()
            .next()
            .ok_or_else(|| PredictError::Inference("label encoder returned no label".to_string()))
    }
}

impl std::fmt::Debug for CropModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CropModel")
            .field("n_features", &self.classifier.n_features())
            .field("classes", &self.encoder.classes)
            .finish()
    }
}

/// Result of the one-shot startup load
#[derive(Debug)]
pub enum ModelState {
    /// Both artifacts loaded; prediction is available
    Loaded(CropModel),
    /// Loading failed; the predict route answers 503 until restart
    Unavailable { reason: String },
}

impl ModelState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelState::Loaded(_))
    }

    /// The loaded model, or [`PredictError::Unavailable`]
    pub fn model(&self) -> Result<&CropModel, PredictError> {
        match self {
            ModelState::Loaded(model) => Ok(model),
            ModelState::Unavailable { .. } => Err(PredictError::Unavailable),
        }
    }
}
