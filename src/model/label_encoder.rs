//! Label encoder
//!
//! Maps integer class ids back to crop names. Mirrors sklearn's
//! `LabelEncoder`: id `i` decodes to `classes[i]`.

use serde::{Deserialize, Serialize};

use crate::utils::{CropError, PredictError, Result};

/// Ordered class names; position is the encoded id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Number of known labels
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Reject an encoder that cannot decode anything
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(CropError::InvalidModel(
                "label encoder has no classes".to_string(),
            ));
        }
        Ok(())
    }

    /// Decode class ids to names, failing on any id outside the label set
    pub fn inverse_transform(
        &self,
        ids: &[usize],
    ) -> std::result::Result<Vec<String>, PredictError> {
        let unseen: Vec<String> = ids
            .iter()
            .filter(|&&id| id >= self.classes.len())
            .map(|id| id.to_string())
            .collect();
        if !unseen.is_empty() {
            return Err(PredictError::Inference(format!(
                "y contains previously unseen labels: [{}]",
                unseen.join(", ")
            )));
        }
        Ok(ids.iter().map(|&id| self.classes[id].clone()).collect())
    }
}
