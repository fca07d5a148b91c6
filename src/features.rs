//! Soil and climate feature vector
//!
//! The classifier consumes seven readings in a fixed order. Form field names
//! match the column names the model was trained on.

use crate::utils::PredictError;

/// Number of features the classifier expects
pub const NUM_FEATURES: usize = 7;

/// Form field names, in feature order
pub const FIELD_NAMES: [&str; NUM_FEATURES] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// One row of classifier input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Nitrogen content ratio in the soil
    pub nitrogen: f64,
    /// Phosphorus content ratio in the soil
    pub phosphorus: f64,
    /// Potassium content ratio in the soil
    pub potassium: f64,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Soil pH
    pub ph: f64,
    /// Rainfall in mm
    pub rainfall: f64,
}

impl FeatureVector {
    /// Build from values already in feature order
    pub fn from_array(values: [f64; NUM_FEATURES]) -> Self {
        let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
        Self {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    /// Values in the order the classifier was trained on
    pub fn to_array(&self) -> [f64; NUM_FEATURES] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Parse the seven named fields out of submitted form data.
    ///
    /// Fields are checked in feature order, so the first offending field is
    /// the one reported. When a key repeats, its first value is used. Extra
    /// fields are ignored.
    pub fn from_form(form: &[(String, String)]) -> Result<Self, PredictError> {
        let mut values = [0.0; NUM_FEATURES];
        for (slot, name) in values.iter_mut().zip(FIELD_NAMES) {
            let raw = form
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
                .ok_or_else(|| PredictError::missing_field(name))?;
            *slot = parse_float(name, raw)?;
        }
        Ok(Self::from_array(values))
    }
}

/// Parse a single field value.
///
/// Surrounding whitespace is tolerated, and so are `_` digit separators
/// placed between two digits (`1_000`).
fn parse_float(name: &str, raw: &str) -> Result<f64, PredictError> {
    let trimmed = raw.trim();
    strip_digit_separators(trimmed)
        .and_then(|digits| digits.parse::<f64>().ok())
        .ok_or_else(|| PredictError::not_a_number(name, raw))
}

/// Remove `_` separators, or `None` if one is not between two digits
fn strip_digit_separators(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'_' {
            continue;
        }
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + 1).copied();
        let digit = |c: Option<u8>| c.is_some_and(|c| c.is_ascii_digit());
        if !digit(before) || !digit(after) {
            return None;
        }
    }
    Some(s.replace('_', ""))
}
