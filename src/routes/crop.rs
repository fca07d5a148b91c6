//! Crop recommendation endpoints - form page and prediction

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Html,
    Form,
};
use tracing::{debug, warn};

use crate::features::FeatureVector;
use crate::state::{AppState, SharedState};
use crate::templates;
use crate::utils::PredictError;

/// GET {prefix}/ - Form page
pub async fn home(State(state): State<SharedState>) -> Html<String> {
    Html(templates::form_page(&state.config.predict_path()))
}

/// POST {prefix}/predict - Recommend a crop for the submitted readings
pub async fn predict(
    State(state): State<SharedState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    match recommend(&state, form) {
        Ok(crop) => {
            debug!("Recommended crop: {}", crop);
            Ok(Html(templates::result_page(&crop, &state.config.home_path())))
        }
        Err(e) => {
            warn!("Prediction failed: {}", e);
            let page = templates::error_page(&e.to_string(), &state.config.home_path());
            Err((e.status_code(), Html(page)))
        }
    }
}

/// Degraded check first, then form decoding, parsing, and inference
fn recommend(
    state: &AppState,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<String, PredictError> {
    let model = state.model.model()?;
    let Form(fields) = form.map_err(|e| PredictError::MalformedInput(e.body_text()))?;
    let features = FeatureVector::from_form(&fields)?;
    model.recommend(&features)
}
