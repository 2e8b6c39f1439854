//! Request and response bodies for the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::inference::Prediction;

/// Maximum characters accepted by `POST /api/predict`.
pub const MAX_API_CHARS: usize = 10_000;
/// Maximum characters accepted by the HTML form.
pub const MAX_FORM_CHARS: usize = 5_000;

#[derive(Debug, Clone, Serialize)]
pub struct PredictionDto {
    pub prediction: String,
    pub probability: f64,
    pub model_version: String,
}

impl From<Prediction> for PredictionDto {
    fn from(value: Prediction) -> Self {
        PredictionDto {
            prediction: value.label.as_str().to_string(),
            probability: value.probability,
            model_version: value.model_version,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub message: String,
}
