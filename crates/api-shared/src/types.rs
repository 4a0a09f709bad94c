//! JSON request and response bodies.

use serde::{Deserialize, Serialize};
use symptom_core::{Prediction, SymptomError};
use utoipa::ToSchema;

/// Body of both `/api/predict` and `/api/related_symptoms`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SymptomsReq {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionItem {
    pub disease: String,
    /// Percentage rounded to two decimal places.
    pub confidence: f64,
}

impl From<Prediction> for PredictionItem {
    fn from(p: Prediction) -> Self {
        Self {
            disease: p.disease,
            confidence: p.confidence,
        }
    }
}

/// Outcome of a prediction request: either ranked predictions or an advisory message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PredictRes {
    Predictions { predictions: Vec<PredictionItem> },
    Error { error: String },
}

impl PredictRes {
    pub fn predictions(predictions: Vec<Prediction>) -> Self {
        PredictRes::Predictions {
            predictions: predictions.into_iter().map(PredictionItem::from).collect(),
        }
    }
}

impl From<&SymptomError> for PredictRes {
    fn from(e: &SymptomError) -> Self {
        PredictRes::Error {
            error: e.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RelatedSymptomsRes {
    pub related: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SymptomListRes {
    pub symptoms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}
