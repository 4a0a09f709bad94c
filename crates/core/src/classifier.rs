//! Classifier capability and the serialized model artifacts that implement it.
//!
//! The rest of the crate only sees the [`Classifier`] trait: a probability distribution over
//! an ordered list of class labels for a single feature vector. Training happens elsewhere;
//! this module loads an exported model and evaluates it.
//!
//! # Artifact format
//!
//! Models are stored as JSON tagged by `kind`:
//!
//! ```json
//! { "kind": "softmax", "classes": ["Allergy", "Fungal infection"],
//!   "coefficients": [[0.1, -0.3], [1.2, 0.8]], "intercepts": [0.0, -0.5] }
//! ```
//!
//! ```json
//! { "kind": "bernoulli_nb", "classes": ["Allergy", "Fungal infection"],
//!   "class_log_prior": [-0.69, -0.69],
//!   "feature_log_prob": [[-2.3, -0.1], [-0.1, -2.3]] }
//! ```

use crate::encoder::FeatureVector;
use crate::{SymptomError, SymptomResult};
use serde::Deserialize;
use std::path::Path;

/// Per-class probability estimation over an ordered list of class labels.
pub trait Classifier: Send + Sync {
    /// Class labels; position `i` corresponds to probability `i`.
    fn classes(&self) -> &[String];

    /// Probability of each class for a single feature vector.
    fn predict_proba(&self, features: &FeatureVector) -> SymptomResult<Vec<f64>>;
}

/// A serialized classifier loaded from disk.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Softmax(SoftmaxModel),
    BernoulliNb(BernoulliNbModel),
}

impl ModelArtifact {
    /// Parse and validate a model artifact from JSON text.
    pub fn from_json(json: &str) -> SymptomResult<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json).map_err(SymptomError::ModelParse)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Read, parse and validate a model artifact file.
    pub fn load(path: &Path) -> SymptomResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| SymptomError::ModelRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Number of features the model expects.
    pub fn feature_count(&self) -> usize {
        match self {
            ModelArtifact::Softmax(model) => model.feature_count(),
            ModelArtifact::BernoulliNb(model) => model.feature_count(),
        }
    }

    fn validate(&self) -> SymptomResult<()> {
        match self {
            ModelArtifact::Softmax(model) => model.validate(),
            ModelArtifact::BernoulliNb(model) => model.validate(),
        }
    }
}

impl Classifier for ModelArtifact {
    fn classes(&self) -> &[String] {
        match self {
            ModelArtifact::Softmax(model) => model.classes(),
            ModelArtifact::BernoulliNb(model) => model.classes(),
        }
    }

    fn predict_proba(&self, features: &FeatureVector) -> SymptomResult<Vec<f64>> {
        match self {
            ModelArtifact::Softmax(model) => model.predict_proba(features),
            ModelArtifact::BernoulliNb(model) => model.predict_proba(features),
        }
    }
}

/// Multinomial linear model: `softmax(W·x + b)`.
#[derive(Clone, Debug, Deserialize)]
pub struct SoftmaxModel {
    classes: Vec<String>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl SoftmaxModel {
    pub fn new(
        classes: Vec<String>,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> SymptomResult<Self> {
        let model = Self {
            classes,
            coefficients,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn feature_count(&self) -> usize {
        self.coefficients.first().map_or(0, Vec::len)
    }

    fn validate(&self) -> SymptomResult<()> {
        validate_class_tables(
            &self.classes,
            &[
                ("coefficients", self.coefficients.len()),
                ("intercepts", self.intercepts.len()),
            ],
        )?;
        validate_rows("coefficients", &self.coefficients, |v| v.is_finite())?;
        if !self.intercepts.iter().all(|v| v.is_finite()) {
            return Err(SymptomError::InvalidModel(
                "intercepts must be finite".into(),
            ));
        }
        Ok(())
    }
}

impl Classifier for SoftmaxModel {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, features: &FeatureVector) -> SymptomResult<Vec<f64>> {
        check_width(self.feature_count(), features)?;

        let logits: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(weights, intercept)| {
                intercept
                    + weights
                        .iter()
                        .zip(features.as_slice())
                        .map(|(w, &x)| w * f64::from(x))
                        .sum::<f64>()
            })
            .collect();

        normalise_log_scores(&logits)
    }
}

/// Bernoulli naive Bayes over binary features.
#[derive(Clone, Debug, Deserialize)]
pub struct BernoulliNbModel {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// `feature_log_prob[c][j]` is `ln P(x_j = 1 | c)`.
    feature_log_prob: Vec<Vec<f64>>,
}

impl BernoulliNbModel {
    pub fn new(
        classes: Vec<String>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> SymptomResult<Self> {
        let model = Self {
            classes,
            class_log_prior,
            feature_log_prob,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn feature_count(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    fn validate(&self) -> SymptomResult<()> {
        validate_class_tables(
            &self.classes,
            &[
                ("class_log_prior", self.class_log_prior.len()),
                ("feature_log_prob", self.feature_log_prob.len()),
            ],
        )?;
        validate_rows("feature_log_prob", &self.feature_log_prob, |v| {
            !v.is_nan() && v <= 0.0
        })?;
        if !self.class_log_prior.iter().all(|&v| !v.is_nan() && v <= 0.0) {
            return Err(SymptomError::InvalidModel(
                "class_log_prior values must be log-probabilities".into(),
            ));
        }
        Ok(())
    }
}

impl Classifier for BernoulliNbModel {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, features: &FeatureVector) -> SymptomResult<Vec<f64>> {
        check_width(self.feature_count(), features)?;

        let joint: Vec<f64> = self
            .feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(log_probs, prior)| {
                prior
                    + log_probs
                        .iter()
                        .zip(features.as_slice())
                        .map(|(&log_p, &x)| {
                            if x == 1 {
                                log_p
                            } else {
                                // ln(1 - p) from ln(p)
                                (-log_p.exp()).ln_1p()
                            }
                        })
                        .sum::<f64>()
            })
            .collect();

        normalise_log_scores(&joint)
    }
}

fn check_width(expected: usize, features: &FeatureVector) -> SymptomResult<()> {
    if features.len() != expected {
        return Err(SymptomError::InferenceFailure(format!(
            "model expects {} features, got {}",
            expected,
            features.len()
        )));
    }
    Ok(())
}

/// Turn unnormalised log scores into probabilities (softmax with max shift).
fn normalise_log_scores(scores: &[f64]) -> SymptomResult<Vec<f64>> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Err(SymptomError::InferenceFailure(
            "no class has a finite score for this input".into(),
        ));
    }

    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / total).collect())
}

fn validate_class_tables(classes: &[String], tables: &[(&str, usize)]) -> SymptomResult<()> {
    if classes.is_empty() {
        return Err(SymptomError::InvalidModel(
            "model must define at least one class".into(),
        ));
    }
    for (name, len) in tables {
        if *len != classes.len() {
            return Err(SymptomError::InvalidModel(format!(
                "{} has {} entries but the model has {} classes",
                name,
                len,
                classes.len()
            )));
        }
    }
    Ok(())
}

fn validate_rows(
    name: &str,
    rows: &[Vec<f64>],
    valid: impl Fn(f64) -> bool,
) -> SymptomResult<()> {
    let width = rows.first().map_or(0, Vec::len);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(SymptomError::InvalidModel(format!(
                "{} row {} has {} features, expected {}",
                name,
                i,
                row.len(),
                width
            )));
        }
        if !row.iter().all(|&v| valid(v)) {
            return Err(SymptomError::InvalidModel(format!(
                "{} row {} contains an invalid value",
                name, i
            )));
        }
    }
    Ok(())
}
