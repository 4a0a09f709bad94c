//! Turns classifier probabilities into the confidence-gated prediction list.

use crate::classifier::Classifier;
use crate::constants::{CONFIDENCE_GATE_PERCENT, MAX_PREDICTIONS, MIN_CONFIDENCE_PERCENT};
use crate::encoder::FeatureVector;
use crate::{SymptomError, SymptomResult};

/// A ranked disease candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub disease: String,
    /// Percentage, rounded to two decimal places.
    pub confidence: f64,
}

/// Run the classifier on `features` and rank the result.
///
/// Classifier errors propagate unchanged; there is no fallback result.
pub fn rank(
    classifier: &dyn Classifier,
    features: &FeatureVector,
) -> SymptomResult<Vec<Prediction>> {
    let probabilities = classifier.predict_proba(features)?;
    rank_probabilities(&probabilities, classifier.classes())
}

/// Rank per-class probabilities.
///
/// If the top class reaches [`CONFIDENCE_GATE_PERCENT`] only it is returned, otherwise up to
/// [`MAX_PREDICTIONS`] classes. Candidates at or below [`MIN_CONFIDENCE_PERCENT`] are dropped,
/// so the result may be empty. Equal probabilities keep the classifier's class order.
///
/// # Errors
///
/// `InferenceFailure` if the probability count differs from the class count or any
/// probability is not finite.
pub fn rank_probabilities(
    probabilities: &[f64],
    classes: &[String],
) -> SymptomResult<Vec<Prediction>> {
    if probabilities.len() != classes.len() {
        return Err(SymptomError::InferenceFailure(format!(
            "classifier returned {} probabilities for {} classes",
            probabilities.len(),
            classes.len()
        )));
    }
    if let Some(bad) = probabilities.iter().find(|p| !p.is_finite()) {
        return Err(SymptomError::InferenceFailure(format!(
            "classifier returned a non-finite probability ({})",
            bad
        )));
    }

    let mut order: Vec<usize> = (0..probabilities.len()).collect();
    // Stable: ties stay in class order.
    order.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));

    let Some(&top) = order.first() else {
        return Ok(Vec::new());
    };

    let breadth = if probabilities[top] * 100.0 >= CONFIDENCE_GATE_PERCENT {
        1
    } else {
        MAX_PREDICTIONS
    };

    Ok(order
        .into_iter()
        .take(breadth)
        .filter_map(|idx| {
            let confidence = probabilities[idx] * 100.0;
            (confidence > MIN_CONFIDENCE_PERCENT).then(|| Prediction {
                disease: classes[idx].clone(),
                confidence: round_2dp(confidence),
            })
        })
        .collect())
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
