//! Preconditions checked before any inference work.

use crate::constants::MIN_PREDICTION_SYMPTOMS;
use crate::{SymptomError, SymptomResult};

/// Checks whether a prediction may run, handing back the loaded model if so.
///
/// Model availability is checked first: in degraded mode every prediction fails with
/// `ModelUnavailable` regardless of input. Otherwise fewer than
/// [`MIN_PREDICTION_SYMPTOMS`] submitted symptoms (counted before any vocabulary filtering)
/// fails with `InsufficientInput`.
///
/// # Errors
///
/// Returns `SymptomError::ModelUnavailable` or `SymptomError::InsufficientInput`.
pub fn check_prediction_allowed<M>(model: Option<M>, submitted: usize) -> SymptomResult<M> {
    let Some(model) = model else {
        return Err(SymptomError::ModelUnavailable);
    };

    if submitted < MIN_PREDICTION_SYMPTOMS {
        return Err(SymptomError::InsufficientInput {
            submitted,
            required: MIN_PREDICTION_SYMPTOMS,
        });
    }

    Ok(model)
}
