//! Constants used throughout the symptom core crate.
//!
//! The gating thresholds and result caps are fixed by the API contract; clients depend on the
//! exact values.

/// Minimum number of submitted symptoms (raw, before vocabulary filtering) for a prediction.
pub const MIN_PREDICTION_SYMPTOMS: usize = 3;

/// Top-class confidence (percent) at or above which only the single top class is returned.
pub const CONFIDENCE_GATE_PERCENT: f64 = 90.0;

/// Maximum number of predictions returned when the confidence gate is not reached.
pub const MAX_PREDICTIONS: usize = 3;

/// Predictions must exceed this confidence (percent) to be reported.
pub const MIN_CONFIDENCE_PERCENT: f64 = 0.01;

/// Maximum number of related symptoms suggested.
pub const MAX_RELATED_SYMPTOMS: usize = 5;

/// Name of the disease label column in the reference dataset.
pub const LABEL_COLUMN: &str = "prognosis";

/// Prefix pandas gives to spurious index columns when a CSV is written with its index.
pub const UNNAMED_COLUMN_PREFIX: &str = "Unnamed:";

/// Default directory holding the model artifact and reference dataset.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Filename of the serialized classifier inside the data directory.
pub const MODEL_FILENAME: &str = "disease_model.json";

/// Filename of the reference dataset inside the data directory.
pub const DATASET_FILENAME: &str = "Training.csv";
