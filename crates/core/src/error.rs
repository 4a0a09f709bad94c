use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SymptomError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read model artifact {path}: {source}", path = path.display())]
    ModelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact: {0}")]
    ModelParse(serde_json::Error),
    #[error("invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("failed to read reference dataset {path}: {source}", path = path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse reference dataset: {0}")]
    DatasetCsv(csv::Error),
    #[error("reference dataset has no '{0}' column")]
    MissingLabelColumn(String),
    #[error("duplicate symptom column '{0}'")]
    DuplicateSymptomColumn(String),
    #[error("invalid value {value:?} in row {row}, column '{column}' (expected 0 or 1)")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Please select at least {required} symptoms for analysis.")]
    InsufficientInput { submitted: usize, required: usize },
    #[error("Model failed to load. Check server logs.")]
    ModelUnavailable,
    #[error("inference failed: {0}")]
    InferenceFailure(String),
}

impl SymptomError {
    /// Errors raised while loading startup artifacts. Any of these puts the service into
    /// degraded mode.
    pub fn is_initialization_failure(&self) -> bool {
        matches!(
            self,
            SymptomError::InvalidConfig(_)
                | SymptomError::ModelRead { .. }
                | SymptomError::ModelParse(_)
                | SymptomError::InvalidModel(_)
                | SymptomError::DatasetRead { .. }
                | SymptomError::DatasetCsv(_)
                | SymptomError::MissingLabelColumn(_)
                | SymptomError::DuplicateSymptomColumn(_)
                | SymptomError::InvalidCell { .. }
        )
    }

    /// Precondition failures that are reported to the caller as a message rather than a fault.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            SymptomError::InsufficientInput { .. } | SymptomError::ModelUnavailable
        )
    }
}

pub type SymptomResult<T> = std::result::Result<T, SymptomError>;
