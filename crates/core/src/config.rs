//! Core runtime configuration.
//!
//! Artifact locations are resolved once at process startup and then passed into
//! [`DiagnosisService::load`](crate::DiagnosisService::load). Nothing in this crate reads
//! environment variables; binaries collect overrides and hand them to [`resolve_config`].

use crate::constants::{DATASET_FILENAME, DEFAULT_DATA_DIR, MODEL_FILENAME};
use crate::{SymptomError, SymptomResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    model_path: PathBuf,
    dataset_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(model_path: PathBuf, dataset_path: PathBuf) -> SymptomResult<Self> {
        if model_path.as_os_str().is_empty() {
            return Err(SymptomError::InvalidConfig(
                "model path cannot be empty".into(),
            ));
        }
        if dataset_path.as_os_str().is_empty() {
            return Err(SymptomError::InvalidConfig(
                "dataset path cannot be empty".into(),
            ));
        }

        Ok(Self {
            model_path,
            dataset_path,
        })
    }

    /// Configuration using the standard artifact filenames inside `data_dir`.
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> SymptomResult<Self> {
        let data_dir = data_dir.as_ref();
        Self::new(data_dir.join(MODEL_FILENAME), data_dir.join(DATASET_FILENAME))
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }
}

/// Resolve artifact paths from optional overrides.
///
/// Explicit `model_path`/`dataset_path` win; otherwise the standard filenames are looked up
/// under `data_dir`, falling back to [`DEFAULT_DATA_DIR`]. Empty or whitespace-only override
/// values are treated as absent.
pub fn resolve_config(
    data_dir: Option<String>,
    model_path: Option<String>,
    dataset_path: Option<String>,
) -> SymptomResult<CoreConfig> {
    fn non_blank(value: Option<String>) -> Option<PathBuf> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    let data_dir = non_blank(data_dir).unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let model_path = non_blank(model_path).unwrap_or_else(|| data_dir.join(MODEL_FILENAME));
    let dataset_path = non_blank(dataset_path).unwrap_or_else(|| data_dir.join(DATASET_FILENAME));

    CoreConfig::new(model_path, dataset_path)
}
