//! # Symptom Core
//!
//! Core inference logic for the symptom checker.
//!
//! This crate contains the pure decision logic and the startup artifact loading:
//! - Encoding a symptom selection into the classifier's feature schema
//! - Ranking classifier probabilities into a confidence-gated prediction list
//! - Suggesting related symptoms from co-occurrence in a reference dataset
//! - Loading the reference dataset (CSV) and the exported classifier (JSON)
//!
//! **No API concerns**: HTTP servers, request/response types and CLIs belong in `api-rest`,
//! `api-shared` and `symptom-cli`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod ranker;
pub mod recommender;
pub mod service;
pub mod validation;
pub mod vocabulary;

pub use classifier::{BernoulliNbModel, Classifier, ModelArtifact, SoftmaxModel};
pub use config::{resolve_config, CoreConfig};
pub use constants::{DEFAULT_DATA_DIR, MIN_PREDICTION_SYMPTOMS};
pub use dataset::{CaseRow, ReferenceDataset};
pub use encoder::{encode, FeatureVector};
pub use error::{SymptomError, SymptomResult};
pub use ranker::{rank, rank_probabilities, Prediction};
pub use recommender::related_symptoms;
pub use service::DiagnosisService;
pub use vocabulary::SymptomVocabulary;
