//! The diagnosis service: startup state plus the two public operations.
//!
//! A [`DiagnosisService`] is built once at startup and then shared (it is a cheap `Arc`
//! clone). It is either ready, holding the vocabulary, classifier and reference dataset, or
//! degraded because loading failed. Degraded mode is permanent for the lifetime of the value;
//! nothing is retried or reloaded.

use crate::classifier::{Classifier, ModelArtifact};
use crate::config::CoreConfig;
use crate::dataset::ReferenceDataset;
use crate::encoder::encode;
use crate::ranker::{rank, Prediction};
use crate::recommender;
use crate::validation::check_prediction_allowed;
use crate::vocabulary::SymptomVocabulary;
use crate::SymptomResult;
use std::sync::Arc;

struct Loaded {
    vocabulary: SymptomVocabulary,
    classifier: Box<dyn Classifier>,
    dataset: ReferenceDataset,
}

enum State {
    Ready(Loaded),
    Degraded { reason: String },
}

#[derive(Clone)]
pub struct DiagnosisService {
    state: Arc<State>,
}

impl DiagnosisService {
    /// Build a ready service from already-loaded parts.
    ///
    /// The vocabulary order must match the classifier's feature order. This is not checked
    /// here; a width mismatch surfaces as `InferenceFailure` on the first prediction.
    pub fn new(
        vocabulary: SymptomVocabulary,
        classifier: impl Classifier + 'static,
        dataset: ReferenceDataset,
    ) -> Self {
        Self {
            state: Arc::new(State::Ready(Loaded {
                vocabulary,
                classifier: Box::new(classifier),
                dataset,
            })),
        }
    }

    /// Build a service that is permanently degraded.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            state: Arc::new(State::Degraded {
                reason: reason.into(),
            }),
        }
    }

    /// Load the reference dataset and classifier named by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns the first initialisation failure encountered.
    pub fn try_load(cfg: &CoreConfig) -> SymptomResult<Self> {
        tracing::info!("loading reference dataset from {}", cfg.dataset_path().display());
        let (vocabulary, dataset) = ReferenceDataset::load(cfg.dataset_path())?;
        tracing::info!(
            "reference dataset loaded: {} cases, {} symptoms",
            dataset.len(),
            vocabulary.len()
        );

        tracing::info!("loading model from {}", cfg.model_path().display());
        let model = ModelArtifact::load(cfg.model_path())?;
        tracing::info!(
            "model loaded: {} classes, {} features",
            model.classes().len(),
            model.feature_count()
        );

        Ok(Self::new(vocabulary, model, dataset))
    }

    /// Load startup artifacts, falling back to degraded mode on any failure.
    ///
    /// This never fails: the error is logged and the returned service answers every
    /// prediction with `ModelUnavailable`.
    pub fn load(cfg: &CoreConfig) -> Self {
        match Self::try_load(cfg) {
            Ok(service) => service,
            Err(e) => {
                tracing::error!("startup load failed, serving in degraded mode: {}", e);
                Self::degraded(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state, State::Ready(_))
    }

    /// Why loading failed, if the service is degraded.
    pub fn degraded_reason(&self) -> Option<&str> {
        match &*self.state {
            State::Ready(_) => None,
            State::Degraded { reason } => Some(reason),
        }
    }

    /// Recognised symptom identifiers in feature order. Empty when degraded.
    pub fn vocabulary(&self) -> &[String] {
        match &*self.state {
            State::Ready(loaded) => loaded.vocabulary.symptoms(),
            State::Degraded { .. } => &[],
        }
    }

    /// Predict likely diseases for the submitted symptoms.
    ///
    /// # Errors
    ///
    /// - `ModelUnavailable` when degraded.
    /// - `InsufficientInput` when fewer than three symptoms are submitted; duplicates and
    ///   unknown identifiers still count towards the minimum.
    /// - `InferenceFailure` when the classifier fails.
    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S]) -> SymptomResult<Vec<Prediction>> {
        let loaded = match &*self.state {
            State::Ready(loaded) => Some(loaded),
            State::Degraded { .. } => None,
        };
        let loaded = check_prediction_allowed(loaded, symptoms.len())?;

        let features = encode(symptoms, &loaded.vocabulary);
        tracing::debug!(
            "predicting from {} recognised of {} submitted symptoms",
            features.active_count(),
            symptoms.len()
        );
        rank(loaded.classifier.as_ref(), &features)
    }

    /// Suggest symptoms that co-occur with the submitted ones. Empty when degraded.
    pub fn related_symptoms<S: AsRef<str>>(&self, symptoms: &[S]) -> Vec<String> {
        match &*self.state {
            State::Ready(loaded) => {
                recommender::related_symptoms(symptoms, &loaded.vocabulary, &loaded.dataset)
            }
            State::Degraded { .. } => Vec::new(),
        }
    }
}

impl std::fmt::Debug for DiagnosisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.state {
            State::Ready(loaded) => f
                .debug_struct("DiagnosisService")
                .field("symptoms", &loaded.vocabulary.len())
                .field("classes", &loaded.classifier.classes().len())
                .field("cases", &loaded.dataset.len())
                .finish(),
            State::Degraded { reason } => f
                .debug_struct("DiagnosisService")
                .field("degraded", reason)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::SoftmaxModel;
    use crate::dataset::CaseRow;
    use crate::encoder::FeatureVector;
    use crate::SymptomError;

    const SYMPTOMS: [&str; 5] = [
        "itching",
        "skin_rash",
        "nodal_skin_eruptions",
        "continuous_sneezing",
        "chills",
    ];

    /// Returns a fixed distribution.
    struct FixedClassifier {
        classes: Vec<String>,
        probabilities: Vec<f64>,
    }

    impl Classifier for FixedClassifier {
        fn classes(&self) -> &[String] {
            &self.classes
        }

        fn predict_proba(&self, features: &FeatureVector) -> SymptomResult<Vec<f64>> {
            assert_eq!(features.len(), SYMPTOMS.len());
            Ok(self.probabilities.clone())
        }
    }

    fn vocabulary() -> SymptomVocabulary {
        SymptomVocabulary::new(SYMPTOMS.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn dataset() -> ReferenceDataset {
        ReferenceDataset::new(vec![
            CaseRow {
                symptoms: vec![1, 1, 1, 0, 0],
                prognosis: "Fungal infection".into(),
            },
            CaseRow {
                symptoms: vec![0, 0, 0, 1, 1],
                prognosis: "Allergy".into(),
            },
        ])
    }

    fn service_with(probabilities: Vec<f64>) -> DiagnosisService {
        let classifier = FixedClassifier {
            classes: vec![
                "Fungal infection".into(),
                "Allergy".into(),
                "GERD".into(),
                "Drug Reaction".into(),
            ],
            probabilities,
        };
        DiagnosisService::new(vocabulary(), classifier, dataset())
    }

    #[test]
    fn test_predict_requires_three_symptoms() {
        let service = service_with(vec![0.97, 0.01, 0.01, 0.01]);
        let err = service.predict(&["itching", "skin_rash"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select at least 3 symptoms for analysis."
        );
    }

    #[test]
    fn test_predict_counts_raw_submissions() {
        // Unknown symptoms count towards the minimum.
        let service = service_with(vec![0.97, 0.01, 0.01, 0.01]);
        let predictions = service
            .predict(&["itching", "headache", "not_a_symptom"])
            .unwrap();
        assert_eq!(predictions.len(), 1);
    }

    #[test]
    fn test_predict_confident() {
        let service = service_with(vec![0.97, 0.01, 0.01, 0.01]);
        let predictions = service
            .predict(&["itching", "skin_rash", "nodal_skin_eruptions"])
            .unwrap();
        assert_eq!(
            predictions,
            vec![Prediction {
                disease: "Fungal infection".into(),
                confidence: 97.0
            }]
        );
    }

    #[test]
    fn test_predict_uncertain() {
        let service = service_with(vec![0.40, 0.25, 0.20, 0.15]);
        let predictions = service
            .predict(&["itching", "skin_rash", "nodal_skin_eruptions"])
            .unwrap();
        let diseases: Vec<&str> = predictions.iter().map(|p| p.disease.as_str()).collect();
        assert_eq!(diseases, vec!["Fungal infection", "Allergy", "GERD"]);
    }

    #[test]
    fn test_predict_surfaces_width_mismatch() {
        let model = SoftmaxModel::new(
            vec!["Fungal infection".into()],
            vec![vec![0.0; 2]],
            vec![0.0],
        )
        .unwrap();
        let service = DiagnosisService::new(vocabulary(), model, dataset());
        let err = service
            .predict(&["itching", "skin_rash", "chills"])
            .unwrap_err();
        assert!(matches!(err, SymptomError::InferenceFailure(_)));
        assert!(!err.is_advisory());
    }

    #[test]
    fn test_related_symptoms() {
        let service = service_with(vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            service.related_symptoms(&["itching"]),
            vec!["skin_rash", "nodal_skin_eruptions", "continuous_sneezing", "chills"]
        );
        let empty: Vec<String> = Vec::new();
        assert!(service.related_symptoms(&empty).is_empty());
    }

    #[test]
    fn test_degraded_service() {
        let service = DiagnosisService::degraded("model file missing");
        assert!(!service.is_ready());
        assert_eq!(service.degraded_reason(), Some("model file missing"));
        assert!(service.vocabulary().is_empty());

        let err = service
            .predict(&["itching", "skin_rash", "nodal_skin_eruptions"])
            .unwrap_err();
        assert!(matches!(err, SymptomError::ModelUnavailable));
        assert!(service.related_symptoms(&["itching"]).is_empty());
    }

    #[test]
    fn test_load_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("Training.csv"),
            "itching,skin_rash,nodal_skin_eruptions,prognosis\n\
             1,1,1,Fungal infection\n\
             0,1,0,Psoriasis\n",
        )
        .unwrap();
        std::fs::write(
            temp.path().join("disease_model.json"),
            r#"{"kind": "softmax", "classes": ["Fungal infection", "Psoriasis"],
                "coefficients": [[3.0, 1.0, 3.0], [0.0, 1.0, 0.0]],
                "intercepts": [0.0, 0.0]}"#,
        )
        .unwrap();

        let cfg = CoreConfig::from_data_dir(temp.path()).unwrap();
        let service = DiagnosisService::load(&cfg);
        assert!(service.is_ready());
        assert_eq!(
            service.vocabulary(),
            &["itching", "skin_rash", "nodal_skin_eruptions"]
        );

        let predictions = service
            .predict(&["itching", "skin_rash", "nodal_skin_eruptions"])
            .unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].disease, "Fungal infection");
    }

    #[test]
    fn test_load_failure_degrades() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("Training.csv"),
            "itching,prognosis\n1,Fungal infection\n",
        )
        .unwrap();

        let cfg = CoreConfig::from_data_dir(temp.path()).unwrap();
        assert!(matches!(
            DiagnosisService::try_load(&cfg),
            Err(SymptomError::ModelRead { .. })
        ));

        let service = DiagnosisService::load(&cfg);
        assert!(!service.is_ready());
        assert!(service
            .degraded_reason()
            .is_some_and(|r| r.contains("disease_model.json")));
    }
}
