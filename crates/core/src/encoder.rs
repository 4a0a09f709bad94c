//! Feature encoding for the classifier.

use crate::vocabulary::SymptomVocabulary;

/// A binary feature vector aligned to a [`SymptomVocabulary`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureVector(Vec<u8>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of features set to 1.
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&v| v == 1).count()
    }
}

impl From<Vec<u8>> for FeatureVector {
    fn from(values: Vec<u8>) -> Self {
        Self(values)
    }
}

/// Encode a symptom selection as a feature vector in vocabulary order.
///
/// Identifiers missing from the vocabulary are ignored.
pub fn encode<S: AsRef<str>>(selection: &[S], vocabulary: &SymptomVocabulary) -> FeatureVector {
    let mut values = vec![0u8; vocabulary.len()];
    for position in vocabulary.positions_of(selection) {
        values[position] = 1;
    }
    FeatureVector(values)
}
