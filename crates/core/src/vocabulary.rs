//! The ordered symptom vocabulary.
//!
//! The vocabulary defines the feature schema: position `i` of every feature vector refers to
//! `symptoms[i]`. Its order must match the order the classifier was trained on.

use crate::{SymptomError, SymptomResult};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct SymptomVocabulary {
    symptoms: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymptomVocabulary {
    /// Build a vocabulary from symptom identifiers in schema order.
    ///
    /// # Errors
    ///
    /// Returns `SymptomError::DuplicateSymptomColumn` if an identifier appears twice.
    pub fn new(symptoms: Vec<String>) -> SymptomResult<Self> {
        let mut index = HashMap::with_capacity(symptoms.len());
        for (position, symptom) in symptoms.iter().enumerate() {
            if index.insert(symptom.clone(), position).is_some() {
                return Err(SymptomError::DuplicateSymptomColumn(symptom.clone()));
            }
        }

        Ok(Self { symptoms, index })
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.index.contains_key(symptom)
    }

    pub fn position(&self, symptom: &str) -> Option<usize> {
        self.index.get(symptom).copied()
    }

    /// Positions of the recognised symptoms in `selection`.
    ///
    /// Unknown identifiers are dropped and duplicates collapse to their first occurrence, so
    /// the result preserves submission order.
    pub fn positions_of<S: AsRef<str>>(&self, selection: &[S]) -> Vec<usize> {
        let mut positions: Vec<usize> = Vec::with_capacity(selection.len());
        for symptom in selection {
            if let Some(position) = self.position(symptom.as_ref()) {
                if !positions.contains(&position) {
                    positions.push(position);
                }
            }
        }
        positions
    }
}
