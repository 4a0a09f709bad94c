//! Related-symptom suggestions from co-occurrence in the reference dataset.

use crate::constants::MAX_RELATED_SYMPTOMS;
use crate::dataset::ReferenceDataset;
use crate::vocabulary::SymptomVocabulary;

/// Suggest up to [`MAX_RELATED_SYMPTOMS`] symptoms that co-occur with `selection`.
///
/// Cases are matched when they have at least one of the selected symptoms. The remaining
/// symptoms are ranked by how many matched cases have them, ties in vocabulary order. There is
/// no frequency floor, so zero-count symptoms can fill the tail. Selected symptoms never
/// appear in the output.
pub fn related_symptoms<S: AsRef<str>>(
    selection: &[S],
    vocabulary: &SymptomVocabulary,
    dataset: &ReferenceDataset,
) -> Vec<String> {
    let selected = vocabulary.positions_of(selection);
    if selected.is_empty() {
        return Vec::new();
    }

    let mut counts = vec![0u64; vocabulary.len()];
    let mut matched = 0usize;
    for row in dataset.rows().iter().filter(|row| row.has_any(&selected)) {
        matched += 1;
        for (count, &value) in counts.iter_mut().zip(&row.symptoms) {
            *count += u64::from(value);
        }
    }
    if matched == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<usize> = (0..vocabulary.len())
        .filter(|position| !selected.contains(position))
        .collect();
    candidates.sort_by(|&a, &b| counts[b].cmp(&counts[a]));

    candidates
        .into_iter()
        .take(MAX_RELATED_SYMPTOMS)
        .map(|position| vocabulary.symptoms()[position].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CaseRow;
    use proptest::prelude::*;

    const SYMPTOMS: [&str; 8] = [
        "itching",
        "skin_rash",
        "nodal_skin_eruptions",
        "continuous_sneezing",
        "shivering",
        "chills",
        "joint_pain",
        "stomach_pain",
    ];

    fn vocabulary() -> SymptomVocabulary {
        SymptomVocabulary::new(SYMPTOMS.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn row(present: &[&str], prognosis: &str) -> CaseRow {
        CaseRow {
            symptoms: SYMPTOMS
                .iter()
                .map(|s| u8::from(present.contains(s)))
                .collect(),
            prognosis: prognosis.into(),
        }
    }

    fn dataset() -> ReferenceDataset {
        ReferenceDataset::new(vec![
            row(&["itching", "skin_rash", "nodal_skin_eruptions"], "Fungal infection"),
            row(&["itching", "skin_rash"], "Fungal infection"),
            row(&["continuous_sneezing", "shivering", "chills"], "Allergy"),
            row(&["skin_rash", "joint_pain", "chills"], "Psoriasis"),
        ])
    }

    #[test]
    fn test_ranks_by_co_occurrence() {
        let related = related_symptoms(&["itching"], &vocabulary(), &dataset());
        assert_eq!(
            related,
            vec![
                "skin_rash",
                "nodal_skin_eruptions",
                "continuous_sneezing",
                "shivering",
                "chills",
            ]
        );
    }

    #[test]
    fn test_matches_rows_with_any_selected_symptom() {
        let related = related_symptoms(&["itching", "joint_pain"], &vocabulary(), &dataset());
        // Rows 0, 1 and 3 match: skin_rash 3, nodal 1, chills 1.
        assert_eq!(
            related,
            vec![
                "skin_rash",
                "nodal_skin_eruptions",
                "chills",
                "continuous_sneezing",
                "shivering",
            ]
        );
    }

    #[test]
    fn test_never_returns_selected_symptoms() {
        let selection = ["skin_rash", "chills", "itching"];
        let related = related_symptoms(&selection, &vocabulary(), &dataset());
        assert!(related.len() <= MAX_RELATED_SYMPTOMS);
        assert!(related.iter().all(|s| !selection.contains(&s.as_str())));
    }

    #[test]
    fn test_caps_at_remaining_symptoms() {
        let selection = ["itching", "skin_rash", "nodal_skin_eruptions", "continuous_sneezing"];
        let related = related_symptoms(&selection, &vocabulary(), &dataset());
        assert_eq!(related, vec!["chills", "shivering", "joint_pain", "stomach_pain"]);
    }

    #[test]
    fn test_no_matching_rows_returns_empty() {
        let related = related_symptoms(&["stomach_pain"], &vocabulary(), &dataset());
        assert!(related.is_empty());
    }

    #[test]
    fn test_itching_absent_from_every_row_returns_empty() {
        let dataset = ReferenceDataset::new(vec![row(&["chills"], "Allergy")]);
        let related = related_symptoms(&["itching"], &vocabulary(), &dataset);
        assert!(related.is_empty());
    }

    #[test]
    fn test_empty_or_unknown_selection_returns_empty() {
        let empty: [&str; 0] = [];
        assert!(related_symptoms(&empty, &vocabulary(), &dataset()).is_empty());
        assert!(related_symptoms(&["headache"], &vocabulary(), &dataset()).is_empty());
    }

    #[test]
    fn test_duplicates_and_unknowns_are_ignored() {
        let plain = related_symptoms(&["itching"], &vocabulary(), &dataset());
        let noisy = related_symptoms(&["itching", "headache", "itching"], &vocabulary(), &dataset());
        assert_eq!(plain, noisy);
    }

    proptest! {
        #[test]
        fn test_related_invariants_hold_for_any_selection(
            flags in prop::collection::vec(prop::collection::vec(0u8..=1, SYMPTOMS.len()), 0..12),
            picks in prop::collection::vec(0usize..SYMPTOMS.len() + 2, 0..6),
        ) {
            let dataset = ReferenceDataset::new(
                flags
                    .into_iter()
                    .map(|symptoms| CaseRow { symptoms, prognosis: "Any".into() })
                    .collect(),
            );
            // Indices past the vocabulary stand in for unknown identifiers.
            let selection: Vec<&str> = picks
                .iter()
                .map(|&i| SYMPTOMS.get(i).copied().unwrap_or("headache"))
                .collect();
            let vocab = vocabulary();

            let related = related_symptoms(&selection, &vocab, &dataset);

            prop_assert!(related.len() <= MAX_RELATED_SYMPTOMS);
            for (i, symptom) in related.iter().enumerate() {
                prop_assert!(!selection.contains(&symptom.as_str()));
                prop_assert!(!related[..i].contains(symptom));
            }

            let selected = vocab.positions_of(&selection);
            let count = |symptom: &String| {
                let position = vocab.position(symptom).unwrap();
                dataset
                    .rows()
                    .iter()
                    .filter(|row| row.has_any(&selected))
                    .filter(|row| row.symptoms[position] == 1)
                    .count()
            };
            for pair in related.windows(2) {
                prop_assert!(count(&pair[0]) >= count(&pair[1]));
            }
        }
    }
}
