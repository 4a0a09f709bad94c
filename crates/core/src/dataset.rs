//! Reference dataset of historical cases.
//!
//! The dataset is a CSV table: one column per symptom holding `0`/`1`, plus a `prognosis`
//! label column. It is only used for co-occurrence statistics, never for training.
//!
//! Loading also yields the [`SymptomVocabulary`]: the symptom columns, in file order.

use crate::constants::{LABEL_COLUMN, UNNAMED_COLUMN_PREFIX};
use crate::vocabulary::SymptomVocabulary;
use crate::{SymptomError, SymptomResult};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One historical case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseRow {
    /// Symptom flags in vocabulary order.
    pub symptoms: Vec<u8>,
    pub prognosis: String,
}

impl CaseRow {
    /// Whether any of the given vocabulary positions is set in this row.
    pub fn has_any(&self, positions: &[usize]) -> bool {
        positions
            .iter()
            .any(|&p| self.symptoms.get(p).copied().unwrap_or(0) > 0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ReferenceDataset {
    rows: Vec<CaseRow>,
}

impl ReferenceDataset {
    pub fn new(rows: Vec<CaseRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CaseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load the dataset and its vocabulary from a CSV file.
    pub fn load(path: &Path) -> SymptomResult<(SymptomVocabulary, Self)> {
        let file = std::fs::File::open(path).map_err(|source| SymptomError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse the dataset and its vocabulary from CSV.
    ///
    /// Header names are trimmed. Blank headers and pandas `Unnamed: N` index columns are
    /// ignored along with their cells. Repeated names are renamed in file order, pandas
    /// style: the second `fluid_overload` becomes `fluid_overload.1`.
    ///
    /// # Errors
    ///
    /// - `MissingLabelColumn` if there is no `prognosis` column.
    /// - `InvalidCell` if a symptom cell is not `0` or `1`.
    /// - `DatasetCsv` for malformed CSV, including rows with the wrong number of fields.
    pub fn from_reader<R: Read>(reader: R) -> SymptomResult<(SymptomVocabulary, Self)> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(SymptomError::DatasetCsv)?.clone();

        let kept: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .map(|(column, header)| (column, header.trim()))
            .filter(|(_, header)| !header.is_empty() && !header.starts_with(UNNAMED_COLUMN_PREFIX))
            .map(|(column, header)| (column, header.to_string()))
            .collect();
        let (columns, headers): (Vec<usize>, Vec<String>) = kept.into_iter().unzip();

        let mut label_column = None;
        let mut symptom_columns: Vec<usize> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        for (column, name) in columns.into_iter().zip(dedupe_headers(headers)) {
            if name == LABEL_COLUMN {
                label_column = Some(column);
                continue;
            }
            symptom_columns.push(column);
            names.push(name);
        }

        let label_column =
            label_column.ok_or_else(|| SymptomError::MissingLabelColumn(LABEL_COLUMN.into()))?;
        let vocabulary = SymptomVocabulary::new(names)?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(SymptomError::DatasetCsv)?;
            // 1-based, counting the header line.
            let row_number = index + 2;

            let mut symptoms = Vec::with_capacity(symptom_columns.len());
            for (&column, name) in symptom_columns.iter().zip(vocabulary.symptoms()) {
                let value = record.get(column).unwrap_or_default();
                symptoms.push(parse_flag(value).ok_or_else(|| SymptomError::InvalidCell {
                    row: row_number,
                    column: name.clone(),
                    value: value.to_string(),
                })?);
            }

            rows.push(CaseRow {
                symptoms,
                prognosis: record.get(label_column).unwrap_or_default().to_string(),
            });
        }

        tracing::debug!(
            "loaded reference dataset: {} rows, {} symptoms",
            rows.len(),
            vocabulary.len()
        );

        Ok((vocabulary, Self { rows }))
    }
}

/// Rename repeated headers in file order, pandas style.
///
/// The second `x` becomes `x.1`, the third `x.2`. A suffix that is already a header name is
/// skipped, so `[x, x.1, x]` becomes `[x, x.1, x.2]`.
fn dedupe_headers(mut names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for i in 0..names.len() {
        let original = names[i].clone();
        let mut name = original.clone();
        let mut count = counts.get(&original).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(original.clone(), count + 1);
            name = format!("{original}.{count}");
            count = if names.contains(&name) {
                count + 1
            } else {
                counts.get(&name).copied().unwrap_or(0)
            };
        }
        counts.insert(name.clone(), count + 1);
        names[i] = name;
    }
    names
}

fn parse_flag(value: &str) -> Option<u8> {
    match value.trim() {
        "0" => Some(0),
        "1" => Some(1),
        _ => None,
    }
}
