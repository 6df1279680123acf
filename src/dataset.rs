//! Offline preprocessing: raw CSV → cleaned records, vocabulary and
//! encoded training matrix.
//!
//! The raw dataset has one row per disease case: a `Disease` column followed
//! by a number of symptom-slot columns. Cells are messy — stray whitespace,
//! blanks, a `"None"` placeholder for unused slots, and a handful of known
//! typos in the disease names.

use crate::normalize::canonical;
use crate::vocab::SymptomVocabulary;
use anyhow::{Context, Result, bail};
use ndarray::{Array1, Array2};
use rand::rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;

/// Placeholder marking an unused symptom slot in the raw data.
const PLACEHOLDER: &str = "None";

/// Known misspellings and whitespace damage in raw disease names, applied
/// after trimming.
const DISEASE_NAME_FIXES: &[(&str, &str)] = &[
    ("Peptic ulcer diseae", "Peptic ulcer disease"),
    ("Dimorphic hemmorhoids(piles)", "Dimorphic hemorrhoids (piles)"),
    (
        "(vertigo) Paroymsal  Positional Vertigo",
        "(vertigo) Paroxysmal Positional Vertigo",
    ),
];

/// Trims a raw disease name and corrects it against the fix-up table.
pub fn fix_disease_name(raw: &str) -> String {
    let trimmed = raw.trim();
    for (wrong, corrected) in DISEASE_NAME_FIXES {
        if trimmed == *wrong {
            return (*corrected).to_string();
        }
    }
    trimmed.to_string()
}

/// One cleaned dataset row: the corrected disease name and its non-empty
/// symptom values, trimmed, with placeholders dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub disease: String,
    pub symptoms: Vec<String>,
}

/// A train/test partition of the cleaned records.
#[derive(Debug)]
pub struct DatasetSplit {
    pub train: Vec<RawRecord>,
    pub test: Vec<RawRecord>,
}

/// Randomly splits records into train and test sets based on `test_ratio`.
pub fn train_test_split(data: &[RawRecord], test_ratio: f64) -> DatasetSplit {
    let mut rng = rng();
    let mut data = data.to_vec();
    data.shuffle(&mut rng);

    let test_size = ((data.len() as f64) * test_ratio).round() as usize;
    let test = data[..test_size].to_vec();
    let train = data[test_size..].to_vec();

    DatasetSplit { train, test }
}

/// Loads and cleans the raw CSV: first column is the disease, every further
/// column is a symptom slot.
pub fn load_raw_records(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).with_context(|| format!("failed to open dataset {path:?}"))?;
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let mut records = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        let row = row.with_context(|| format!("invalid CSV row {}", line + 2))?;
        let mut fields = row.iter();
        let Some(disease) = fields.next() else {
            continue;
        };
        let disease = fix_disease_name(disease);
        if disease.is_empty() {
            bail!("row {} has an empty disease name", line + 2);
        }
        let symptoms = fields
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != PLACEHOLDER)
            .map(str::to_string)
            .collect();
        records.push(RawRecord { disease, symptoms });
    }

    if records.is_empty() {
        bail!("dataset {path:?} contains no rows");
    }
    Ok(records)
}

/// Collects the distinct symptom values across all records, sorted so that
/// repeated preprocessing runs produce byte-identical column order.
pub fn build_vocabulary(records: &[RawRecord]) -> SymptomVocabulary {
    let columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.symptoms.iter().map(String::as_str))
        .collect();
    SymptomVocabulary::from_columns(columns.into_iter().map(str::to_string).collect())
}

/// Maps disease names to dense integer codes. Classes are sorted, so the
/// name↔index mapping is deterministic for a given dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: BTreeMap<String, usize>,
}

impl LabelEncoder {
    pub fn fit(names: impl IntoIterator<Item = String>) -> Self {
        let classes: Vec<String> = names.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        LabelEncoder { classes, index }
    }

    pub fn transform(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn inverse(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// The one-hot training matrix and its integer targets.
#[derive(Debug)]
pub struct EncodedDataset {
    pub features: Array2<f64>,
    pub targets: Array1<usize>,
}

/// Encodes every record into a row of the training matrix, aligned to the
/// vocabulary's column order.
pub fn encode_records(
    records: &[RawRecord],
    vocab: &SymptomVocabulary,
    labels: &LabelEncoder,
) -> Result<EncodedDataset> {
    let mut features = Array2::zeros((records.len(), vocab.len()));
    let mut targets = Array1::zeros(records.len());

    for (row, record) in records.iter().enumerate() {
        for symptom in &record.symptoms {
            if let Some(col) = vocab.resolve(&canonical(symptom)) {
                features[[row, col]] = 1.0;
            }
        }
        targets[row] = labels
            .transform(&record.disease)
            .with_context(|| format!("disease {:?} missing from label encoder", record.disease))?;
    }

    Ok(EncodedDataset { features, targets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rec(disease: &str, symptoms: &[&str]) -> RawRecord {
        RawRecord {
            disease: disease.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn fixups_correct_known_typos() {
        assert_eq!(fix_disease_name("Peptic ulcer diseae"), "Peptic ulcer disease");
        assert_eq!(fix_disease_name(" Diabetes "), "Diabetes");
        assert_eq!(
            fix_disease_name("(vertigo) Paroymsal  Positional Vertigo"),
            "(vertigo) Paroxysmal Positional Vertigo"
        );
        assert_eq!(fix_disease_name("Malaria"), "Malaria");
    }

    #[test]
    fn vocabulary_is_sorted_and_deduplicated() {
        let records = vec![
            rec("Fungal infection", &["skin_rash", "itching"]),
            rec("Allergy", &["itching", "continuous_sneezing"]),
        ];
        let vocab = build_vocabulary(&records);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.column(0), Some("continuous_sneezing"));
        assert_eq!(vocab.column(1), Some("itching"));
        assert_eq!(vocab.column(2), Some("skin_rash"));
    }

    #[test]
    fn vocabulary_order_is_stable_across_runs() {
        let records = vec![
            rec("A", &["zoster", "ache"]),
            rec("B", &["migraine", "ache"]),
        ];
        let first = build_vocabulary(&records);
        let second = build_vocabulary(&records);
        for i in 0..first.len() {
            assert_eq!(first.column(i), second.column(i));
        }
    }

    #[test]
    fn label_encoder_sorts_classes_and_round_trips() {
        let enc = LabelEncoder::fit(["Malaria", "Allergy", "Malaria", "Dengue"].map(String::from));
        assert_eq!(enc.classes(), &["Allergy", "Dengue", "Malaria"]);
        assert_eq!(enc.transform("Dengue"), Some(1));
        assert_eq!(enc.inverse(1), Some("Dengue"));
        assert_eq!(enc.transform("Typhoid"), None);
    }

    #[test]
    fn encode_records_sets_the_right_bits() {
        let records = vec![
            rec("Fungal infection", &["itching", "skin_rash"]),
            rec("Allergy", &["continuous_sneezing"]),
        ];
        let vocab = build_vocabulary(&records);
        let labels = LabelEncoder::fit(records.iter().map(|r| r.disease.clone()));
        let encoded = encode_records(&records, &vocab, &labels).unwrap();

        // columns sorted: continuous_sneezing, itching, skin_rash
        assert_eq!(encoded.features.row(0).to_vec(), vec![0.0, 1.0, 1.0]);
        assert_eq!(encoded.features.row(1).to_vec(), vec![1.0, 0.0, 0.0]);
        assert_eq!(encoded.targets.to_vec(), vec![1, 0]);
    }

    #[test]
    fn load_drops_placeholders_and_blank_slots() {
        let mut path = std::env::temp_dir();
        path.push("symptom2disease_dataset_test.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Disease,Symptom_1,Symptom_2,Symptom_3").unwrap();
        writeln!(f, "Fungal infection, itching ,skin_rash,None").unwrap();
        writeln!(f, "Peptic ulcer diseae,vomiting,,").unwrap();
        drop(f);

        let records = load_raw_records(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(records[0], rec("Fungal infection", &["itching", "skin_rash"]));
        assert_eq!(records[1], rec("Peptic ulcer disease", &["vomiting"]));
    }

    #[test]
    fn split_ratio_partitions_the_records() {
        let records: Vec<RawRecord> =
            (0..10).map(|i| rec(&format!("D{i}"), &["itching"])).collect();
        let split = train_test_split(&records, 0.2);
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);
    }
}
